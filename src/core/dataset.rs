use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};

/// One row of the dataset: a category key plus per-series values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub category: String,
    #[serde(default)]
    pub values: IndexMap<String, f64>,
}

impl Record {
    #[must_use]
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            values: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, series_key: impl Into<String>, value: f64) -> Self {
        self.values.insert(series_key.into(), value);
        self
    }

    /// Returns the value for `series_key` when it is present and finite.
    ///
    /// Absent or non-finite values are treated as missing: they produce no
    /// shape and do not contribute to the value extent.
    #[must_use]
    pub fn value(&self, series_key: &str) -> Option<f64> {
        self.values
            .get(series_key)
            .copied()
            .filter(|value| value.is_finite())
    }
}

/// Ordered, distinct series keys declared by configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesKeySet {
    keys: Vec<String>,
}

impl SeriesKeySet {
    /// Builds a key set, dropping repeated keys after their first occurrence.
    #[must_use]
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: IndexSet<String> = keys.into_iter().map(Into::into).collect();
        Self {
            keys: unique.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|candidate| candidate == key)
    }

    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|candidate| candidate == key)
    }
}

/// Originating data of a drawn shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    pub category: String,
    pub series_key: String,
    pub value: f64,
}

/// Ordered record sequence. Record order defines category-axis order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct categories in first-occurrence order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let unique: IndexSet<&str> = self
            .records
            .iter()
            .map(|record| record.category.as_str())
            .collect();
        unique.into_iter().map(str::to_owned).collect()
    }

    /// Records (with their dataset index) whose category is in `categories`,
    /// in dataset order.
    #[must_use]
    pub fn records_in<'a>(&'a self, categories: &[String]) -> Vec<(usize, &'a Record)> {
        let wanted: IndexSet<&str> = categories.iter().map(String::as_str).collect();
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| wanted.contains(record.category.as_str()))
            .collect()
    }

    /// All finite values of the given keys across all records.
    pub fn values_for<'a>(
        &'a self,
        keys: &'a SeriesKeySet,
    ) -> impl Iterator<Item = f64> + 'a {
        self.records
            .iter()
            .flat_map(move |record| keys.keys().iter().filter_map(move |key| record.value(key)))
    }

    /// Parses a JSON array of flat objects, e.g.
    /// `[{"label": "Jan", "A": 5, "B": -3}]`.
    ///
    /// When `category_field` is `None`, the category field is the first field
    /// of the first row that is not one of `keys`. Category values may be
    /// strings or numbers. Non-numeric series values are dropped.
    pub fn from_json_rows(
        json: &str,
        keys: &SeriesKeySet,
        category_field: Option<&str>,
    ) -> ChartResult<Self> {
        let parsed: Value = serde_json::from_str(json)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse dataset: {e}")))?;
        let Value::Array(rows) = parsed else {
            return Err(ChartError::InvalidData(
                "dataset json must be an array of objects".to_owned(),
            ));
        };

        if rows.is_empty() {
            debug!("empty dataset rows");
            return Ok(Self::default());
        }

        let category_field = match category_field {
            Some(field) => field.to_owned(),
            None => detect_category_field(&rows, keys)?,
        };
        debug!(rows = rows.len(), category_field = %category_field, "parse dataset rows");

        let mut records = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let Value::Object(fields) = row else {
                return Err(ChartError::InvalidData(format!(
                    "dataset row {index} is not an object"
                )));
            };
            let category = match fields.get(&category_field) {
                Some(Value::String(text)) => text.clone(),
                Some(Value::Number(number)) => number.to_string(),
                _ => {
                    return Err(ChartError::InvalidData(format!(
                        "dataset row {index} has no `{category_field}` category"
                    )));
                }
            };

            let mut record = Record::new(category);
            for key in keys.keys() {
                match fields.get(key) {
                    Some(Value::Number(number)) => {
                        if let Some(value) = number.as_f64() {
                            record.values.insert(key.clone(), value);
                        }
                    }
                    Some(other) => {
                        warn!(
                            row = index,
                            series = %key,
                            value = %other,
                            "dropping non-numeric series value"
                        );
                    }
                    None => {}
                }
            }
            records.push(record);
        }

        Ok(Self::new(records))
    }
}

fn detect_category_field(rows: &[Value], keys: &SeriesKeySet) -> ChartResult<String> {
    rows.first()
        .and_then(Value::as_object)
        .and_then(|fields| fields.keys().find(|field| !keys.contains(field)).cloned())
        .ok_or_else(|| {
            ChartError::InvalidData("cannot detect category field in dataset rows".to_owned())
        })
}
