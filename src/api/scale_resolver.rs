use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{BandScale, Dataset, PlotArea, SeriesKeySet, ValueScale, ValueScaleOptions};
use crate::error::{ChartError, ChartResult};

use super::ChartConfig;

/// Every scale one pipeline pass needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedScales {
    pub plot: PlotArea,
    /// Bands of the visible categories.
    pub category: BandScale,
    /// Sub-bands of the series keys inside one category band.
    pub series: BandScale,
    pub value: ValueScale,
    /// Bands of all categories across the brush track.
    pub brush: BandScale,
}

/// Category bands across `[0, inner_width]`. Repeated categories keep their
/// first position.
pub fn compute_category_scale<I, S>(
    categories: I,
    inner_width: f64,
    padding: f64,
) -> ChartResult<BandScale>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let unique: IndexSet<String> = categories.into_iter().map(Into::into).collect();
    if unique.is_empty() {
        return Err(ChartError::EmptyDomain("no visible categories".to_owned()));
    }
    BandScale::new(unique.into_iter().collect(), (0.0, inner_width), padding)
}

/// Series slots inside one category band of width `bandwidth`.
pub fn compute_series_scale(
    keys: &SeriesKeySet,
    bandwidth: f64,
    padding: f64,
) -> ChartResult<BandScale> {
    if keys.is_empty() {
        return Err(ChartError::EmptyDomain("no series keys".to_owned()));
    }
    BandScale::new(keys.keys().to_vec(), (0.0, bandwidth), padding)
}

pub fn compute_value_scale<I>(
    values: I,
    options: ValueScaleOptions,
    inner_height: f64,
) -> ChartResult<ValueScale>
where
    I: IntoIterator<Item = f64>,
{
    ValueScale::compute(values, options, inner_height)
}

/// Inputs of `resolve_scales`.
#[derive(Debug, Clone, Copy)]
pub struct ScaleInputs<'a> {
    pub dataset: &'a Dataset,
    pub keys: &'a SeriesKeySet,
    pub config: &'a ChartConfig,
    pub plot: PlotArea,
    /// Categories drawn in the plot, in dataset order.
    pub visible_categories: &'a [String],
    /// Derive the value domain from the visible records only.
    pub values_from_visible: bool,
}

pub fn resolve_scales(inputs: ScaleInputs<'_>) -> ChartResult<ResolvedScales> {
    let ScaleInputs {
        dataset,
        keys,
        config,
        plot,
        visible_categories,
        values_from_visible,
    } = inputs;

    if keys.is_empty() {
        return Err(ChartError::EmptyDomain("no series keys".to_owned()));
    }

    let category_padding = config.effective_category_padding();
    let category = compute_category_scale(
        visible_categories.iter().cloned(),
        plot.width,
        category_padding,
    )?;
    let series = compute_series_scale(
        keys,
        category.bandwidth(),
        config.effective_series_padding(),
    )?;

    let value = if values_from_visible {
        let records = dataset.records_in(visible_categories);
        let values = records.iter().flat_map(|&(_, record)| {
            keys.keys().iter().filter_map(move |key| record.value(key))
        });
        compute_value_scale(values, config.value_scale, plot.height)?
    } else {
        compute_value_scale(dataset.values_for(keys), config.value_scale, plot.height)?
    };

    let brush = compute_category_scale(dataset.categories(), plot.width, category_padding)?;

    trace!(
        categories = category.len(),
        series = series.len(),
        bandwidth = category.bandwidth(),
        value_start = value.domain().0,
        value_end = value.domain().1,
        "resolved scales"
    );

    Ok(ResolvedScales {
        plot,
        category,
        series,
        value,
        brush,
    })
}
