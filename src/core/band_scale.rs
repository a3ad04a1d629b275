use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Maps an ordered set of distinct keys onto equal-width pixel bands.
///
/// Bands are separated by `padding_inner × step` and the outermost bands are
/// inset by `padding_outer × step`; the whole run is centered in the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: Vec<String>,
    range_start: f64,
    range_end: f64,
    padding_inner: f64,
    padding_outer: f64,
    first_band_start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Creates a band scale with equal inner and outer padding.
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> ChartResult<Self> {
        Self::with_padding(domain, range, padding, padding)
    }

    pub fn with_padding(
        domain: Vec<String>,
        range: (f64, f64),
        padding_inner: f64,
        padding_outer: f64,
    ) -> ChartResult<Self> {
        if domain.is_empty() {
            return Err(ChartError::EmptyDomain("band scale has no keys".to_owned()));
        }
        if !padding_inner.is_finite() || !(0.0..1.0).contains(&padding_inner) {
            return Err(ChartError::InvalidData(
                "band inner padding must be finite and in [0, 1)".to_owned(),
            ));
        }
        if !padding_outer.is_finite() || padding_outer < 0.0 {
            return Err(ChartError::InvalidData(
                "band outer padding must be finite and >= 0".to_owned(),
            ));
        }
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() || range_end < range_start {
            return Err(ChartError::InvalidData(
                "band range must be finite and ascending".to_owned(),
            ));
        }

        let count = domain.len() as f64;
        let span = range_end - range_start;
        let step = span / (count - padding_inner + 2.0 * padding_outer).max(1.0);
        let occupied = step * (count - padding_inner);
        let first_band_start = range_start + (span - occupied) * 0.5;

        Ok(Self {
            domain,
            range_start,
            range_end,
            padding_inner,
            padding_outer,
            first_band_start,
            step,
            bandwidth: step * (1.0 - padding_inner),
        })
    }

    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn padding(&self) -> (f64, f64) {
        (self.padding_inner, self.padding_outer)
    }

    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.domain.iter().position(|candidate| candidate == key)
    }

    /// Left edge of the band for `key`.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<f64> {
        self.index_of(key).map(|index| self.position_at(index))
    }

    #[must_use]
    pub fn position_at(&self, index: usize) -> f64 {
        self.first_band_start + self.step * index as f64
    }

    /// Horizontal center of the band for `key`.
    #[must_use]
    pub fn midpoint(&self, key: &str) -> Option<f64> {
        self.position(key).map(|start| start + self.bandwidth * 0.5)
    }

    /// `(key, band start, band end)` for every band in domain order.
    pub fn bands(&self) -> impl Iterator<Item = (&str, f64, f64)> + '_ {
        self.domain.iter().enumerate().map(|(index, key)| {
            let start = self.position_at(index);
            (key.as_str(), start, start + self.bandwidth)
        })
    }

    /// Total pixels left between and around the bands.
    #[must_use]
    pub fn total_gap(&self) -> f64 {
        (self.range_end - self.range_start) - self.bandwidth * self.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::BandScale;
    use crate::error::ChartError;

    fn keys(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| (*item).to_owned()).collect()
    }

    #[test]
    fn bands_are_equal_width_and_ordered() {
        let scale = BandScale::new(keys(&["a", "b", "c", "d"]), (0.0, 420.0), 0.2).unwrap();
        // step = 420 / (4 - 0.2 + 0.4) = 100
        assert!((scale.step() - 100.0).abs() < 1e-9);
        assert!((scale.bandwidth() - 80.0).abs() < 1e-9);
        assert!((scale.position("a").unwrap() - 20.0).abs() < 1e-9);
        assert!((scale.position("d").unwrap() - 320.0).abs() < 1e-9);
        assert!((scale.midpoint("b").unwrap() - 160.0).abs() < 1e-9);
    }

    #[test]
    fn empty_domain_is_reported() {
        let err = BandScale::new(Vec::new(), (0.0, 100.0), 0.2).expect_err("empty");
        assert!(matches!(err, ChartError::EmptyDomain(_)));
    }

    #[test]
    fn zero_padding_tiles_the_range() {
        let scale = BandScale::new(keys(&["x", "y"]), (0.0, 50.0), 0.0).unwrap();
        assert_eq!(scale.bandwidth(), 25.0);
        assert_eq!(scale.total_gap(), 0.0);
    }
}
