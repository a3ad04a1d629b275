use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ticks::{nice_domain, ticks};
use crate::error::{ChartError, ChartResult};

/// Controls how the value domain is derived from data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScaleOptions {
    /// Extend the raw extent so it always includes zero.
    #[serde(default = "default_force_zero")]
    pub force_zero: bool,
    /// Tick count used when rounding the domain outward.
    #[serde(default = "default_nice_count")]
    pub nice_count: usize,
    /// Fraction by which each non-zero endpoint is pushed away from zero
    /// before nicing (`0.1` reproduces a 10% headroom).
    #[serde(default)]
    pub headroom_ratio: f64,
}

impl Default for ValueScaleOptions {
    fn default() -> Self {
        Self {
            force_zero: default_force_zero(),
            nice_count: default_nice_count(),
            headroom_ratio: 0.0,
        }
    }
}

fn default_force_zero() -> bool {
    true
}

fn default_nice_count() -> usize {
    10
}

/// Continuous value axis mapped onto an inverted pixel range
/// (`domain_start → range_start = inner height`, `domain_end → 0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl ValueScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "value scale domain must be finite and non-zero".to_owned(),
            ));
        }
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "value scale range must be finite".to_owned(),
            ));
        }
        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    /// Derives the scale from raw values.
    ///
    /// An empty value set reads as all-zero and therefore degenerate.
    pub fn compute<I>(
        values: I,
        options: ValueScaleOptions,
        inner_height: f64,
    ) -> ChartResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        if options.nice_count == 0 {
            return Err(ChartError::InvalidData(
                "value scale nice count must be > 0".to_owned(),
            ));
        }
        if !options.headroom_ratio.is_finite() || options.headroom_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "value scale headroom ratio must be finite and >= 0".to_owned(),
            ));
        }

        let (lo, hi) = match raw_extent(values, options.force_zero) {
            Ok(extent) => extent,
            Err(ChartError::DegenerateValueRange { value }) => {
                let substitute = substitute_domain(value);
                debug!(
                    value,
                    substitute_start = substitute.0,
                    substitute_end = substitute.1,
                    "degenerate value range, substituting synthetic domain"
                );
                substitute
            }
            Err(err) => return Err(err),
        };

        let ratio = options.headroom_ratio;
        let (lo, hi) = (
            (lo - lo.abs() * ratio).max(f64::MIN),
            (hi + hi.abs() * ratio).min(f64::MAX),
        );
        if !(hi - lo).is_finite() {
            debug!(lo, hi, "value span exceeds f64, skipping nice rounding");
            return Self::new((lo, hi), (inner_height, 0.0));
        }
        let domain = nice_domain(lo, hi, options.nice_count);
        Self::new(domain, (inner_height, 0.0))
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        let (lo, hi) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        (lo..=hi).contains(&value)
    }

    /// Half of the domain span. Halving first keeps the span finite for
    /// domains near the ends of the f64 range.
    fn half_span(self) -> f64 {
        self.domain_end * 0.5 - self.domain_start * 0.5
    }

    #[must_use]
    pub fn to_pixel(self, value: f64) -> f64 {
        let normalized = (value * 0.5 - self.domain_start * 0.5) / self.half_span();
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn to_value(self, pixel: f64) -> f64 {
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        self.domain_start * (1.0 - normalized) + self.domain_end * normalized
    }

    /// Pixel row of value 0, the anchor for bar geometry.
    #[must_use]
    pub fn baseline(self) -> f64 {
        self.to_pixel(0.0)
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks(self.domain_start, self.domain_end, count)
    }
}

fn raw_extent<I>(values: I, force_zero: bool) -> ChartResult<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut extent: Option<(f64, f64)> = None;
    for value in values.into_iter().filter(|value| value.is_finite()) {
        extent = Some(match extent {
            Some((lo, hi)) => (lo.min(value), hi.max(value)),
            None => (value, value),
        });
    }

    let (mut lo, mut hi) = extent.unwrap_or((0.0, 0.0));
    if force_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if lo == hi {
        return Err(ChartError::DegenerateValueRange { value: lo });
    }
    Ok((lo, hi))
}

fn substitute_domain(value: f64) -> (f64, f64) {
    if value == 0.0 {
        (-1.0, 1.0)
    } else {
        (value - 1.0, value + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{ValueScale, ValueScaleOptions};

    #[test]
    fn forced_zero_domain_spans_mixed_signs() {
        let scale = ValueScale::compute([5.0, -3.0, -2.0, 4.0], ValueScaleOptions::default(), 200.0)
            .unwrap();
        assert_eq!(scale.domain(), (-3.0, 5.0));
        assert_eq!(scale.to_pixel(-3.0), 200.0);
        assert_eq!(scale.to_pixel(5.0), 0.0);
    }

    #[test]
    fn positive_only_data_still_includes_zero() {
        let scale =
            ValueScale::compute([8.0, 23.0], ValueScaleOptions::default(), 100.0).unwrap();
        assert_eq!(scale.domain(), (0.0, 24.0));
        assert_eq!(scale.baseline(), 100.0);
    }

    #[test]
    fn all_zero_values_substitute_unit_domain() {
        let scale = ValueScale::compute([0.0, 0.0], ValueScaleOptions::default(), 100.0).unwrap();
        assert_eq!(scale.domain(), (-1.0, 1.0));
        assert_eq!(scale.baseline(), 50.0);
    }

    #[test]
    fn raw_extent_without_force_zero() {
        let options = ValueScaleOptions {
            force_zero: false,
            ..ValueScaleOptions::default()
        };
        let scale = ValueScale::compute([12.0, 18.0], options, 100.0).unwrap();
        assert_eq!(scale.domain(), (12.0, 18.0));
        assert!(!scale.contains(0.0));
    }

    #[test]
    fn pixel_round_trip() {
        let scale = ValueScale::new((-4.0, 6.0), (300.0, 0.0)).unwrap();
        let pixel = scale.to_pixel(2.5);
        assert!((scale.to_value(pixel) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn extreme_values_keep_finite_pixels() {
        let scale =
            ValueScale::compute([1e308, -1e308], ValueScaleOptions::default(), 100.0).unwrap();
        assert_eq!(scale.domain(), (-1e308, 1e308));
        assert_eq!(scale.baseline(), 50.0);
        assert_eq!(scale.to_pixel(1e308), 0.0);
        assert_eq!(scale.to_pixel(-1e308), 100.0);
        assert_eq!(scale.to_value(0.0), 1e308);

        let headroom = ValueScaleOptions {
            headroom_ratio: 0.5,
            ..ValueScaleOptions::default()
        };
        let scale = ValueScale::compute([f64::MAX], headroom, 100.0).unwrap();
        assert!(scale.to_pixel(f64::MAX).is_finite());
    }
}
