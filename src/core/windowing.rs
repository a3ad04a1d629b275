use crate::core::band_scale::BandScale;

/// Returns categories whose band midpoint falls inside an inclusive pixel
/// window, in domain order.
#[must_use]
pub fn categories_in_pixel_window(scale: &BandScale, start: f64, end: f64) -> Vec<String> {
    let (min_x, max_x) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    let half = scale.bandwidth() * 0.5;
    scale
        .bands()
        .filter(|&(_, band_start, _)| {
            let midpoint = band_start + half;
            midpoint >= min_x && midpoint <= max_x
        })
        .map(|(key, _, _)| key.to_owned())
        .collect()
}
