//! Pure time/value to pixel mapping shared by every drawing routine.
//!
//! Zero-width ranges never produce `NaN`/`Infinity`: the span is replaced
//! with `1` before dividing.

/// Fraction of a panel's height kept free above and below the plotted values.
pub const VALUE_MARGIN_RATIO: f64 = 0.1;

#[inline]
fn safe_span(min: f64, max: f64) -> f64 {
    let span = max - min;
    if span == 0.0 || !span.is_finite() {
        1.0
    } else {
        span
    }
}

/// Maps a timestamp to an x coordinate inside `[panel_left, panel_left + panel_width]`.
///
/// A single-instant domain places its sample at the panel centre.
#[must_use]
pub fn map_time(
    t: f64,
    domain_min: f64,
    domain_max: f64,
    panel_left: f64,
    panel_width: f64,
) -> f64 {
    if domain_max == domain_min {
        return panel_left + panel_width / 2.0 + (t - domain_min) * panel_width;
    }
    let span = safe_span(domain_min, domain_max);
    panel_left + (t - domain_min) / span * panel_width
}

/// Maps a value to a y coordinate; larger values land higher on screen.
#[must_use]
pub fn map_value(
    v: f64,
    range_min: f64,
    range_max: f64,
    panel_top: f64,
    panel_height: f64,
) -> f64 {
    let normalized = (v - range_min) / safe_span(range_min, range_max);
    let scaled = VALUE_MARGIN_RATIO + normalized * (1.0 - 2.0 * VALUE_MARGIN_RATIO);
    panel_top + panel_height * (1.0 - scaled)
}

/// Inverse of [`map_time`].
#[must_use]
pub fn pixel_to_time(
    x: f64,
    domain_min: f64,
    domain_max: f64,
    panel_left: f64,
    panel_width: f64,
) -> f64 {
    if panel_width <= 0.0 {
        return domain_min;
    }
    let span = safe_span(domain_min, domain_max);
    domain_min + (x - panel_left) / panel_width * span
}

/// Inverse of [`map_value`].
#[must_use]
pub fn pixel_to_value(
    y: f64,
    range_min: f64,
    range_max: f64,
    panel_top: f64,
    panel_height: f64,
) -> f64 {
    if panel_height <= 0.0 {
        return range_min;
    }
    let scaled = 1.0 - (y - panel_top) / panel_height;
    let normalized = (scaled - VALUE_MARGIN_RATIO) / (1.0 - 2.0 * VALUE_MARGIN_RATIO);
    range_min + normalized * safe_span(range_min, range_max)
}

/// Evenly spaced tick values across `[min, max]`, endpoints included.
#[must_use]
pub fn linear_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (count - 1) as f64;
            (0..count).map(|i| min + step * i as f64).collect()
        }
    }
}
