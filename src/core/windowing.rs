use crate::core::SeriesPoint;

/// Returns renderable points whose time falls inside an inclusive window.
#[must_use]
pub fn points_in_time_window(points: &[SeriesPoint], start: f64, end: f64) -> Vec<SeriesPoint> {
    let (min_t, max_t) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    points
        .iter()
        .copied()
        .filter(|point| point.is_renderable() && point.time >= min_t && point.time <= max_t)
        .collect()
}

/// Inclusive `(min, max)` time extent across several series.
#[must_use]
pub fn time_extent<'a, I>(series: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a [SeriesPoint]>,
{
    series
        .into_iter()
        .flat_map(|points| points.iter())
        .filter(|point| point.is_renderable())
        .fold(None, |acc, point| match acc {
            Some((min, max)) => Some((f64::min(min, point.time), f64::max(max, point.time))),
            None => Some((point.time, point.time)),
        })
}
