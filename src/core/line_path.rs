use std::collections::BTreeSet;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::mapper::{map_time, map_value};
use crate::core::{Rect, SeriesPoint, ValueRange};
use crate::render::{LineStrokeStyle, PathCommand};

/// Which OHLC field pulls the second Bézier control point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SmoothingMode {
    /// Straight segments.
    #[default]
    Off,
    Open,
    High,
    Low,
    /// Midpoint of high and low.
    Middle,
}

/// Value the second control point of the segment ending at `point` leans to.
///
/// Falls back to `close` when the chosen field is absent or not positive.
/// A legitimate zero (or negative) field is indistinguishable from a missing
/// one here.
#[must_use]
pub fn pick_field(point: &SeriesPoint, mode: SmoothingMode) -> f64 {
    let picked = match mode {
        SmoothingMode::Off => None,
        SmoothingMode::Open => point.open,
        SmoothingMode::High => point.high,
        SmoothingMode::Low => point.low,
        SmoothingMode::Middle => match (point.high, point.low) {
            (Some(high), Some(low)) => Some((high + low) / 2.0),
            _ => None,
        },
    };
    match picked {
        Some(value) if value.is_finite() && value > 0.0 => value,
        _ => point.close,
    }
}

/// Number of distinct timestamps across all given series.
#[must_use]
pub fn count_distinct_timestamps<'a, I>(series: I) -> usize
where
    I: IntoIterator<Item = &'a [SeriesPoint]>,
{
    series
        .into_iter()
        .flat_map(|points| points.iter().map(|point| OrderedFloat(point.time)))
        .collect::<BTreeSet<_>>()
        .len()
}

/// Average sampling interval: domain width divided by distinct timestamp count.
#[must_use]
pub fn average_time_diff(domain_min: f64, domain_max: f64, distinct_count: usize) -> f64 {
    if distinct_count == 0 {
        return 0.0;
    }
    (domain_max - domain_min) / distinct_count as f64
}

#[inline]
#[must_use]
pub fn is_gap(delta_time: f64, avg_time_diff: f64) -> bool {
    avg_time_diff > 0.0 && delta_time > 2.0 * avg_time_diff
}

/// Whether a stroke is a contiguous run or the bridge across a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeKind {
    Run,
    GapBridge,
}

/// Pixel-space stroke produced for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStroke {
    pub kind: StrokeKind,
    pub style: LineStrokeStyle,
    pub commands: Vec<PathCommand>,
}

/// Everything needed to project one series into a panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineProjection {
    pub time_min: f64,
    pub time_max: f64,
    pub value_range: ValueRange,
    pub panel: Rect,
    pub avg_time_diff: f64,
    pub fill_gaps: bool,
    pub smoothing: SmoothingMode,
}

impl LineProjection {
    #[must_use]
    pub fn time_to_x(&self, time: f64) -> f64 {
        map_time(time, self.time_min, self.time_max, self.panel.x, self.panel.width)
    }

    #[must_use]
    pub fn value_to_y(&self, value: f64) -> f64 {
        map_value(
            value,
            self.value_range.min,
            self.value_range.max,
            self.panel.y,
            self.panel.height,
        )
    }

    fn project_point(&self, point: &SeriesPoint) -> (f64, f64) {
        (self.time_to_x(point.time), self.value_to_y(point.close))
    }
}

/// Projects a time-ordered series into solid runs and gap bridges.
///
/// Each gap (`dt > 2 * avg_time_diff`) closes the current run, emits a
/// bridging segment (dashed unless gaps are filled) and opens a new run.
/// Fewer than two points produce no stroke.
#[must_use]
pub fn project_series_strokes(
    points: &[SeriesPoint],
    projection: &LineProjection,
) -> Vec<SeriesStroke> {
    if points.len() < 2 {
        return Vec::new();
    }

    #[cfg(feature = "parallel-projection")]
    let mapped: Vec<(f64, f64)> = points
        .par_iter()
        .map(|point| projection.project_point(point))
        .collect();

    #[cfg(not(feature = "parallel-projection"))]
    let mapped: Vec<(f64, f64)> = points
        .iter()
        .map(|point| projection.project_point(point))
        .collect();

    let bridge_style = if projection.fill_gaps {
        LineStrokeStyle::Solid
    } else {
        LineStrokeStyle::Dashed
    };

    let mut strokes = Vec::new();
    let (first_x, first_y) = mapped[0];
    let mut run = vec![PathCommand::MoveTo {
        x: first_x,
        y: first_y,
    }];

    for index in 1..points.len() {
        let (prev_x, prev_y) = mapped[index - 1];
        let (x, y) = mapped[index];
        let delta_time = points[index].time - points[index - 1].time;

        if is_gap(delta_time, projection.avg_time_diff) {
            if run.len() > 1 {
                strokes.push(SeriesStroke {
                    kind: StrokeKind::Run,
                    style: LineStrokeStyle::Solid,
                    commands: std::mem::take(&mut run),
                });
            }
            strokes.push(SeriesStroke {
                kind: StrokeKind::GapBridge,
                style: bridge_style,
                commands: vec![
                    PathCommand::MoveTo {
                        x: prev_x,
                        y: prev_y,
                    },
                    PathCommand::LineTo { x, y },
                ],
            });
            run = vec![PathCommand::MoveTo { x, y }];
            continue;
        }

        if projection.smoothing == SmoothingMode::Off {
            run.push(PathCommand::LineTo { x, y });
        } else {
            let span = x - prev_x;
            let lean = pick_field(&points[index], projection.smoothing);
            run.push(PathCommand::CubicTo {
                cp1x: prev_x + span / 3.0,
                cp1y: prev_y,
                cp2x: prev_x + span * 2.0 / 3.0,
                cp2y: projection.value_to_y(lean),
                x,
                y,
            });
        }
    }

    if run.len() > 1 {
        strokes.push(SeriesStroke {
            kind: StrokeKind::Run,
            style: LineStrokeStyle::Solid,
            commands: run,
        });
    }

    strokes
}

#[cfg(test)]
mod tests {
    use super::{
        LineProjection, SmoothingMode, StrokeKind, average_time_diff, count_distinct_timestamps,
        is_gap, pick_field, project_series_strokes,
    };
    use crate::core::{Rect, SeriesPoint, ValueRange};
    use crate::render::{LineStrokeStyle, PathCommand};

    fn projection(time_max: f64, avg: f64) -> LineProjection {
        LineProjection {
            time_min: 0.0,
            time_max,
            value_range: ValueRange::new(0.0, 10.0),
            panel: Rect::new(0.0, 0.0, 100.0, 100.0),
            avg_time_diff: avg,
            fill_gaps: false,
            smoothing: SmoothingMode::Off,
        }
    }

    #[test]
    fn gap_threshold_uses_twice_the_average_interval() {
        let gapped = [0.0, 1.0, 10.0].map(|t| SeriesPoint::line(t, 1.0));
        let avg = average_time_diff(0.0, 10.0, count_distinct_timestamps([gapped.as_slice()]));
        assert!(!is_gap(1.0, avg));
        assert!(is_gap(9.0, avg));

        let regular = [0.0, 1.0, 2.0].map(|t| SeriesPoint::line(t, 1.0));
        let avg = average_time_diff(0.0, 2.0, count_distinct_timestamps([regular.as_slice()]));
        assert!(!is_gap(1.0, avg));
    }

    #[test]
    fn gap_splits_run_and_emits_dashed_bridge() {
        let points = [0.0, 1.0, 10.0, 11.0].map(|t| SeriesPoint::line(t, 5.0));
        let strokes = project_series_strokes(&points, &projection(11.0, 11.0 / 4.0));
        let kinds: Vec<StrokeKind> = strokes.iter().map(|stroke| stroke.kind).collect();
        assert_eq!(
            kinds,
            vec![StrokeKind::Run, StrokeKind::GapBridge, StrokeKind::Run]
        );
        assert_eq!(strokes[1].style, LineStrokeStyle::Dashed);
        assert_eq!(strokes[0].commands.len(), 2);
    }

    #[test]
    fn filled_gaps_are_solid() {
        let points = [0.0, 1.0, 10.0].map(|t| SeriesPoint::line(t, 5.0));
        let mut projection = projection(10.0, 10.0 / 3.0);
        projection.fill_gaps = true;
        let strokes = project_series_strokes(&points, &projection);
        assert!(
            strokes
                .iter()
                .all(|stroke| stroke.style == LineStrokeStyle::Solid)
        );
    }

    #[test]
    fn smoothing_leans_second_control_point_to_chosen_field() {
        let points = [
            SeriesPoint::ohlc(0.0, 4.0, 6.0, 3.0, 5.0),
            SeriesPoint::ohlc(3.0, 5.0, 9.0, 2.0, 7.0),
        ];
        let mut projection = projection(3.0, 0.0);
        projection.smoothing = SmoothingMode::High;
        let strokes = project_series_strokes(&points, &projection);
        let PathCommand::CubicTo {
            cp1x,
            cp1y,
            cp2x,
            cp2y,
            ..
        } = strokes[0].commands[1]
        else {
            panic!("expected cubic segment");
        };
        assert!((cp1x - 100.0 / 3.0).abs() <= 1e-9);
        assert!((cp1y - projection.value_to_y(5.0)).abs() <= 1e-9);
        assert!((cp2x - 200.0 / 3.0).abs() <= 1e-9);
        assert!((cp2y - projection.value_to_y(9.0)).abs() <= 1e-9);
    }

    #[test]
    fn pick_field_falls_back_to_close_for_missing_or_zero() {
        let line = SeriesPoint::line(0.0, 3.0);
        assert_eq!(pick_field(&line, SmoothingMode::Open), 3.0);
        let zero_open = SeriesPoint::ohlc(0.0, 0.0, 4.0, 2.0, 3.0);
        assert_eq!(pick_field(&zero_open, SmoothingMode::Open), 3.0);
        assert_eq!(pick_field(&zero_open, SmoothingMode::Middle), 3.0);
        assert_eq!(pick_field(&zero_open, SmoothingMode::Low), 2.0);
    }

    #[test]
    fn single_point_produces_no_stroke() {
        let points = [SeriesPoint::line(0.0, 1.0)];
        assert!(project_series_strokes(&points, &projection(1.0, 1.0)).is_empty());
    }
}
