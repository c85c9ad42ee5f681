//! Chart description produced from the long table.
//!
//! Everything the renderer needs is precomputed here: styled series with
//! sorted points, the default value domain, the time domain anchored to
//! "now" and the pivoted hover rows.

use std::collections::BTreeMap;

use time::OffsetDateTime;

use super::labels::{series_color, series_dash, TOP_1};
use super::reshape::LongTable;
use crate::core::format::format_duration_ms;

/// Multiplier applied to the reference value for the default y maximum.
pub const Y_HEADROOM: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub time: OffsetDateTime,
    pub value_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub color: String,
    pub dash: [u32; 2],
    /// Points with a value, sorted by time.
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn latest(&self) -> Option<&ChartPoint> {
        self.points.last()
    }
}

/// Everything shown on hover at one timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipRow {
    pub time: OffsetDateTime,
    /// Formatted value per series, aligned with [`HistoryChart::series`].
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryChart {
    pub time_column: String,
    pub series: Vec<ChartSeries>,
    pub y_domain: (f64, f64),
    pub x_domain: (OffsetDateTime, OffsetDateTime),
    pub tooltip: Vec<TooltipRow>,
}

impl HistoryChart {
    pub fn is_multi_series(&self) -> bool {
        self.series.len() > 1
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Default upper bound of the value axis.
///
/// The reference is the latest "Top 1" value when that series exists,
/// otherwise the smallest latest value across series. Missing or negative
/// references clamp to zero.
pub fn default_y_max(series: &[ChartSeries]) -> f64 {
    let top_one = series
        .iter()
        .find(|s| s.label == TOP_1)
        .and_then(|s| s.latest())
        .map(|p| p.value_ms);

    let reference = top_one.or_else(|| {
        series
            .iter()
            .filter_map(|s| s.latest().map(|p| p.value_ms))
            .fold(None, |min: Option<f64>, v| {
                Some(min.map_or(v, |m| m.min(v)))
            })
    });

    let reference = reference.filter(|v| v.is_finite()).unwrap_or(0.0).max(0.0);
    reference * Y_HEADROOM
}

/// Assemble the chart from a (filtered) long table.
///
/// `single_series_color` styles a lone series; multi-series charts use the
/// tier colour table.
pub fn assemble(
    long: &LongTable,
    time_column: &str,
    single_series_color: &str,
    now: OffsetDateTime,
) -> HistoryChart {
    let single = long.series.len() == 1;

    let series: Vec<ChartSeries> = long
        .series
        .iter()
        .map(|label| {
            let mut points: Vec<ChartPoint> = long
                .rows
                .iter()
                .filter(|row| &row.series == label)
                .filter_map(|row| {
                    row.value_ms.map(|value_ms| ChartPoint {
                        time: row.time,
                        value_ms,
                    })
                })
                .collect();
            points.sort_by_key(|p| p.time);

            let color = if single {
                single_series_color.to_string()
            } else {
                series_color(label).to_string()
            };

            ChartSeries {
                label: label.clone(),
                color,
                dash: series_dash(label),
                points,
            }
        })
        .collect();

    let y_max = default_y_max(&series);

    let earliest = long.rows.iter().map(|r| r.time).min().unwrap_or(now);
    let latest = long.rows.iter().map(|r| r.time).max().unwrap_or(now);
    let x_domain = (earliest, now.max(latest));

    HistoryChart {
        time_column: time_column.to_string(),
        tooltip: pivot_tooltip(long),
        series,
        y_domain: (0.0, y_max),
        x_domain,
    }
}

/// One row per timestamp with every series' formatted value.
fn pivot_tooltip(long: &LongTable) -> Vec<TooltipRow> {
    let mut by_time: BTreeMap<OffsetDateTime, Vec<Option<f64>>> = BTreeMap::new();
    for row in &long.rows {
        let Some(slot) = long.series.iter().position(|s| *s == row.series) else {
            continue;
        };
        let values = by_time
            .entry(row.time)
            .or_insert_with(|| vec![None; long.series.len()]);
        if row.value_ms.is_some() {
            values[slot] = row.value_ms;
        }
    }

    by_time
        .into_iter()
        .map(|(time, values)| TooltipRow {
            time,
            values: values.into_iter().map(format_duration_ms).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::reshape::LongRow;
    use time::macros::datetime;

    fn row(time: OffsetDateTime, series: &str, value: Option<f64>) -> LongRow {
        LongRow {
            time,
            series: series.to_string(),
            value_ms: value,
            carried: Vec::new(),
        }
    }

    fn series(label: &str, values: &[(OffsetDateTime, f64)]) -> ChartSeries {
        ChartSeries {
            label: label.to_string(),
            color: series_color(label).to_string(),
            dash: series_dash(label),
            points: values
                .iter()
                .map(|(time, value_ms)| ChartPoint {
                    time: *time,
                    value_ms: *value_ms,
                })
                .collect(),
        }
    }

    const T0: OffsetDateTime = datetime!(2025-10-01 12:00 UTC);
    const T1: OffsetDateTime = datetime!(2025-10-02 12:00 UTC);

    #[test]
    fn y_max_uses_latest_top_one() {
        let s = [
            series("Top 1", &[(T0, 60_000.0), (T1, 59_000.0)]),
            series("Top 10", &[(T0, 50_000.0), (T1, 40_000.0)]),
        ];
        assert_eq!(default_y_max(&s), 177_000.0);
    }

    #[test]
    fn y_max_falls_back_to_smallest_latest() {
        let s = [
            series("Top 10", &[(T0, 90_000.0), (T1, 80_000.0)]),
            series("Top 100", &[(T0, 120_000.0)]),
        ];
        assert_eq!(default_y_max(&s), 240_000.0);
    }

    #[test]
    fn y_max_is_never_negative() {
        assert_eq!(default_y_max(&[series("Top 1", &[(T1, -5.0)])]), 0.0);
        assert_eq!(default_y_max(&[series("Top 1", &[])]), 0.0);
        assert_eq!(default_y_max(&[]), 0.0);
    }

    #[test]
    fn assemble_sorts_points_and_anchors_now() {
        let long = LongTable {
            id_columns: vec![],
            series: vec!["Top 1".into(), "Top 2".into()],
            rows: vec![
                row(T1, "Top 1", Some(59_000.0)),
                row(T0, "Top 1", Some(60_000.0)),
                row(T0, "Top 2", None),
                row(T1, "Top 2", Some(61_000.0)),
            ],
        };
        let now = datetime!(2025-10-05 00:00 UTC);
        let chart = assemble(&long, "time", "#DAA520", now);

        assert!(chart.is_multi_series());
        assert_eq!(chart.series[0].points[0].time, T0);
        assert_eq!(chart.series[0].color, "#FFD700");
        assert_eq!(chart.series[1].points.len(), 1);
        assert_eq!(chart.x_domain, (T0, now));
        assert_eq!(chart.y_domain, (0.0, 177_000.0));

        assert_eq!(chart.tooltip.len(), 2);
        assert_eq!(chart.tooltip[0].values, ["1:00.000", ""]);
        assert_eq!(chart.tooltip[1].values, ["0:59.000", "1:01.000"]);
    }

    #[test]
    fn single_series_takes_category_colour() {
        let long = LongTable {
            id_columns: vec![],
            series: vec!["Duration".into()],
            rows: vec![row(T0, "Duration", Some(1_000.0))],
        };
        let chart = assemble(&long, "time", "#DAA520", T1);
        assert!(!chart.is_multi_series());
        assert_eq!(chart.series[0].color, "#DAA520");
        assert_eq!(chart.y_domain.1, 3_000.0);
    }
}
