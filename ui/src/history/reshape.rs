//! Wide-to-long reshaping of duration columns.

use time::OffsetDateTime;
use tracing::warn;

use super::labels::standardize_series_label;
use super::time_axis::TimedRows;

pub const MS_SUFFIX: &str = "_ms";
pub const SINGLE_DURATION_COLUMN: &str = "duration_ms";

/// A duration column chosen for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureColumn {
    pub index: usize,
    pub raw: String,
    pub label: String,
}

/// Pick the plottable columns. Several `*_ms` columns each become their own
/// series; a lone one (or `duration_ms`) becomes the single "Duration" series.
pub fn measure_columns(columns: &[String]) -> Vec<MeasureColumn> {
    let ms_columns: Vec<(usize, &String)> = columns
        .iter()
        .enumerate()
        .filter(|(_, name)| name.ends_with(MS_SUFFIX))
        .collect();

    if ms_columns.len() > 1 {
        return ms_columns
            .into_iter()
            .map(|(index, raw)| MeasureColumn {
                index,
                raw: raw.clone(),
                label: standardize_series_label(raw.strip_suffix(MS_SUFFIX).unwrap_or(raw)),
            })
            .collect();
    }

    let single = columns
        .iter()
        .position(|c| c == SINGLE_DURATION_COLUMN)
        .or_else(|| ms_columns.first().map(|(idx, _)| *idx));

    single
        .map(|index| MeasureColumn {
            index,
            raw: columns[index].clone(),
            label: standardize_series_label("duration"),
        })
        .into_iter()
        .collect()
}

/// One (original row, duration column) observation.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub time: OffsetDateTime,
    pub series: String,
    pub value_ms: Option<f64>,
    /// Non-duration cells of the source row, aligned with [`LongTable::id_columns`].
    pub carried: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LongTable {
    pub id_columns: Vec<String>,
    /// Series labels in column order.
    pub series: Vec<String>,
    pub rows: Vec<LongRow>,
}

impl LongTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop a series entirely, rows and label.
    pub fn without_series(&self, label: &str) -> LongTable {
        LongTable {
            id_columns: self.id_columns.clone(),
            series: self.series.iter().filter(|s| *s != label).cloned().collect(),
            rows: self
                .rows
                .iter()
                .filter(|row| row.series != label)
                .cloned()
                .collect(),
        }
    }
}

/// Melt the windowed rows. `None` when there is nothing to plot.
pub fn melt(rows: &TimedRows) -> Option<LongTable> {
    let table = &rows.table;
    let measures = measure_columns(table.columns());
    if measures.is_empty() {
        return None;
    }

    let id_indices: Vec<usize> = (0..table.columns().len())
        .filter(|idx| !measures.iter().any(|m| m.index == *idx))
        .collect();
    let id_columns = id_indices
        .iter()
        .map(|idx| table.columns()[*idx].clone())
        .collect();

    // One series per label; the first column in file order wins.
    let mut series: Vec<String> = Vec::new();
    let mut plotted: Vec<&MeasureColumn> = Vec::with_capacity(measures.len());
    for measure in &measures {
        if series.contains(&measure.label) {
            warn!(
                column = %measure.raw,
                label = %measure.label,
                "duration column duplicates an earlier series label; skipping"
            );
            continue;
        }
        series.push(measure.label.clone());
        plotted.push(measure);
    }

    let mut long_rows = Vec::with_capacity(table.len() * plotted.len());
    for measure in plotted {
        for (row, time) in rows.times.iter().enumerate() {
            long_rows.push(LongRow {
                time: *time,
                series: measure.label.clone(),
                value_ms: table.number(row, measure.index),
                carried: id_indices
                    .iter()
                    .map(|idx| table.cell(row, *idx).unwrap_or_default().to_string())
                    .collect(),
            });
        }
    }

    Some(LongTable {
        id_columns,
        series,
        rows: long_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::Table;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn multiple_ms_columns_each_become_series() {
        let measures = measure_columns(&cols(&["leaderboard_name", "time", "top1_ms", "top100_ms"]));
        let labels: Vec<_> = measures.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["Top 1", "Top 100"]);
    }

    #[test]
    fn lone_duration_column_is_labelled_duration() {
        let measures = measure_columns(&cols(&["leaderboard_name", "time", "duration_ms"]));
        assert_eq!(measures.len(), 1);
        assert_eq!(measures[0].raw, "duration_ms");
        assert_eq!(measures[0].label, "Duration");

        let measures = measure_columns(&cols(&["time", "top1_ms"]));
        assert_eq!(measures[0].label, "Duration");
    }

    #[test]
    fn no_duration_columns_means_nothing_to_plot() {
        assert!(measure_columns(&cols(&["leaderboard_name", "time", "count"])).is_empty());
    }

    #[test]
    fn melt_emits_one_row_per_cell_and_carries_ids() {
        let table = Table::from_reader(
            "leaderboard_name,time,top1_ms,top10_ms\n\
             Hay,2025-10-01 12:00,60000,\n\
             Hay,2025-10-02 12:00,59000,70000\n"
                .as_bytes(),
        )
        .unwrap();
        let rows = TimedRows::parse(&table, "time");
        let long = melt(&rows).unwrap();

        assert_eq!(long.id_columns, ["leaderboard_name", "time"]);
        assert_eq!(long.series, ["Top 1", "Top 10"]);
        assert_eq!(long.rows.len(), 4);
        assert_eq!(long.rows[0].carried[0], "Hay");
        assert_eq!(long.rows[2].value_ms, None);
        assert_eq!(long.rows[3].value_ms, Some(70_000.0));

        let filtered = long.without_series("Top 10");
        assert_eq!(filtered.series, ["Top 1"]);
        assert_eq!(filtered.rows.len(), 2);
        assert_eq!(long.rows.len(), 4);
    }

    #[test]
    fn columns_sharing_a_label_keep_the_first() {
        let table = Table::from_reader(
            "time,top1_ms,rank1_ms,top2_ms
             2025-10-01 12:00,60000,61000,65000
"
                .as_bytes(),
        )
        .unwrap();
        let long = melt(&TimedRows::parse(&table, "time")).unwrap();

        assert_eq!(long.series, ["Top 1", "Top 2"]);
        assert_eq!(long.id_columns, ["time"]);
        let top_one: Vec<_> = long.rows.iter().filter(|r| r.series == "Top 1").collect();
        assert_eq!(top_one.len(), 1);
        assert_eq!(top_one[0].value_ms, Some(60_000.0));
    }
}
