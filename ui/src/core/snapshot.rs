//! Snapshot loading for the three upstream CSV exports.
//!
//! Files are produced elsewhere; this module only parses them. Failures are
//! surfaced as [`SnapshotError`] and are not retried.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::table::Table;
use super::timing::parse_timestamp;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("couldn't open snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Csv(#[from] csv::Error),
    #[error("{source_name} snapshot has no `{column}` column")]
    MissingColumn {
        source_name: &'static str,
        column: &'static str,
    },
}

/// One ranked entry from the latest-gaps export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GapRow {
    pub leaderboard_name: String,
    pub rank: u32,
    #[serde(default)]
    pub steam_name: String,
    #[serde(default, deserialize_with = "lenient_ms")]
    pub duration_ms: Option<f64>,
    #[serde(default, deserialize_with = "lenient_ms")]
    pub gap_prev_ms: Option<f64>,
    #[serde(default, deserialize_with = "lenient_ms")]
    pub gap_leader_ms: Option<f64>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub achieved_at: Option<OffsetDateTime>,
}

/// Percentile thresholds for one category.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PercentileSummary {
    pub leaderboard_name: String,
    /// `(percent, duration_ms)` in column order.
    pub tiers: Vec<(u32, Option<f64>)>,
    pub entry_count: Option<u64>,
}

pub type PercentileMap = BTreeMap<String, PercentileSummary>;

/// Blank, `NaN` and text cells deserialize to `None` instead of failing the file.
fn lenient_ms<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite()))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

pub fn open_source(path: &Path) -> Result<File, SnapshotError> {
    File::open(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Over-time measurements, kept wide; reshaping happens per render.
pub fn read_over_time<R: Read>(reader: R) -> Result<Table, SnapshotError> {
    let table = Table::from_reader(reader)?;
    info!(
        rows = table.len(),
        columns = table.columns().len(),
        "loaded over-time snapshot"
    );
    Ok(table)
}

pub fn read_gaps_latest<R: Read>(reader: R) -> Result<Vec<GapRow>, SnapshotError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<GapRow>() {
        rows.push(record?);
    }

    let missing_dates = rows.iter().filter(|r| r.achieved_at.is_none()).count();
    if missing_dates > 0 {
        warn!(missing_dates, "gaps snapshot rows with unreadable achieved_at");
    }
    info!(rows = rows.len(), "loaded latest-gaps snapshot");
    Ok(rows)
}

pub fn read_percentiles<R: Read>(reader: R) -> Result<PercentileMap, SnapshotError> {
    let table = Table::from_reader(reader)?;
    let name_col =
        table
            .column_index("leaderboard_name")
            .ok_or(SnapshotError::MissingColumn {
                source_name: "percentiles",
                column: "leaderboard_name",
            })?;
    let count_col = table.column_index("entry_count");

    let tier_cols: Vec<(usize, u32)> = table
        .columns()
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| percentile_of(name).map(|pct| (idx, pct)))
        .collect();
    debug!(tiers = tier_cols.len(), "percentile columns detected");

    let mut map = PercentileMap::new();
    for row in 0..table.len() {
        let Some(name) = table.cell(row, name_col) else {
            continue;
        };
        let tiers = tier_cols
            .iter()
            .map(|(idx, pct)| (*pct, table.number(row, *idx)))
            .collect();
        let entry_count = count_col
            .and_then(|col| table.number(row, col))
            .filter(|v| *v >= 0.0)
            .map(|v| v as u64);

        map.insert(
            name.to_string(),
            PercentileSummary {
                leaderboard_name: name.to_string(),
                tiers,
                entry_count,
            },
        );
    }

    info!(categories = map.len(), "loaded percentiles snapshot");
    Ok(map)
}

/// `p50_ms` → `Some(50)`.
fn percentile_of(column: &str) -> Option<u32> {
    column
        .strip_prefix('p')
        .and_then(|rest| rest.strip_suffix("_ms"))
        .and_then(|digits| digits.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn gaps_tolerate_blank_and_float_cells() {
        let csv = "leaderboard_name,rank,steam_name,duration_ms,gap_prev_ms,gap_leader_ms,achieved_at\n\
                   Hay,1,alice,59000,,,2025-10-01 12:00:00+00:00\n\
                   Hay,2,bob,60500.0,1500.0,1500.0,not-a-date\n";
        let rows = read_gaps_latest(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].gap_prev_ms, None);
        assert_eq!(rows[0].achieved_at, Some(datetime!(2025-10-01 12:00 UTC)));
        assert_eq!(rows[1].duration_ms, Some(60_500.0));
        assert_eq!(rows[1].achieved_at, None);
    }

    #[test]
    fn percentiles_keep_column_order() {
        let csv = "leaderboard_name,p1_ms,p10_ms,p50_ms,entry_count\n\
                   Hay,50000,65000,90000,1234\n\
                   Wood,,70000,NaN,\n";
        let map = read_percentiles(csv.as_bytes()).unwrap();
        let hay = &map["Hay"];
        assert_eq!(
            hay.tiers,
            vec![(1, Some(50_000.0)), (10, Some(65_000.0)), (50, Some(90_000.0))]
        );
        assert_eq!(hay.entry_count, Some(1234));

        let wood = &map["Wood"];
        assert_eq!(wood.tiers[0], (1, None));
        assert_eq!(wood.entry_count, None);
    }

    #[test]
    fn percentiles_require_category_column() {
        let err = read_percentiles("p1_ms\n1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, SnapshotError::MissingColumn { .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = open_source(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }
}
