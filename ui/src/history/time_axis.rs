//! Time axis resolution and the trailing history window.

use time::{Duration, OffsetDateTime};

use crate::core::table::Table;

/// Column names upstream exports have used for the measurement time, in
/// order of preference.
pub const TIME_COLUMN_CANDIDATES: &[&str] = &[
    "minute_ts",
    "fetched_at",
    "timestamp",
    "time",
    "datetime",
    "date",
];

/// First candidate column that exists and parses for at least one row.
pub fn find_time_column(table: &Table) -> Option<&'static str> {
    TIME_COLUMN_CANDIDATES.iter().copied().find(|name| {
        table
            .column_index(name)
            .is_some_and(|idx| table.timestamps(idx).iter().any(Option::is_some))
    })
}

/// Rows of a category table paired with their parsed time.
#[derive(Debug, Clone)]
pub struct TimedRows {
    pub table: Table,
    pub times: Vec<OffsetDateTime>,
}

impl TimedRows {
    /// Drop rows whose time cell doesn't parse.
    pub fn parse(table: &Table, time_column: &str) -> Self {
        let Some(idx) = table.column_index(time_column) else {
            return Self {
                table: table.filter_rows(|_| false),
                times: Vec::new(),
            };
        };
        let stamps = table.timestamps(idx);
        let kept = table.filter_rows(|row| stamps[row].is_some());
        let times = stamps.into_iter().flatten().collect();
        Self { table: kept, times }
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn latest(&self) -> Option<OffsetDateTime> {
        self.times.iter().copied().max()
    }

    /// Keep rows no older than `window` before the latest time present. A
    /// window reaching past the representable range keeps every row.
    pub fn within_window(&self, window: Duration) -> Self {
        let Some(cutoff) = self.latest().and_then(|latest| latest.checked_sub(window)) else {
            return self.clone();
        };
        let table = self.table.filter_rows(|row| self.times[row] >= cutoff);
        let times = self.times.iter().copied().filter(|t| *t >= cutoff).collect();
        Self { table, times }
    }
}
