//! Leaderboard history: from the wide over-time table to a renderable chart.
//!
//! The pipeline is category filter → time axis → window → melt → series
//! filter → assemble. Every "nothing to show" condition is reported as a
//! [`ChartNotice`] rather than an error so the page can render a placeholder.

pub mod chart;
pub mod geometry;
pub mod labels;
pub mod reshape;
pub mod time_axis;
pub mod view;

use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::core::catalog::leaderboard_color;
use crate::core::table::Table;

pub use chart::{ChartPoint, ChartSeries, HistoryChart, TooltipRow};
pub use view::HistoryChartView;

use labels::TOP_100;
use time_axis::{find_time_column, TimedRows};

pub const LEADERBOARD_COLUMN: &str = "leaderboard_name";

/// Why no chart could be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartNotice {
    NoLeaderboardColumn,
    NoDataForCategory,
    NoTimeColumn,
    NoValidTimestamps,
    EmptyWindow,
    NoDurationColumns,
    NothingAfterFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    Ready(HistoryChart),
    Placeholder(ChartNotice),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryOptions {
    pub hide_top_100: bool,
    pub window: Duration,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            hide_top_100: true,
            window: Duration::days(14),
        }
    }
}

/// Build the history chart for one category of the over-time table.
pub fn build_history_chart(
    table: &Table,
    leaderboard: &str,
    options: &HistoryOptions,
    now: OffsetDateTime,
) -> ChartOutcome {
    if !table.has_column(LEADERBOARD_COLUMN) {
        debug!("over-time table has no leaderboard column");
        return ChartOutcome::Placeholder(ChartNotice::NoLeaderboardColumn);
    }

    let category = table.rows_matching(LEADERBOARD_COLUMN, leaderboard);
    if category.is_empty() {
        debug!(leaderboard, "no history rows for category");
        return ChartOutcome::Placeholder(ChartNotice::NoDataForCategory);
    }

    let Some(time_column) = find_time_column(&category) else {
        debug!(leaderboard, "no usable time column");
        return ChartOutcome::Placeholder(ChartNotice::NoTimeColumn);
    };

    let timed = TimedRows::parse(&category, time_column);
    if timed.is_empty() {
        return ChartOutcome::Placeholder(ChartNotice::NoValidTimestamps);
    }
    let dropped = category.len() - timed.times.len();
    if dropped > 0 {
        debug!(leaderboard, dropped, "dropped rows with unreadable timestamps");
    }

    let windowed = timed.within_window(options.window);
    if windowed.is_empty() {
        return ChartOutcome::Placeholder(ChartNotice::EmptyWindow);
    }

    let Some(mut long) = reshape::melt(&windowed) else {
        debug!(leaderboard, "no duration columns to plot");
        return ChartOutcome::Placeholder(ChartNotice::NoDurationColumns);
    };

    if options.hide_top_100 {
        long = long.without_series(TOP_100);
    }
    if long.is_empty() {
        return ChartOutcome::Placeholder(ChartNotice::NothingAfterFilter);
    }

    let chart = chart::assemble(&long, time_column, leaderboard_color(leaderboard), now);
    debug!(
        leaderboard,
        time_column,
        series = chart.series.len(),
        points = chart.point_count(),
        y_max = chart.y_domain.1,
        "history chart assembled"
    );
    ChartOutcome::Ready(chart)
}
