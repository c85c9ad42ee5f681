mod podium;
pub use podium::Podium;

mod percentiles;
pub use percentiles::PercentileCards;

mod table;
pub use table::{LastUpdated, LeaderboardTable};

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use dioxus::prelude::*;
use once_cell::sync::Lazy;
use time::OffsetDateTime;
use tracing::warn;

use crate::core::cache::TtlCache;
use crate::core::config::DashboardConfig;
use crate::core::snapshot::{
    self, GapRow, PercentileMap, PercentileSummary, SnapshotError,
};
use crate::core::table::Table;
use crate::history::time_axis::find_time_column;
use crate::history::LEADERBOARD_COLUMN;

/// Rows shown per category on the overview page.
pub const OVERVIEW_TOP_N: u32 = 10;
/// Rows shown on a category page.
pub const CATEGORY_TOP_N: u32 = 100;
pub const PODIUM_SIZE: u32 = 3;

type Cache<V> = Lazy<Mutex<TtlCache<PathBuf, V>>>;

static OVER_TIME: Cache<Table> = Lazy::new(|| Mutex::new(TtlCache::new(Default::default())));
static GAPS_LATEST: Cache<Vec<GapRow>> =
    Lazy::new(|| Mutex::new(TtlCache::new(Default::default())));
static PERCENTILES: Cache<PercentileMap> =
    Lazy::new(|| Mutex::new(TtlCache::new(Default::default())));

/// Poisoning only means an earlier load panicked; the map is still usable.
fn lock<V>(cache: &'static Cache<V>) -> MutexGuard<'static, TtlCache<PathBuf, V>> {
    cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn cached<V, F>(
    cache: &'static Cache<V>,
    path: &Path,
    config: &DashboardConfig,
    read: F,
) -> Result<Arc<V>, SnapshotError>
where
    F: FnOnce(File) -> Result<V, SnapshotError>,
{
    let mut guard = lock(cache);
    if guard.ttl() != config.cache_ttl() {
        guard.set_ttl(config.cache_ttl());
    }
    guard.get_or_load(&path.to_path_buf(), Instant::now(), || {
        read(snapshot::open_source(path)?)
    })
}

/// Shared counter that pages read so a manual refresh re-renders them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshToken(pub Signal<u32>);

impl RefreshToken {
    pub fn bump(&mut self) {
        let next = (self.0)().wrapping_add(1);
        self.0.set(next);
    }

    /// Subscribe the calling component to refreshes.
    pub fn track(&self) -> u32 {
        (self.0)()
    }
}

/// Drop every cached snapshot so the next render reads from disk.
pub fn refresh() {
    lock(&OVER_TIME).clear();
    lock(&GAPS_LATEST).clear();
    lock(&PERCENTILES).clear();
}

/// The three snapshots behind every dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub over_time: Arc<Table>,
    pub gaps_latest: Arc<Vec<GapRow>>,
    pub percentiles: Arc<PercentileMap>,
}

/// Same snapshots means same allocation; cache hits hand out the same `Arc`s.
impl PartialEq for DashboardData {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.over_time, &other.over_time)
            && Arc::ptr_eq(&self.gaps_latest, &other.gaps_latest)
            && Arc::ptr_eq(&self.percentiles, &other.percentiles)
    }
}

/// Loaded snapshots, or the first load error to show in their place.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub data: Option<DashboardData>,
    pub error: Option<String>,
}

impl DashboardState {
    pub fn load(config: &DashboardConfig) -> Self {
        match load_data(config) {
            Ok(data) => Self {
                data: Some(data),
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "dashboard snapshots unavailable");
                Self {
                    data: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}

fn load_data(config: &DashboardConfig) -> Result<DashboardData, SnapshotError> {
    let sources = &config.sources;
    Ok(DashboardData {
        over_time: cached(&OVER_TIME, &sources.over_time, config, snapshot::read_over_time)?,
        gaps_latest: cached(
            &GAPS_LATEST,
            &sources.gaps_latest,
            config,
            snapshot::read_gaps_latest,
        )?,
        percentiles: cached(
            &PERCENTILES,
            &sources.percentiles,
            config,
            snapshot::read_percentiles,
        )?,
    })
}

impl DashboardData {
    /// Entries of `leaderboard` ranked `1..=top_n`, best first.
    pub fn top_n(&self, leaderboard: &str, top_n: u32) -> Vec<GapRow> {
        top_n_rows(&self.gaps_latest, leaderboard, top_n)
    }

    pub fn percentiles_for(&self, leaderboard: &str) -> Option<&PercentileSummary> {
        self.percentiles.get(leaderboard)
    }

    pub fn last_updated(&self, leaderboard: &str) -> Option<OffsetDateTime> {
        last_updated(&self.over_time, leaderboard)
    }
}

pub fn top_n_rows(rows: &[GapRow], leaderboard: &str, top_n: u32) -> Vec<GapRow> {
    let mut selected: Vec<GapRow> = rows
        .iter()
        .filter(|row| row.leaderboard_name == leaderboard && row.rank <= top_n)
        .cloned()
        .collect();
    selected.sort_by_key(|row| row.rank);
    selected
}

/// Latest measurement time recorded for a category.
pub fn last_updated(over_time: &Table, leaderboard: &str) -> Option<OffsetDateTime> {
    let category = over_time.rows_matching(LEADERBOARD_COLUMN, leaderboard);
    let column = category.column_index(find_time_column(&category)?)?;
    category.timestamps(column).into_iter().flatten().max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn gap(leaderboard: &str, rank: u32) -> GapRow {
        GapRow {
            leaderboard_name: leaderboard.to_string(),
            rank,
            steam_name: format!("player{rank}"),
            duration_ms: Some(1_000.0 * rank as f64),
            gap_prev_ms: None,
            gap_leader_ms: None,
            achieved_at: None,
        }
    }

    #[test]
    fn top_n_filters_category_and_sorts_by_rank() {
        let rows = vec![gap("Hay", 3), gap("Wood", 1), gap("Hay", 1), gap("Hay", 11), gap("Hay", 2)];
        let top: Vec<u32> = top_n_rows(&rows, "Hay", 10).iter().map(|r| r.rank).collect();
        assert_eq!(top, [1, 2, 3]);
        assert_eq!(top_n_rows(&rows, "Hay", PODIUM_SIZE).len(), 3);
        assert!(top_n_rows(&rows, "Maze", 10).is_empty());
    }

    #[test]
    fn last_updated_is_latest_parseable_time() {
        let table = Table::from_reader(
            "leaderboard_name,time,top1_ms\n\
             Hay,2025-10-01 12:00,1\n\
             Hay,2025-10-02 08:30,1\n\
             Hay,garbage,1\n\
             Wood,2025-10-05 00:00,1\n"
                .as_bytes(),
        )
        .unwrap();
        assert_eq!(
            last_updated(&table, "Hay"),
            Some(datetime!(2025-10-02 08:30 UTC))
        );
        assert_eq!(last_updated(&table, "Maze"), None);
    }

    #[test]
    fn missing_sources_surface_as_errors() {
        let mut config = DashboardConfig::default();
        config.sources.over_time = PathBuf::from("/nonexistent/tfwr/over_time_ms.csv");
        let state = DashboardState::load(&config);
        assert!(state.data.is_none());
        assert!(state
            .error
            .as_deref()
            .is_some_and(|msg| msg.contains("over_time_ms.csv")));
    }
}
