//! Dashboard configuration.
//!
//! Looked up in order: the file named by `TFWR_DASHBOARD_CONFIG`,
//! `tfwr-dashboard.toml` beside the executable, then the platform config
//! directory. With no file present the defaults below are used.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

pub const CONFIG_ENV_VAR: &str = "TFWR_DASHBOARD_CONFIG";
pub const CONFIG_FILE_NAME: &str = "tfwr-dashboard.toml";

/// Longest accepted history window, in days.
pub const MAX_HISTORY_WINDOW_DAYS: i64 = 3_650;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config {path}: history_window_days must be within 0..={max}, got {value}")]
    HistoryWindow { path: PathBuf, value: i64, max: i64 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnapshotSources {
    pub over_time: PathBuf,
    pub gaps_latest: PathBuf,
    pub percentiles: PathBuf,
}

impl Default for SnapshotSources {
    fn default() -> Self {
        Self {
            over_time: PathBuf::from("data/over_time_ms.csv"),
            gaps_latest: PathBuf::from("data/gaps_latest_ms.csv"),
            percentiles: PathBuf::from("data/percentiles.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub sources: SnapshotSources,
    pub cache_ttl_secs: u64,
    pub history_window_days: i64,
    pub hide_top_100: bool,
    pub log: LogConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sources: SnapshotSources::default(),
            cache_ttl_secs: 300,
            history_window_days: 14,
            hide_top_100: true,
            log: LogConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn history_window(&self) -> time::Duration {
        time::Duration::days(self.history_window_days.clamp(0, MAX_HISTORY_WINDOW_DAYS))
    }

    /// Parse TOML text; relative source paths resolve against `base_dir`.
    pub fn from_toml_str(
        raw: &str,
        origin: &Path,
        base_dir: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut cfg: DashboardConfig = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        if !(0..=MAX_HISTORY_WINDOW_DAYS).contains(&cfg.history_window_days) {
            return Err(ConfigError::HistoryWindow {
                path: origin.to_path_buf(),
                value: cfg.history_window_days,
                max: MAX_HISTORY_WINDOW_DAYS,
            });
        }
        cfg.sources.over_time = resolve_path(&cfg.sources.over_time, base_dir);
        cfg.sources.gaps_latest = resolve_path(&cfg.sources.gaps_latest, base_dir);
        cfg.sources.percentiles = resolve_path(&cfg.sources.percentiles, base_dir);
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw, path, path.parent())
    }
}

/// Find and load the config, falling back to defaults when no file exists.
pub fn load_config() -> Result<DashboardConfig, ConfigError> {
    match locate_config() {
        Some(path) => {
            info!(path = %path.display(), "loading dashboard config");
            DashboardConfig::from_file(&path)
        }
        None => {
            info!("no dashboard config found; using defaults");
            Ok(DashboardConfig::default())
        }
    }
}

fn locate_config() -> Option<PathBuf> {
    if let Ok(explicit) = env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(explicit));
    }

    let beside_exe = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)));

    let platform_dir = directories::ProjectDirs::from("com", "TFWR", "Leaderboards")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME));

    [beside_exe, platform_dir]
        .into_iter()
        .flatten()
        .find(|candidate| candidate.is_file())
}

fn resolve_path(path: &Path, base_dir: Option<&Path>) -> PathBuf {
    let expanded = expand_tilde(path);
    match base_dir {
        Some(base) if expanded.is_relative() => base.join(expanded),
        _ => expanded,
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) else {
        return path.to_path_buf();
    };
    match env::var("HOME") {
        Ok(home) => Path::new(&home).join(rest),
        Err(_) => path.to_path_buf(),
    }
}
