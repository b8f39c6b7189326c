//! Run configuration: where the feed lives and how to report on it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::report::OrderingStrategy;

/// Environment variable naming the directory that holds the feed files.
pub const DATA_ROOT_VAR: &str = "BART_DATA_ROOT";

pub const STOPS_FILE: &str = "stops.txt";
pub const TRIPS_FILE: &str = "trips.txt";
pub const STOP_TIMES_FILE: &str = "stop_times.txt";
pub const ROUTES_FILE: &str = "routes.txt";

/// Default SQLite file name, created inside the feed directory.
pub const STORE_FILE: &str = "bartdb.db";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Neither `--feed-dir` nor the environment named a feed directory.
    #[error("no feed directory: pass --feed-dir or set BART_DATA_ROOT")]
    MissingDataRoot,
}

/// Directory containing `stops.txt`, `trips.txt`, `stop_times.txt` and `routes.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDir {
    root: PathBuf,
}

impl FeedDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Pick the feed directory: an explicit path wins over the environment.
    ///
    /// `env_value` is the raw value of [`DATA_ROOT_VAR`], passed in so
    /// callers (and tests) control where it comes from.
    pub fn resolve(
        explicit: Option<PathBuf>,
        env_value: Option<OsString>,
    ) -> Result<Self, ConfigError> {
        explicit
            .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
            .map(Self::new)
            .ok_or(ConfigError::MissingDataRoot)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a feed file: `{root}/{file_name}`.
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    pub fn store_path(&self) -> PathBuf {
        self.path(STORE_FILE)
    }
}

/// Options for a first/last report run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Station name substring to report on. `None` reports the whole system.
    pub station: Option<String>,

    /// Verify every feed headsign has a mapping before reporting.
    pub check_headsigns: bool,

    /// What the table does with services or destinations it has no slot for.
    pub ordering: OrderingStrategy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            station: Some("19th".to_string()),
            check_headsigns: true,
            ordering: OrderingStrategy::Lenient,
        }
    }
}
