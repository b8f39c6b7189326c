//! Static feed loading.
//!
//! Reads the GTFS-style CSV files from a [`FeedDir`] into flat records.
//! Each file is opened, read to the end and closed before the next one.

mod error;
mod records;

use std::fs::File;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config::{FeedDir, ROUTES_FILE, STOP_TIMES_FILE, STOPS_FILE, TRIPS_FILE};

pub use error::FeedError;
pub use records::{RouteRecord, StopRecord, StopTimeRecord, TripRecord, read_records};

/// The feed files the first/last report needs, fully loaded.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    pub stops: Vec<StopRecord>,
    pub trips: Vec<TripRecord>,
    pub stop_times: Vec<StopTimeRecord>,
}

impl Feed {
    /// Load stops, trips and stop times from a feed directory.
    pub fn load(dir: &FeedDir) -> Result<Self, FeedError> {
        let stops: Vec<StopRecord> = load_file(&dir.path(STOPS_FILE))?;
        let trips: Vec<TripRecord> = load_file(&dir.path(TRIPS_FILE))?;
        let stop_times: Vec<StopTimeRecord> = load_file(&dir.path(STOP_TIMES_FILE))?;

        let unpadded = stop_times
            .iter()
            .filter_map(|st| st.departure_time.as_ref())
            .filter(|t| !t.is_zero_padded())
            .count();
        if unpadded > 0 {
            warn!(
                count = unpadded,
                "Departure times not in HH:MM:SS form; first/last ordering may be wrong"
            );
        }

        info!(
            stops = stops.len(),
            trips = trips.len(),
            stop_times = stop_times.len(),
            root = %dir.root().display(),
            "Loaded feed"
        );

        Ok(Self {
            stops,
            trips,
            stop_times,
        })
    }
}

/// Load `routes.txt`. Only the relational store needs routes.
pub fn load_routes(dir: &FeedDir) -> Result<Vec<RouteRecord>, FeedError> {
    load_file(&dir.path(ROUTES_FILE))
}

/// Open and fully read one feed file.
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, FeedError> {
    let file = File::open(path).map_err(|source| FeedError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(file).map_err(|source| FeedError::Csv {
        path: path.to_path_buf(),
        source,
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DepartureTime, StopId};

    #[test]
    fn load_reads_all_files() {
        let dir = tempfile::tempdir().unwrap();
        testing::write_feed(dir.path());

        let feed = Feed::load(&FeedDir::new(dir.path())).unwrap();
        assert_eq!(feed.stops.len(), 3);
        assert_eq!(feed.trips.len(), 2);
        assert_eq!(feed.stop_times.len(), 3);
        assert_eq!(feed.stop_times[1].stop_id, StopId::new("K30-2"));
        assert_eq!(
            feed.stop_times[1].departure_time,
            Some(DepartureTime::new("23:40:00"))
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Feed::load(&FeedDir::new(dir.path())).unwrap_err();
        match err {
            FeedError::Open { path, source } => {
                assert!(path.ends_with("stops.txt"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected open error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_row_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        testing::write_feed(dir.path());
        std::fs::write(
            dir.path().join("stop_times.txt"),
            "trip_id,departure_time,stop_id,stop_sequence\n1001,05:10:00,K30-1,first\n",
        )
        .unwrap();

        let err = Feed::load(&FeedDir::new(dir.path())).unwrap_err();
        assert!(matches!(err, FeedError::Csv { ref path, .. } if path.ends_with("stop_times.txt")));
    }

    #[test]
    fn routes_load_separately() {
        let dir = tempfile::tempdir().unwrap();
        testing::write_feed(dir.path());
        let routes = load_routes(&FeedDir::new(dir.path())).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[1].route_short_name.as_deref(), Some("Red-N"));
    }
}
