//! SQLite copy of the feed.
//!
//! A derived, rebuildable store: every `load_*` drops its table and
//! recreates it from records. The first-departure query gives the same
//! answer as the in-memory pipeline's first times, grouped by route as well.

mod error;

use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, params, params_from_iter};
use tracing::{debug, info};

use crate::config::{FeedDir, ROUTES_FILE, STOP_TIMES_FILE, STOPS_FILE, TRIPS_FILE};
use crate::domain::{DepartureTime, ServiceId, StopId};
use crate::feed::{RouteRecord, StopRecord, StopTimeRecord, TripRecord, load_file};

pub use error::StoreError;

/// Tables the store creates. Only these can be sampled.
pub const TABLES: [&str; 4] = ["stops", "trips", "stop_times", "routes"];

/// Earliest departure for one (service, headsign, route) group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstDeparture {
    pub departure_time: DepartureTime,
    pub service_id: ServiceId,
    /// Stop headsign, or trip headsign when the stop has none.
    pub headsign: String,
    pub route_short_name: Option<String>,
}

/// A stop time joined with its stop, trip and route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedStopTime {
    pub stop_name: String,
    pub service_id: ServiceId,
    pub departure_time: Option<DepartureTime>,
    pub headsign: String,
    pub route_short_name: Option<String>,
}

/// Raw rows from one table, every value rendered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSample {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Row counts after [`FeedStore::load_feed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub stops: usize,
    pub trips: usize,
    pub stop_times: usize,
    pub routes: usize,
}

/// Handle on the SQLite file. Holds at most one connection.
#[derive(Debug)]
pub struct FeedStore {
    path: PathBuf,
    conn: Option<Connection>,
}

impl FeedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            conn: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Open the database file, creating it if needed.
    pub fn connect(&mut self) -> Result<(), StoreError> {
        if self.conn.is_some() {
            return Err(StoreError::AlreadyConnected);
        }
        self.conn = Some(Connection::open(&self.path)?);
        debug!(path = %self.path.display(), "Connected to store");
        Ok(())
    }

    /// Close the connection. Does nothing when not connected.
    pub fn disconnect(&mut self) -> Result<(), StoreError> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| e)?;
            debug!(path = %self.path.display(), "Disconnected from store");
        }
        Ok(())
    }

    fn conn(&self) -> Result<&Connection, StoreError> {
        self.conn.as_ref().ok_or(StoreError::NotConnected)
    }

    fn conn_mut(&mut self) -> Result<&mut Connection, StoreError> {
        self.conn.as_mut().ok_or(StoreError::NotConnected)
    }

    /// Read every feed file in `dir` and load all four tables.
    pub fn load_feed(&mut self, dir: &FeedDir) -> Result<LoadSummary, StoreError> {
        let stops: Vec<StopRecord> = load_file(&dir.path(STOPS_FILE))?;
        let trips: Vec<TripRecord> = load_file(&dir.path(TRIPS_FILE))?;
        let stop_times: Vec<StopTimeRecord> = load_file(&dir.path(STOP_TIMES_FILE))?;
        let routes: Vec<RouteRecord> = load_file(&dir.path(ROUTES_FILE))?;

        Ok(LoadSummary {
            stops: self.load_stops(&stops)?,
            trips: self.load_trips(&trips)?,
            stop_times: self.load_stop_times(&stop_times)?,
            routes: self.load_routes(&routes)?,
        })
    }

    pub fn load_stops(&mut self, stops: &[StopRecord]) -> Result<usize, StoreError> {
        let tx = self.conn_mut()?.transaction()?;
        tx.execute_batch(
            "DROP TABLE IF EXISTS stops;
             CREATE TABLE stops (
                 stop_id TEXT PRIMARY KEY,
                 stop_name TEXT,
                 stop_lat REAL,
                 stop_lon REAL
             );",
        )?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO stops (stop_id, stop_name, stop_lat, stop_lon) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for stop in stops {
                insert.execute(params![
                    stop.stop_id.as_str(),
                    stop.stop_name,
                    stop.stop_lat,
                    stop.stop_lon
                ])?;
            }
        }
        tx.commit()?;
        info!(table = "stops", rows = stops.len(), "Loaded table");
        Ok(stops.len())
    }

    pub fn load_trips(&mut self, trips: &[TripRecord]) -> Result<usize, StoreError> {
        let tx = self.conn_mut()?.transaction()?;
        tx.execute_batch(
            "DROP TABLE IF EXISTS trips;
             CREATE TABLE trips (
                 trip_id TEXT PRIMARY KEY,
                 service_id TEXT,
                 route_id TEXT,
                 trip_headsign TEXT
             );",
        )?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO trips (trip_id, service_id, route_id, trip_headsign) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for trip in trips {
                insert.execute(params![
                    trip.trip_id.as_str(),
                    trip.service_id.as_str(),
                    trip.route_id,
                    trip.trip_headsign
                ])?;
            }
        }
        tx.commit()?;
        info!(table = "trips", rows = trips.len(), "Loaded table");
        Ok(trips.len())
    }

    /// Load stop times. An empty stop headsign is stored as NULL so the
    /// queries can fall back to the trip headsign with `COALESCE`.
    pub fn load_stop_times(&mut self, stop_times: &[StopTimeRecord]) -> Result<usize, StoreError> {
        let tx = self.conn_mut()?.transaction()?;
        tx.execute_batch(
            "DROP TABLE IF EXISTS stop_times;
             CREATE TABLE stop_times (
                 trip_id TEXT,
                 arrival_time TEXT,
                 departure_time TEXT,
                 stop_id TEXT,
                 stop_sequence INTEGER,
                 stop_headsign TEXT,
                 PRIMARY KEY (trip_id, stop_sequence)
             );",
        )?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO stop_times \
                 (trip_id, arrival_time, departure_time, stop_id, stop_sequence, stop_headsign) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for st in stop_times {
                let headsign = st.stop_headsign.as_deref().filter(|h| !h.is_empty());
                insert.execute(params![
                    st.trip_id.as_str(),
                    st.arrival_time,
                    st.departure_time.as_ref().map(DepartureTime::as_str),
                    st.stop_id.as_str(),
                    st.stop_sequence,
                    headsign
                ])?;
            }
        }
        tx.commit()?;
        info!(table = "stop_times", rows = stop_times.len(), "Loaded table");
        Ok(stop_times.len())
    }

    pub fn load_routes(&mut self, routes: &[RouteRecord]) -> Result<usize, StoreError> {
        let tx = self.conn_mut()?.transaction()?;
        tx.execute_batch(
            "DROP TABLE IF EXISTS routes;
             CREATE TABLE routes (
                 route_id TEXT PRIMARY KEY,
                 route_short_name TEXT,
                 route_long_name TEXT,
                 route_type INTEGER
             );",
        )?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO routes (route_id, route_short_name, route_long_name, route_type) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for route in routes {
                insert.execute(params![
                    route.route_id,
                    route.route_short_name,
                    route.route_long_name,
                    route.route_type
                ])?;
            }
        }
        tx.commit()?;
        info!(table = "routes", rows = routes.len(), "Loaded table");
        Ok(routes.len())
    }

    /// The first `limit` rows of a feed table.
    pub fn sample_rows(&self, table: &str, limit: usize) -> Result<TableSample, StoreError> {
        // Table names can't be bound as parameters, so only known names get
        // spliced into the query.
        let Some(table) = TABLES.iter().find(|t| **t == table) else {
            return Err(StoreError::UnknownTable(table.to_string()));
        };
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT * FROM {table} LIMIT ?1"))?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_string).collect();
        let width = columns.len();

        let rows = stmt
            .query_map([limit as i64], |row| {
                (0..width)
                    .map(|i| row.get_ref(i).map(value_text))
                    .collect::<Result<Vec<String>, _>>()
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TableSample { columns, rows })
    }

    /// Stop times joined with stops, trips and routes, in storage order.
    pub fn joined_stop_times(&self, limit: usize) -> Result<Vec<JoinedStopTime>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT stop_name, service_id, departure_time,
                    COALESCE(stop_headsign, trip_headsign) AS headsign, route_short_name
             FROM trips
             JOIN stop_times ON trips.trip_id = stop_times.trip_id
             JOIN stops ON stop_times.stop_id = stops.stop_id
             JOIN routes ON trips.route_id = routes.route_id
             LIMIT ?1",
        )?;
        let rows = stmt
            .query_map([limit as i64], |row| {
                Ok(JoinedStopTime {
                    stop_name: row.get(0)?,
                    service_id: ServiceId::new(row.get::<_, String>(1)?),
                    departure_time: row.get::<_, Option<String>>(2)?.map(DepartureTime::new),
                    headsign: row.get(3)?,
                    route_short_name: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Earliest non-null departure at any of `stop_ids`, per service,
    /// effective headsign and route, ordered by service then time.
    ///
    /// An empty `stop_ids` gives an empty result without touching the database.
    pub fn first_departures(&self, stop_ids: &[StopId]) -> Result<Vec<FirstDeparture>, StoreError> {
        let conn = self.conn()?;
        if stop_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; stop_ids.len()].join(", ");
        let sql = format!(
            "SELECT MIN(departure_time) AS first_departure, service_id,
                    COALESCE(stop_headsign, trip_headsign) AS headsign, route_short_name
             FROM stop_times
             JOIN stops ON stop_times.stop_id = stops.stop_id
             JOIN trips ON stop_times.trip_id = trips.trip_id
             JOIN routes ON trips.route_id = routes.route_id
             WHERE stops.stop_id IN ({placeholders}) AND departure_time IS NOT NULL
             GROUP BY service_id, headsign, route_short_name
             ORDER BY service_id, first_departure"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(stop_ids.iter().map(StopId::as_str)), |row| {
                Ok(FirstDeparture {
                    departure_time: DepartureTime::new(row.get::<_, String>(0)?),
                    service_id: ServiceId::new(row.get::<_, String>(1)?),
                    headsign: row.get(2)?,
                    route_short_name: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(stops = stop_ids.len(), groups = rows.len(), "First departures query");
        Ok(rows)
    }
}

fn value_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Blob(bytes) => format!("<{} bytes>", bytes.len()),
    }
}
