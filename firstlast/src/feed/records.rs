//! Flat records for each feed file.
//!
//! Columns are matched by header name, so column order in the file doesn't
//! matter and unknown columns are ignored. The first row of every file is
//! the header; it is never returned as data.

use std::io::Read;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::{DepartureTime, ServiceId, StopId, TripId};

/// A row of `stops.txt`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StopRecord {
    pub stop_id: StopId,
    pub stop_name: String,
    #[serde(default)]
    pub stop_lat: Option<f64>,
    #[serde(default)]
    pub stop_lon: Option<f64>,
}

/// A row of `trips.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TripRecord {
    pub route_id: String,
    pub service_id: ServiceId,
    pub trip_id: TripId,
    /// Kept verbatim; an empty headsign is a value like any other.
    #[serde(default)]
    pub trip_headsign: String,
}

/// A row of `stop_times.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StopTimeRecord {
    pub trip_id: TripId,
    #[serde(default)]
    pub arrival_time: Option<String>,
    #[serde(default)]
    pub departure_time: Option<DepartureTime>,
    pub stop_id: StopId,
    pub stop_sequence: u32,
    /// Empty in the file means "use the trip's headsign".
    #[serde(default)]
    pub stop_headsign: Option<String>,
}

/// A row of `routes.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteRecord {
    pub route_id: String,
    #[serde(default)]
    pub route_short_name: Option<String>,
    #[serde(default)]
    pub route_long_name: Option<String>,
    #[serde(default)]
    pub route_type: Option<i64>,
}

/// Read every data row of a header-led CSV stream.
pub fn read_records<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, csv::Error> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader)
        .deserialize()
        .collect()
}
