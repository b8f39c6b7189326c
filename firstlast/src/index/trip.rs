//! Trip id → service and headsign lookup.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{ServiceId, TripId};
use crate::feed::TripRecord;

/// The trip-level facts stop times fall back on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripInfo {
    pub service_id: ServiceId,
    pub trip_headsign: String,
}

/// Map from trip id to its service calendar and headsign.
#[derive(Debug, Clone, Default)]
pub struct TripIndex {
    trips: HashMap<TripId, TripInfo>,
}

impl TripIndex {
    /// Build the index. A repeated `trip_id` replaces the earlier row.
    pub fn build(trips: &[TripRecord]) -> Self {
        let mut map = HashMap::with_capacity(trips.len());
        for trip in trips {
            let info = TripInfo {
                service_id: trip.service_id.clone(),
                trip_headsign: trip.trip_headsign.clone(),
            };
            if map.insert(trip.trip_id.clone(), info).is_some() {
                debug!(trip_id = %trip.trip_id, "Duplicate trip row, keeping the later one");
            }
        }
        Self { trips: map }
    }

    pub fn get(&self, trip_id: &TripId) -> Option<&TripInfo> {
        self.trips.get(trip_id)
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(trip_id: &str, service_id: &str, headsign: &str) -> TripRecord {
        TripRecord {
            route_id: "1".to_string(),
            service_id: ServiceId::new(service_id),
            trip_id: TripId::new(trip_id),
            trip_headsign: headsign.to_string(),
        }
    }

    #[test]
    fn one_entry_per_trip() {
        let index = TripIndex::build(&[
            trip("1001", "WKDY", "Antioch"),
            trip("1002", "SAT", "Richmond"),
        ]);
        assert_eq!(index.len(), 2);
        let info = index.get(&TripId::new("1002")).unwrap();
        assert_eq!(info.service_id, ServiceId::new("SAT"));
        assert_eq!(info.trip_headsign, "Richmond");
    }

    #[test]
    fn later_duplicate_wins() {
        let index = TripIndex::build(&[
            trip("1001", "WKDY", "Antioch"),
            trip("1001", "SUN", "Pittsburg / Bay Point"),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.get(&TripId::new("1001")),
            Some(&TripInfo {
                service_id: ServiceId::new("SUN"),
                trip_headsign: "Pittsburg / Bay Point".to_string(),
            })
        );
    }

    #[test]
    fn unknown_trip_is_none() {
        let index = TripIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.get(&TripId::new("404")), None);
    }
}
