//! Feed to first/last map, end to end.

use std::collections::BTreeMap;

use tracing::info;

use crate::aggregate::{CanonicalLabel, FirstLastTimes, aggregate, canonical_map};
use crate::feed::Feed;
use crate::filter::{FilterError, filter_stop_times};
use crate::headsign::MappingTable;
use crate::index::{StationIndex, TripIndex};

/// First and last departure per canonical label at `station`, or across the
/// whole system when `station` is `None`.
///
/// `station` is a substring of the stop name, and doubles as the context for
/// headsigns shared by two branches.
pub fn first_last_map(
    feed: &Feed,
    table: &MappingTable,
    station: Option<&str>,
) -> Result<BTreeMap<CanonicalLabel, FirstLastTimes>, FilterError> {
    let trips = TripIndex::build(&feed.trips);
    let targets = station.map(|name| StationIndex::new(&feed.stops).lookup(name));
    if let (Some(name), Some(stops)) = (station, &targets) {
        info!(station = name, stops = stops.len(), "Matched station");
    }

    let resolved = filter_stop_times(&feed.stop_times, targets.as_ref(), &trips)?;
    let groups = aggregate(&resolved);
    let labelled = canonical_map(&groups, table, station);

    info!(
        trips = trips.len(),
        departures = resolved.len(),
        groups = groups.len(),
        labels = labelled.len(),
        "Aggregated first/last times"
    );
    Ok(labelled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedDir;
    use crate::domain::DepartureTime;
    use crate::feed::testing;

    fn feed() -> Feed {
        let dir = tempfile::tempdir().unwrap();
        testing::write_feed(dir.path());
        Feed::load(&FeedDir::new(dir.path())).unwrap()
    }

    fn single(time: &str) -> FirstLastTimes {
        FirstLastTimes::single(DepartureTime::new(time))
    }

    #[test]
    fn station_report_from_feed_files() {
        let table = MappingTable::embedded().unwrap();
        let map = first_last_map(&feed(), &table, Some("19th")).unwrap();
        assert_eq!(
            map,
            BTreeMap::from([
                (
                    CanonicalLabel::new("Saturday", "Red/Orange NB (Richmond)"),
                    single("23:40:00"),
                ),
                (
                    CanonicalLabel::new("Weekday", "Yellow NB (Antioch)"),
                    single("05:10:00"),
                ),
            ])
        );
    }

    #[test]
    fn whole_system_without_station() {
        let table = MappingTable::embedded().unwrap();
        let map = first_last_map(&feed(), &table, None).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(
            map[&CanonicalLabel::new("Saturday", "Blue/Green WB (Daly City)")],
            single("23:50:00")
        );
    }

    #[test]
    fn unknown_station_is_empty() {
        let table = MappingTable::embedded().unwrap();
        assert!(first_last_map(&feed(), &table, Some("Nowhere")).unwrap().is_empty());
    }

    #[test]
    fn dangling_trip_fails_the_run() {
        let table = MappingTable::embedded().unwrap();
        let mut feed = feed();
        feed.trips.retain(|t| t.trip_id.as_str() != "1002");
        assert!(matches!(
            first_last_map(&feed, &table, Some("19th")),
            Err(FilterError::UnknownTrip { .. })
        ));
    }
}
