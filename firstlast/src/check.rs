//! Headsign self-check.
//!
//! Every headsign the feed uses should have an entry in the mapping table.
//! A new or renamed headsign otherwise shows up in the report as a
//! `*`-flagged row; the check catches it before the report runs.

use std::collections::BTreeSet;
use std::fmt;

use crate::feed::{Feed, StopTimeRecord, TripRecord};
use crate::headsign::MappingTable;

/// Which feed file a headsign was seen in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadsignSource {
    Trip,
    StopTimes,
}

impl fmt::Display for HeadsignSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadsignSource::Trip => write!(f, "TRIP"),
            HeadsignSource::StopTimes => write!(f, "STOP_TIMES"),
        }
    }
}

/// A headsign with no mapping.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MissingHeadsign {
    pub headsign: String,
    pub source: HeadsignSource,
}

impl fmt::Display for MissingHeadsign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Missing headsign mapping for: {}, source: {}",
            self.headsign, self.source
        )
    }
}

/// Headsigns in `trips` or `stop_times` that the table doesn't know, sorted
/// by headsign and reported once per source file.
///
/// Trip headsigns are checked as-is, empty ones included. Stop times are
/// checked only where they set their own headsign; the rest fall back to a
/// trip headsign already covered.
pub fn missing_headsigns(
    trips: &[TripRecord],
    stop_times: &[StopTimeRecord],
    table: &MappingTable,
) -> Vec<MissingHeadsign> {
    let from_trips = trips
        .iter()
        .map(|t| (t.trip_headsign.as_str(), HeadsignSource::Trip));
    let from_stop_times = stop_times.iter().filter_map(|st| {
        st.stop_headsign
            .as_deref()
            .filter(|h| !h.is_empty())
            .map(|h| (h, HeadsignSource::StopTimes))
    });

    let missing: BTreeSet<MissingHeadsign> = from_trips
        .chain(from_stop_times)
        .filter(|(headsign, _)| !table.contains(headsign))
        .map(|(headsign, source)| MissingHeadsign {
            headsign: headsign.to_string(),
            source,
        })
        .collect();

    missing.into_iter().collect()
}

/// Result of checking a whole feed against one mapping table.
///
/// Displays as one line per missing headsign plus a summary, or nothing when
/// the check passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadsignCheck {
    pub missing: Vec<MissingHeadsign>,
    pub table_version: String,
}

impl HeadsignCheck {
    /// Process exit status for a run stopped by a failed check.
    pub const FAILURE_STATUS: u8 = 1;

    pub fn run(feed: &Feed, table: &MappingTable) -> Self {
        Self {
            missing: missing_headsigns(&feed.trips, &feed.stop_times, table),
            table_version: table.version().to_string(),
        }
    }

    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }
}

impl fmt::Display for HeadsignCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return Ok(());
        }
        for m in &self.missing {
            writeln!(f, "{m}")?;
        }
        writeln!(
            f,
            "Some headsigns are missing mappings in table {}.",
            self.table_version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DepartureTime, ServiceId, StopId, TripId};

    fn trip(id: &str, headsign: &str) -> TripRecord {
        TripRecord {
            route_id: "1".to_string(),
            service_id: ServiceId::new("2025_08_11-DX-MVS-Weekday-003"),
            trip_id: TripId::new(id),
            trip_headsign: headsign.to_string(),
        }
    }

    fn stop_time(trip: &str, headsign: Option<&str>) -> StopTimeRecord {
        StopTimeRecord {
            trip_id: TripId::new(trip),
            arrival_time: None,
            departure_time: Some(DepartureTime::new("05:10:00")),
            stop_id: StopId::new("K30-1"),
            stop_sequence: 1,
            stop_headsign: headsign.map(str::to_string),
        }
    }

    #[test]
    fn fully_mapped_feed_passes() {
        let table = MappingTable::embedded().unwrap();
        let trips = vec![trip("1", "Antioch"), trip("2", "SF / Daly City")];
        let stop_times = vec![stop_time("1", None), stop_time("2", Some("Richmond"))];
        assert!(missing_headsigns(&trips, &stop_times, &table).is_empty());
    }

    #[test]
    fn reports_each_source_once() {
        let table = MappingTable::embedded().unwrap();
        let trips = vec![
            trip("1", "Walnut Creek"),
            trip("2", "Walnut Creek"),
            trip("3", "Antioch"),
        ];
        let stop_times = vec![
            stop_time("3", Some("Walnut Creek")),
            stop_time("3", Some("Concord")),
            stop_time("3", Some("Concord")),
            stop_time("3", Some("")),
        ];

        let missing = missing_headsigns(&trips, &stop_times, &table);
        let lines: Vec<String> = missing.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "Missing headsign mapping for: Concord, source: STOP_TIMES",
                "Missing headsign mapping for: Walnut Creek, source: TRIP",
                "Missing headsign mapping for: Walnut Creek, source: STOP_TIMES",
            ]
        );
    }

    #[test]
    fn empty_trip_headsign_is_missing() {
        let table = MappingTable::embedded().unwrap();
        let missing = missing_headsigns(&[trip("1", "")], &[], &table);
        assert_eq!(
            missing,
            vec![MissingHeadsign {
                headsign: String::new(),
                source: HeadsignSource::Trip,
            }]
        );
    }

    fn feed(trips: Vec<TripRecord>, stop_times: Vec<StopTimeRecord>) -> Feed {
        Feed {
            stops: Vec::new(),
            trips,
            stop_times,
        }
    }

    #[test]
    fn check_passes_on_mapped_feed() {
        let table = MappingTable::embedded().unwrap();
        let check = HeadsignCheck::run(&feed(vec![trip("1", "Antioch")], Vec::new()), &table);
        assert!(check.passed());
        assert_eq!(check.to_string(), "");
    }

    #[test]
    fn check_fails_and_reports_table_version() {
        let table = MappingTable::embedded().unwrap();
        let check = HeadsignCheck::run(
            &feed(
                vec![trip("1", "Walnut Creek")],
                vec![stop_time("1", Some("Antioch"))],
            ),
            &table,
        );
        assert!(!check.passed());
        assert_eq!(
            check.to_string(),
            format!(
                "Missing headsign mapping for: Walnut Creek, source: TRIP\n\
                 Some headsigns are missing mappings in table {}.\n",
                table.version()
            )
        );
    }

    #[test]
    fn matching_is_exact() {
        let table = MappingTable::embedded().unwrap();
        let missing = missing_headsigns(&[trip("1", "antioch")], &[], &table);
        assert_eq!(missing.len(), 1);
    }
}
