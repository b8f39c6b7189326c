//! Station name → stop id lookup.

use std::collections::BTreeSet;

use crate::domain::StopId;
use crate::feed::StopRecord;

/// Finds the stop ids belonging to a station by name.
///
/// A station is usually several stops (one per platform or direction) that
/// share a `stop_name`. Lookups are case-sensitive, unanchored substring
/// matches, so "19th" finds every stop named "19th Street Oakland".
///
/// # Examples
///
/// ```
/// use firstlast::domain::StopId;
/// use firstlast::feed::StopRecord;
/// use firstlast::index::StationIndex;
///
/// let stops = vec![
///     StopRecord { stop_id: StopId::new("K30-1"), stop_name: "19th Street Oakland".into(), stop_lat: None, stop_lon: None },
///     StopRecord { stop_id: StopId::new("K30-2"), stop_name: "19th Street Oakland".into(), stop_lat: None, stop_lon: None },
/// ];
/// let index = StationIndex::new(&stops);
/// assert_eq!(index.lookup("19th").len(), 2);
/// assert!(index.lookup("19TH").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    stops: Vec<(StopId, String)>,
}

impl StationIndex {
    pub fn new(stops: &[StopRecord]) -> Self {
        Self {
            stops: stops
                .iter()
                .map(|s| (s.stop_id.clone(), s.stop_name.clone()))
                .collect(),
        }
    }

    /// Every stop id whose name contains `substring`.
    ///
    /// No match gives an empty set, which downstream means "no departures".
    pub fn lookup(&self, substring: &str) -> BTreeSet<StopId> {
        self.matching(substring).map(|(id, _)| id.clone()).collect()
    }

    /// `(stop_id, stop_name)` pairs containing `substring`, in feed order.
    pub fn matching<'a>(
        &'a self,
        substring: &'a str,
    ) -> impl Iterator<Item = (&'a StopId, &'a String)> + 'a {
        self.stops
            .iter()
            .filter(move |(_, name)| name.contains(substring))
            .map(|(id, name)| (id, name))
    }
}
