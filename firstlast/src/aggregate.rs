//! First/last departure aggregation.
//!
//! Grouping happens on the raw (service id, headsign) pair. Display labels
//! are attached afterwards by [`canonical_map`], so changing the mapping
//! table never changes which departures were grouped together.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::warn;

use crate::domain::{DepartureTime, ServiceId};
use crate::filter::ResolvedStopTime;
use crate::headsign::{MappingTable, destination_only};

/// Earliest and latest departure in a group. `first <= last` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstLastTimes {
    pub first: DepartureTime,
    pub last: DepartureTime,
}

impl FirstLastTimes {
    /// A group of one departure.
    pub fn single(time: DepartureTime) -> Self {
        Self {
            first: time.clone(),
            last: time,
        }
    }

    /// Widen the range to include `time`.
    pub fn include(&mut self, time: &DepartureTime) {
        if *time < self.first {
            self.first = time.clone();
        }
        if *time > self.last {
            self.last = time.clone();
        }
    }

    /// Widen the range to cover another group.
    pub fn merge(&mut self, other: &FirstLastTimes) {
        self.include(&other.first);
        self.include(&other.last);
    }
}

/// Raw grouping key: feed service id and effective headsign, untranslated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AggregateKey {
    pub service_id: ServiceId,
    pub headsign: String,
}

/// First and last departure per (service, headsign).
///
/// Times compare as strings. The result doesn't depend on input order.
pub fn aggregate<'a>(
    stop_times: impl IntoIterator<Item = &'a ResolvedStopTime>,
) -> BTreeMap<AggregateKey, FirstLastTimes> {
    let mut groups: BTreeMap<AggregateKey, FirstLastTimes> = BTreeMap::new();
    for st in stop_times {
        let key = AggregateKey {
            service_id: st.effective_service_id.clone(),
            headsign: st.effective_headsign.clone(),
        };
        match groups.get_mut(&key) {
            Some(times) => times.include(&st.departure_time),
            None => {
                groups.insert(key, FirstLastTimes::single(st.departure_time.clone()));
            }
        }
    }
    groups
}

/// Display label: service name plus canonical line label.
///
/// Renders as `"<service> - <line label>"`, e.g. `"Weekday - Yellow NB (Antioch)"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalLabel {
    pub service: String,
    pub line: String,
    /// `line` is a `*`-padded raw headsign, not a table label.
    pub flagged: bool,
}

impl CanonicalLabel {
    pub fn new(service: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            line: line.into(),
            flagged: false,
        }
    }

    /// Label for a headsign the table doesn't know; `line` is the padded raw text.
    pub fn unmapped(service: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            flagged: true,
            ..Self::new(service, line)
        }
    }

    /// The table row this label belongs to.
    ///
    /// Flagged labels keep their whole text, so a raw headsign that happens to
    /// contain parentheses can't land in a real destination's row.
    pub fn destination(&self) -> &str {
        if self.flagged {
            &self.line
        } else {
            destination_only(&self.line)
        }
    }
}

impl fmt::Display for CanonicalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.service, self.line)
    }
}

/// Attach display labels to aggregated groups.
///
/// Service ids go through the table's service names; headsigns through the
/// resolver, with `station` as context. Several raw groups can land on the
/// same label (e.g. three spellings of the Antioch headsign); their ranges
/// are merged.
pub fn canonical_map(
    groups: &BTreeMap<AggregateKey, FirstLastTimes>,
    table: &MappingTable,
    station: Option<&str>,
) -> BTreeMap<CanonicalLabel, FirstLastTimes> {
    let mut labelled: BTreeMap<CanonicalLabel, FirstLastTimes> = BTreeMap::new();
    let mut unmapped: BTreeSet<&str> = BTreeSet::new();

    for (key, times) in groups {
        let resolution = table.lookup(&key.headsign);
        let service = table.service_label(&key.service_id);
        let line = resolution.with_context(station);
        let label = if resolution.is_unmapped() {
            unmapped.insert(&key.headsign);
            CanonicalLabel::unmapped(service, line)
        } else {
            CanonicalLabel::new(service, line)
        };
        match labelled.get_mut(&label) {
            Some(existing) => existing.merge(times),
            None => {
                labelled.insert(label, times.clone());
            }
        }
    }

    for headsign in unmapped {
        warn!(headsign, "No canonical mapping for headsign");
    }

    labelled
}
