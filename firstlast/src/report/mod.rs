//! Console output for the first/last map.
//!
//! Two shapes: a flat sorted list of canonical labels, and a pair of
//! destination × service tables (first trains, last trains).

mod list;
mod table;

use std::collections::BTreeMap;

use crate::aggregate::{CanonicalLabel, FirstLastTimes};
use crate::domain::DepartureTime;
use crate::headsign::MappingTable;

pub use list::render_list;
pub use table::render_table;

/// What the table does with a service or destination missing from the
/// configured orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingStrategy {
    /// Refuse to render.
    Strict,
    /// Put unknown entries after the known ones, alphabetically.
    #[default]
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("service {0:?} has no place in the column order")]
    UnknownService(String),

    #[error("destination {0:?} has no place in the row order")]
    UnknownDestination(String),
}

/// Which end of the day a table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    First,
    Last,
}

impl Extreme {
    fn title(self) -> &'static str {
        match self {
            Extreme::First => "First Trains",
            Extreme::Last => "Last Trains",
        }
    }

    fn station_action(self) -> &'static str {
        match self {
            Extreme::First => "opened before",
            Extreme::Last => "closed after",
        }
    }

    /// The time this table shows for a group.
    pub fn pick(self, times: &FirstLastTimes) -> &DepartureTime {
        match self {
            Extreme::First => &times.first,
            Extreme::Last => &times.last,
        }
    }

    /// Earliest first or latest last over all groups.
    pub fn overall<'a>(
        self,
        times: impl IntoIterator<Item = &'a FirstLastTimes>,
    ) -> Option<&'a DepartureTime> {
        let picked = times.into_iter().map(|t| self.pick(t));
        match self {
            Extreme::First => picked.min(),
            Extreme::Last => picked.max(),
        }
    }

    /// Table heading, e.g. `*** First Trains *** station opened before: 04:58:00`.
    pub fn heading(self, overall: Option<&DepartureTime>) -> String {
        match overall {
            Some(time) => format!(
                "*** {} *** station {}: {time}",
                self.title(),
                self.station_action()
            ),
            None => format!("*** {} *** no departures", self.title()),
        }
    }
}

/// Row and column orderings for [`render_table`].
#[derive(Debug, Clone, Copy)]
pub struct TableLayout<'a> {
    pub service_order: &'a [String],
    pub destination_order: &'a [String],
    pub strategy: OrderingStrategy,
}

impl<'a> TableLayout<'a> {
    /// Orderings taken from the mapping table.
    pub fn from_table(table: &'a MappingTable, strategy: OrderingStrategy) -> Self {
        Self {
            service_order: table.service_order(),
            destination_order: table.destination_order(),
            strategy,
        }
    }
}

/// Both tables, first trains then last trains, separated by a blank line.
pub fn render_report(
    map: &BTreeMap<CanonicalLabel, FirstLastTimes>,
    layout: &TableLayout<'_>,
) -> Result<String, RenderError> {
    let first = render_table(map, Extreme::First, layout)?;
    let last = render_table(map, Extreme::Last, layout)?;
    Ok(format!("{first}\n{last}"))
}
