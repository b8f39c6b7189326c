//! Headsign normalization.
//!
//! Raw feed headsigns mix branches, list several destinations at once, and
//! sometimes mean different lines depending on where you stand. This module
//! turns them into canonical "Line Direction (Destination)" labels such as
//! "Yellow NB (Antioch)".
//!
//! Resolution happens in two stages: [`MappingTable::lookup`] classifies the
//! raw headsign as unmapped, resolved, or ambiguous, and
//! [`Resolution::with_context`] applies the querying station to settle the
//! ambiguous ones.

mod partition;
mod resolve;
mod table;

#[cfg(test)]
mod history_tests;

pub use partition::{Branch, BranchChoice, BranchPartition};
pub use resolve::{
    Resolution, UNMAPPED_FILL, UNMAPPED_WIDTH, destination_only, flag_unmapped,
};
pub use table::{HeadsignEntry, MappingError, MappingTable};
