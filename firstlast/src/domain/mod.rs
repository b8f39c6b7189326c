//! Domain types for the first/last departure tool.
//!
//! Thin wrappers around the raw feed values so identifiers and times can't
//! be mixed up as they flow through indexing and aggregation.

mod ids;
mod time;

pub use ids::{ServiceId, StopId, TripId};
pub use time::DepartureTime;
