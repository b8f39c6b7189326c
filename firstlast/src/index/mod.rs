//! Lookup structures built once from the loaded feed.

mod station;
mod trip;

pub use station::StationIndex;
pub use trip::{TripIndex, TripInfo};
