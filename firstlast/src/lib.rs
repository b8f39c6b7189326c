//! First and last scheduled departures from a static GTFS feed.
//!
//! Answers "when does the first train leave, and when does the last one
//! go?" for a station, broken down by service calendar and by line and
//! direction. Raw feed headsigns are normalised to canonical labels through
//! a curated mapping table before they reach the report.

pub mod aggregate;
pub mod check;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod filter;
pub mod headsign;
pub mod index;
pub mod pipeline;
pub mod report;
pub mod store;

pub use error::Error;
