//! Store error types.

use crate::feed::FeedError;

/// Errors from the SQLite copy of the feed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An operation ran before `connect`
    #[error("store not connected: call connect() first")]
    NotConnected,

    /// `connect` ran twice without a `disconnect`
    #[error("store already connected")]
    AlreadyConnected,

    /// Table name outside the feed tables
    #[error("unknown table {0:?}: expected one of stops, trips, stop_times, routes")]
    UnknownTable(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Reading the feed files to load them failed
    #[error(transparent)]
    Feed(#[from] FeedError),
}
