//! Feed loading error types.

use std::path::PathBuf;

/// Errors that can occur while reading feed files.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The file could not be opened (usually: it doesn't exist)
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be parsed into the expected columns
    #[error("{}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
