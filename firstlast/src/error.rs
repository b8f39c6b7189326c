//! Crate-level error.

use crate::config::ConfigError;
use crate::feed::FeedError;
use crate::filter::FilterError;
use crate::headsign::MappingError;
use crate::report::RenderError;
use crate::store::StoreError;

/// Any failure a command can end with.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("mapping table: {0}")]
    Mapping(#[from] MappingError),

    #[error("cannot render table: {0}")]
    Render(#[from] RenderError),

    #[error("store: {0}")]
    Store(#[from] StoreError),
}
