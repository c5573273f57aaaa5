//! Card metadata collaborators: the provider contract, a local card-data implementation and
//! a bounded memoising cache that can wrap either.

mod cache;
mod local;
mod query;

pub use cache::{CachePolicy, CachedMetadataProvider};
pub use local::LocalMetadataProvider;
pub use query::{CardQuery, QueryError};

use crate::cards::CardAttributes;

/// Resolves card names to attributes and runs attribute searches.
///
/// Implementations must never fail for unknown cards: `attributes` returns `None` and
/// `search` returns an empty list when nothing (or nothing parseable) matches.
pub trait MetadataProvider: Send + Sync {
    fn attributes(&self, name: &str) -> Option<CardAttributes>;
    fn search(&self, query: &str) -> Vec<CardAttributes>;
}

/// Errors raised while loading local card data.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("card data io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("card data is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}
