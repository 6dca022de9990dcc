//! Search error types for medkb-search.

/// Errors from the content store, the vector index and the search passes.
///
/// The public `search`/`check`/`recommend` entry points never surface these;
/// they log and degrade instead. Supplementary operations return them.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The content store could not serve a read or write.
    #[error("content store error: {0}")]
    Store(String),

    /// A lock guarding shared state was poisoned by a panicking thread.
    #[error("lock poisoned: {0}")]
    LockPoisoned(&'static str),

    /// A lookup query with no searchable text.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Corpus snapshot could not be read or parsed.
    #[error("corpus snapshot error: {0}")]
    Snapshot(String),

    /// Entity validation or lookup error.
    #[error("core error: {0}")]
    Core(#[from] medkb_core::errors::CoreError),
}
