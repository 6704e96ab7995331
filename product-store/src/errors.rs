use thiserror::Error;

/// Errors surfaced by [`ProductStore`](crate::store::ProductStore)
/// implementations.
///
/// Storage failures are never masked by callers: a silently-lost record is
/// worse than a visible failure.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be reached or refused the operation.
    #[error("[Product Store] backend unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be encoded or decoded.
    #[error("[Product Store] corrupt record: {0}")]
    Corrupt(String),
}
