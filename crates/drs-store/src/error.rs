/// Errors from document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An insert collided with an existing document's unique `id`.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// Attempted to store a document without an `id`.
    #[error("cannot store document with empty id")]
    EmptyId,

    /// A lock guarding the backing collection was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    Poisoned(String),

    /// The storage backend failed or is otherwise unavailable.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
