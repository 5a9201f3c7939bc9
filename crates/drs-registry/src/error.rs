use thiserror::Error;

use drs_store::StoreError;
use drs_types::TypeError;

/// Coarse classification a transport layer maps onto its own status codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller named something that does not exist.
    NotFound,
    /// The request is well-formed but would violate an invariant.
    BadRequest,
    /// The identifier retry budget ran out.
    Unavailable,
    /// The store or configuration is in a state the engine cannot resolve.
    Internal,
}

/// Errors resolving a configured identifier charset.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("unknown character class in charset expression: {0}")]
    UnknownCharsetClass(String),

    #[error("charset resolves to no characters")]
    EmptyCharset,

    #[error("identifier length must be at least 1")]
    ZeroLength,
}

/// Errors from registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("access method {access_id} not found on object {object_id}")]
    AccessMethodNotFound { object_id: String, access_id: String },

    #[error("no access URL for access method {access_id} on object {object_id}")]
    AccessUrlNotFound { object_id: String, access_id: String },

    #[error("service info not found")]
    ServiceInfoNotFound,

    #[error("refusing to delete {access_id}: it is the only access method of object {object_id}")]
    LastAccessMethod { object_id: String, access_id: String },

    #[error(transparent)]
    InvalidServiceInfo(#[from] TypeError),

    #[error("{operation}: could not generate unique identifier after {attempts} attempts")]
    Unavailable {
        operation: &'static str,
        attempts: u32,
    },

    #[error("access id {access_id} appears {count} times on object {object_id}")]
    DuplicateAccessId {
        object_id: String,
        access_id: String,
        count: usize,
    },

    #[error("access method {access_id} on object {object_id} has no access_url")]
    MissingAccessUrl { object_id: String, access_id: String },

    #[error("access method {access_id} on object {object_id} vanished before it could be removed")]
    LostUpdate { object_id: String, access_id: String },

    #[error("identifier configuration error: {0}")]
    Id(#[from] IdError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ObjectNotFound(_)
            | Self::AccessMethodNotFound { .. }
            | Self::AccessUrlNotFound { .. }
            | Self::ServiceInfoNotFound => ErrorKind::NotFound,
            Self::LastAccessMethod { .. } | Self::InvalidServiceInfo(_) => ErrorKind::BadRequest,
            Self::Unavailable { .. } => ErrorKind::Unavailable,
            Self::DuplicateAccessId { .. }
            | Self::MissingAccessUrl { .. }
            | Self::LostUpdate { .. }
            | Self::Id(_)
            | Self::Store(_) => ErrorKind::Internal,
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
