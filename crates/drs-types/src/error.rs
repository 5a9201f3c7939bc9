use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid service info: {field} must not be empty")]
    InvalidServiceInfo { field: &'static str },
}
