use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("version code must not be empty")]
    EmptyVersion,

    #[error("version '{0}' is not supported")]
    UnsupportedVersion(String),
}
