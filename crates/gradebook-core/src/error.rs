//! Error types for the roster store.
//!
//! Storage and codec failures are fatal for the operation that hit them.
//! [`RosterError::NotFound`] is the one recoverable signal: the shell reports
//! it and carries on.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reading or writing the persisted roster.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading the roster file failed.
    #[error("failed to read roster from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the roster file failed.
    #[error("failed to write roster to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal decoding failures in the flat-file format.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A record's id field is not an integer and the load policy is strict.
    #[error("line {line}: invalid student id {value:?}")]
    InvalidId { line: usize, value: String },
}

/// Errors returned by [`crate::roster::RosterStore`] operations.
#[derive(Debug, Error)]
pub enum RosterError {
    /// No student with this id exists in the roster.
    #[error("student not found: {id}")]
    NotFound { id: u32 },

    /// The last student's id is `u32::MAX`, so no next id exists.
    #[error("no student id left after {last}")]
    IdsExhausted { last: u32 },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl RosterError {
    /// Returns `true` for the recoverable not-found signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RosterError::NotFound { .. })
    }
}
