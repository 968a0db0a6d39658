//! use identityfile::error::IdentityFileError;

use thiserror::Error;

/// Represents errors that can occur while reading or writing identity files.
///
/// Every failure is returned to the caller; nothing is logged and dropped.
#[derive(Debug, Error)]
pub enum IdentityFileError {
    /// A caller-supplied argument was rejected before any output was produced.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Opening, reading or writing an underlying stream failed.
    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The input ended in the middle of a structure that was already started.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Error during data decoding.
    #[error("Failed to decode data: {0}")]
    DecodingError(String),
}

impl IdentityFileError {
    /// Wraps an I/O error with a description of the stream it came from.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        IdentityFileError::Io {
            context: context.into(),
            source,
        }
    }
}

impl From<pem::PemError> for IdentityFileError {
    fn from(err: pem::PemError) -> Self {
        IdentityFileError::DecodingError(err.to_string())
    }
}

impl From<base64::DecodeError> for IdentityFileError {
    fn from(err: base64::DecodeError) -> Self {
        IdentityFileError::DecodingError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IdentityFileError>;
