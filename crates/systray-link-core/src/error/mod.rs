use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Link layer errors with source location tracking.
#[derive(Error, Debug)]
pub enum LinkError {
    /// Reading from or writing to a link stream failed.
    #[error("Link I/O error: {source} {location}")]
    Io {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Payload length does not fit the frame bound.
    #[error("Frame of {len} bytes exceeds limit of {max} bytes {location}")]
    FrameTooLarge {
        /// Length of the rejected payload.
        len: usize,
        /// Configured maximum frame length.
        max: usize,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Inbound payload is not valid JSON.
    #[error("Malformed payload: {source} {location}")]
    MalformedPayload {
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Outbound message could not be serialized.
    #[error("Failed to encode message: {source} {location}")]
    Encode {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Write attempted after the outbound stream was closed.
    #[error("Link is closed {location}")]
    LinkClosed {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Background reader thread could not be started.
    #[error("Failed to spawn frame reader: {reason} {location}")]
    ReaderSpawnFailed {
        /// Description of the spawn failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for LinkError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        LinkError::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`LinkError`].
pub type Result<T> = StdResult<T, LinkError>;
