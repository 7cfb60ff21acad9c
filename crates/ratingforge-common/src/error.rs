//! Unified error type for ratingforge.
//!
//! Every layer of the rating pipeline funnels its failures into [`Error`].
//! [`Error::kind`] exposes the taxonomy tag so callers can decide how to
//! recover (disable a provider, retry later, give up) without matching on
//! payloads.

use std::fmt;

/// Taxonomy tag carried by every [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ConfigInvalid,
    TransportFailure,
    NotAuthorized,
    NotFound,
    DecodeFailure,
    ShapeMismatch,
    Canceled,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ConfigInvalid => "config_invalid",
            Self::TransportFailure => "transport_failure",
            Self::NotAuthorized => "not_authorized",
            Self::NotFound => "not_found",
            Self::DecodeFailure => "decode_failure",
            Self::ShapeMismatch => "shape_mismatch",
            Self::Canceled => "canceled",
        };
        f.write_str(s)
    }
}

/// Error type covering every failure mode of the rating pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration is unusable (missing credential, empty log path, ...).
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    /// The request could not be shaped (malformed endpoint, bad URL).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The HTTP call failed after retries, or timed out.
    #[error("Transport error: {message}")]
    Transport {
        /// Human-readable description, never containing credentials.
        message: String,
        /// The underlying client error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider rejected the credential (HTTP 401).
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// The provider endpoint returned HTTP 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A provider payload of an unexpected type crossed the client boundary.
    #[error("invalid response type: expected {expected}")]
    ShapeMismatch {
        /// The payload type the caller expected.
        expected: &'static str,
    },

    /// The caller canceled the request.
    #[error("Request canceled")]
    Canceled,

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// The taxonomy tag for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ConfigInvalid(_) | Error::InvalidRequest(_) | Error::Io { .. } => {
                ErrorKind::ConfigInvalid
            }
            Error::Transport { .. } => ErrorKind::TransportFailure,
            Error::NotAuthorized(_) => ErrorKind::NotAuthorized,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Decode(_) => ErrorKind::DecodeFailure,
            Error::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
            Error::Canceled => ErrorKind::Canceled,
        }
    }

    /// Convenience constructor for [`Error::ConfigInvalid`].
    pub fn config(msg: impl Into<String>) -> Self {
        Error::ConfigInvalid(msg.into())
    }

    /// Convenience constructor for [`Error::Transport`] without a source.
    pub fn transport(msg: impl Into<String>) -> Self {
        Error::Transport {
            message: msg.into(),
            source: None,
        }
    }

    /// Convenience constructor for [`Error::Transport`] wrapping a client error.
    pub fn transport_with(
        msg: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Transport {
            message: msg.into(),
            source: Some(source.into()),
        }
    }

    /// Convenience constructor for [`Error::Decode`].
    pub fn decode(msg: impl fmt::Display) -> Self {
        Error::Decode(msg.to_string())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
