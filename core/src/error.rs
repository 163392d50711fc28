//! Error types for the Vero API client.
//!
//! # Design
//! `Service` displays as the bare message the API sent back, so callers can
//! show it to users unchanged. The status code stays on the variant for
//! programmatic checks. Every other variant carries a rendered message rather
//! than the source error, which keeps `ApiError` independent of whichever
//! HTTP library the transport uses.

use thiserror::Error;

/// Errors returned by `VeroClient` operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request payload could not be serialized to JSON. Nothing was sent.
    #[error("failed to encode request payload: {0}")]
    Encoding(String),

    /// The request never produced an HTTP response, or its body could not be read.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The API answered with a non-2xx status.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// Client configuration is missing or malformed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of a `Service` error, `None` for every other variant.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}
