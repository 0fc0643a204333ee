//! Error types for the Folio client.
//!
//! This module defines the centralized error type [`FolioError`] and a type alias
//! [`Result`] used throughout the crate. Every failure the client can hit, from a
//! missing session token to a malformed API envelope, is one of these variants.
//! Screens never let them escape: they are converted into list state notices at
//! the call site.

use thiserror::Error;

/// Fallback message shown when the API fails without saying why.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// The main error type for Folio client operations.
///
/// # Examples
///
/// ```
/// use folio::FolioError;
///
/// let err = FolioError::TokenNotFound;
/// assert_eq!(err.to_string(), "token not found");
/// ```
#[derive(Debug, Error)]
pub enum FolioError {
    /// No usable bearer token in persisted storage.
    ///
    /// Blocks every authenticated action. Surfaced inline, never retried.
    #[error("token not found")]
    TokenNotFound,

    /// The API answered with a non-success status.
    ///
    /// `message` is the server's own message when the body carried one,
    /// otherwise [`GENERIC_FAILURE`].
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message suitable for showing to the user.
        message: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, reset).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not have the expected envelope shape.
    #[error("malformed response: {0}")]
    MalformedEnvelope(String),

    /// Input was rejected before any request was sent.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The current role does not offer this action.
    #[error("not permitted: {0}")]
    Forbidden(String),

    /// The owning screen was closed while the request was in flight.
    #[error("request cancelled")]
    Cancelled,

    /// A response carried an older revision than the cached copy.
    #[error("stale update for {id}")]
    Stale {
        /// Identifier of the item whose update was discarded.
        id: String,
    },

    /// No item with this identifier is loaded.
    #[error("item not found: {0}")]
    NotFound(String),

    /// Reading or writing persisted client storage failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("configuration error: {0}")]
    Config(String),
}

impl FolioError {
    /// Text to show the user for this failure.
    ///
    /// API errors already carry a display-ready message; transport-level
    /// errors are collapsed into the generic fallback so raw library output
    /// never reaches a notice.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) | Self::Io(_) => GENERIC_FAILURE.to_string(),
            other => other.to_string(),
        }
    }
}

/// A specialized `Result` type for Folio operations.
pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_server_message() {
        let err = FolioError::Api {
            status: 400,
            message: "Book already exists".to_string(),
        };
        assert_eq!(err.user_message(), "Book already exists");
    }

    #[test]
    fn io_error_falls_back_to_generic_message() {
        let err = FolioError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }
}
