//! Error type for backend API operations.

use thiserror::Error;

/// Errors produced by the backend API client.
///
/// All variants are transient from the tracker's point of view: callers log
/// them and rely on the next fix or timer tick as the implicit retry.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response (connection failure,
    /// middleware error).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// The response could not be read or decoded as the expected JSON shape.
    #[error("Response decode error: {0}")]
    Decode(#[from] reqwest::Error),

    /// The backend answered with a `status` other than `"success"`.
    #[error("Backend reported status '{status}' for {endpoint}: {message}")]
    ErrorStatus {
        /// The API path that produced the error.
        endpoint: &'static str,
        /// The literal `status` value from the response.
        status: String,
        /// The `message` accompanying the error, empty when absent.
        message: String,
    },

    /// A `"success"` response was missing its expected payload field.
    #[error("Malformed success response from {endpoint}")]
    Malformed {
        /// The API path that produced the malformed response.
        endpoint: &'static str,
    },

    /// The configured base URL could not be joined with an API path.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
