//! Error types for the generation boundary.
//!
//! These errors describe why a provider call failed. They stop at the
//! [`SampleRunner`](crate::SampleRunner), which turns every one of them
//! into an `Error` outcome.

use std::time::Duration;

use thiserror::Error;

/// Errors a [`Generator`](crate::Generator) can report.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request never produced a response (connection, TLS, DNS).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider answered with an error status.
    #[error("Provider error ({status}): {message}")]
    Provider {
        /// HTTP status or provider error code.
        status: u16,
        /// Error body returned by the provider.
        message: String,
    },

    /// The call did not complete within the configured timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The provider response could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Any other failure.
    #[error("Generation failed: {0}")]
    Other(String),
}
