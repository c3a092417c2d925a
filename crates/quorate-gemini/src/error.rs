//! Error types for the Gemini adapter.

use thiserror::Error;

/// Errors raised while setting up the Gemini client.
///
/// Call-time failures are reported as
/// [`GenerationError`](quorate_sampling::GenerationError) instead.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// The API key environment variable is unset or empty.
    #[error("{0} not found in environment or .env file")]
    MissingApiKey(String),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
