//! # Quorate Gemini
//!
//! [`Generator`](quorate_sampling::Generator) backed by the Gemini REST API.
//!
//! ```text
//! GenerationRequest ──► wire::GenerateContentRequest ──► POST /v1beta/models/{model}:generateContent
//!                                                              │
//! GenerationResponse ◄── wire::GenerateContentResponse ◄───────┘
//! ```
//!
//! Every call failure is returned as a
//! [`GenerationError`](quorate_sampling::GenerationError); the sampling layer
//! turns those into `Error` samples. Only setup (missing key, client build)
//! fails with [`GeminiError`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quorate_gemini::{GeminiGenerator, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL};
//!
//! let gemini = GeminiGenerator::from_env(DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, Some(timeout))?;
//! ```

mod client;
mod error;
pub mod wire;

pub use client::{GeminiGenerator, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL};
pub use error::GeminiError;
