//! The generation boundary.
//!
//! Defines the [`Generator`] trait that turns a prompt into model text,
//! along with the request and response values that cross it.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Options forwarded to the provider untouched.
///
/// Sampling code never inspects these fields; only the provider adapter
/// interprets them. Absent fields are left to the provider's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// System instruction sent alongside the prompt.
    pub system_instruction: Option<String>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Nucleus-sampling threshold.
    pub top_p: Option<f32>,
    /// Top-k sampling cutoff.
    pub top_k: Option<u32>,
    /// Maximum number of output tokens.
    pub max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    /// Sets the system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the nucleus-sampling threshold.
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Sets the top-k cutoff.
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Sets the output token limit.
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }
}

/// One generation request: model, ordered prompt contents, and options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model identifier (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Prompt content, in order.
    pub contents: Vec<String>,
    /// Provider options.
    pub config: GenerationConfig,
}

impl GenerationRequest {
    /// Creates a request with default options.
    pub fn new(model: impl Into<String>, contents: Vec<String>) -> Self {
        Self {
            model: model.into(),
            contents,
            config: GenerationConfig::default(),
        }
    }

    /// Replaces the provider options.
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }
}

/// Raw response from a provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated text, if the provider returned any.
    pub text: Option<String>,
    /// Model version reported by the provider.
    pub model_version: Option<String>,
}

impl GenerationResponse {
    /// Creates a response carrying text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            model_version: None,
        }
    }

    /// Creates a response without text.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Classification of a single generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationResult {
    /// The provider returned non-empty text.
    Text(String),
    /// The call succeeded but produced no text.
    Empty,
    /// The call failed. Carries the failure reason, never a payload.
    Failed(String),
}

impl GenerationResult {
    /// Classifies the outcome of a provider call.
    ///
    /// Only missing or zero-length text counts as empty. Whitespace is text.
    pub fn from_call(call: Result<GenerationResponse>) -> Self {
        match call {
            Ok(GenerationResponse {
                text: Some(text), ..
            }) if !text.is_empty() => Self::Text(text),
            Ok(_) => Self::Empty,
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    /// Returns true if the call failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for GenerationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", text),
            Self::Empty => write!(f, "Empty"),
            Self::Failed(reason) => write!(f, "Failed: {}", reason),
        }
    }
}

/// A capability that generates text for a prompt.
///
/// Implementations talk to a provider and must be treated as unreliable:
/// they may fail, return nothing, or take a long time.
///
/// # Implementors
///
/// - `quorate_gemini::GeminiGenerator`: Gemini REST API
/// - [`crate::testing::ScriptedGenerator`]: deterministic stand-in for tests
#[async_trait]
pub trait Generator: Send + Sync {
    /// Returns a short name for this generator, used in logs.
    fn name(&self) -> &str;

    /// Performs one generation call.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse>;
}
