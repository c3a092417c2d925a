//! HTTP client for the Gemini `generateContent` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use quorate_sampling::{GenerationError, GenerationRequest, GenerationResponse, Generator};
use reqwest::{Client, StatusCode};
use tracing::{debug, trace};

use crate::error::GeminiError;
use crate::wire::{GenerateContentRequest, GenerateContentResponse};

/// Public API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variable holding the API key.
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider.
///
/// One instance is built at setup and shared by every sample.
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl GeminiGenerator {
    /// Creates a provider for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GeminiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::MissingApiKey(DEFAULT_API_KEY_ENV.to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Creates a provider using the key stored in `var`.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::MissingApiKey`] when `var` is unset or empty.
    pub fn from_env(
        var: &str,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GeminiError> {
        let api_key = std::env::var(var)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GeminiError::MissingApiKey(var.to_string()))?;
        Self::new(api_key, base_url, timeout)
    }

    /// URL for `model`.
    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    fn transport_error(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            GenerationError::Timeout(self.timeout.unwrap_or_default())
        } else {
            GenerationError::Transport(err.to_string())
        }
    }
}

impl std::fmt::Debug for GeminiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGenerator")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> quorate_sampling::Result<GenerationResponse> {
        let url = self.endpoint(&request.model);
        let body = GenerateContentRequest::from(request);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let payload = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;
        trace!("Response {}: {} bytes", status, payload.len());

        parse_response(status, &payload)
    }
}

/// Maps a raw HTTP reply to a generation response.
pub(crate) fn parse_response(
    status: StatusCode,
    payload: &str,
) -> quorate_sampling::Result<GenerationResponse> {
    if !status.is_success() {
        return Err(GenerationError::Provider {
            status: status.as_u16(),
            message: provider_message(payload),
        });
    }

    serde_json::from_str::<GenerateContentResponse>(payload)
        .map(GenerationResponse::from)
        .map_err(|e| GenerationError::InvalidResponse(e.to_string()))
}

/// Pulls `error.message` out of an error body, falling back to the raw text.
fn provider_message(payload: &str) -> String {
    serde_json::from_str::<serde_json::Value>(payload)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| payload.trim().to_string())
}
