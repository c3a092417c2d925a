//! Single-sample execution.
//!
//! [`SampleRunner`] performs one generation call and classifies it into a
//! [`SampleOutcome`]. Provider failures are absorbed here: they become an
//! `Error` outcome followed by a fixed delay, and nothing propagates upward.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::extractor::{AnswerExtractor, ExtractedAnswer, NO_ANSWER};
use crate::generator::{GenerationRequest, GenerationResponse, GenerationResult, Generator};
use crate::GenerationError;

/// Pause after a failed call before the runner returns.
pub const DEFAULT_FAILURE_DELAY: Duration = Duration::from_secs(2);

/// Per-sample classification fed into the vote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleOutcome {
    /// Text was returned and run through the extractor.
    Extracted(ExtractedAnswer),
    /// The call succeeded without text.
    Empty,
    /// The call failed.
    Error,
}

impl SampleOutcome {
    /// Returns the extracted value if this outcome can vote.
    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Extracted(answer) => answer.value(),
            Self::Empty | Self::Error => None,
        }
    }

    /// Returns true if this outcome counts toward consensus.
    pub fn is_valid(&self) -> bool {
        self.answer().is_some()
    }

    /// Label used in raw tallies and reports.
    pub fn label(&self) -> &str {
        match self {
            Self::Extracted(ExtractedAnswer::Value(v)) => v,
            Self::Extracted(ExtractedAnswer::Unextractable) => NO_ANSWER,
            Self::Empty => "Empty",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for SampleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Runs one generation call and classifies the result.
///
/// # Failure handling
///
/// - Transport or provider error: `Error`, then sleep `failure_delay`
/// - Call exceeds `call_timeout`: treated as a failure
/// - No text: `Empty`
///
/// The delay is not a retry. The failed sample is recorded as-is.
#[derive(Clone)]
pub struct SampleRunner {
    failure_delay: Duration,
    call_timeout: Option<Duration>,
    extractor: Arc<AnswerExtractor>,
}

impl Default for SampleRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SampleRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleRunner")
            .field("failure_delay", &self.failure_delay)
            .field("call_timeout", &self.call_timeout)
            .finish()
    }
}

impl SampleRunner {
    /// Creates a runner with the default 2s failure delay and no timeout.
    pub fn new() -> Self {
        Self {
            failure_delay: DEFAULT_FAILURE_DELAY,
            call_timeout: None,
            extractor: Arc::new(AnswerExtractor::new()),
        }
    }

    /// Sets the pause taken after a failed call.
    pub fn with_failure_delay(mut self, delay: Duration) -> Self {
        self.failure_delay = delay;
        self
    }

    /// Bounds each call to `timeout`.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// Returns the failure delay.
    pub fn failure_delay(&self) -> Duration {
        self.failure_delay
    }

    /// Returns the per-call timeout, if any.
    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout
    }

    /// Performs the call and returns its raw classification.
    ///
    /// Applies the timeout but not the failure delay.
    pub async fn call(
        &self,
        generator: &dyn Generator,
        request: &GenerationRequest,
    ) -> GenerationResult {
        let call = match self.call_timeout {
            Some(limit) => match tokio::time::timeout(limit, generator.generate(request)).await {
                Ok(result) => result,
                Err(_) => Err(GenerationError::Timeout(limit)),
            },
            None => generator.generate(request).await,
        };
        if let Ok(GenerationResponse {
            model_version: Some(version),
            ..
        }) = &call
        {
            debug!("{} answered with model version {}", generator.name(), version);
        }
        GenerationResult::from_call(call)
    }

    /// Runs one sample and returns its outcome.
    pub async fn run(&self, generator: &dyn Generator, request: &GenerationRequest) -> SampleOutcome {
        match self.call(generator, request).await {
            GenerationResult::Text(text) => SampleOutcome::Extracted(self.extractor.extract(&text)),
            GenerationResult::Empty => {
                debug!("{} returned no text", generator.name());
                SampleOutcome::Empty
            }
            GenerationResult::Failed(reason) => {
                warn!("{} call failed: {}", generator.name(), reason);
                if !self.failure_delay.is_zero() {
                    tokio::time::sleep(self.failure_delay).await;
                }
                SampleOutcome::Error
            }
        }
    }
}
