//! The generation facade.
//!
//! [`Quorate`] chooses between one plain generation call and a
//! self-consistency run, and always returns a displayable string. Provider
//! failures show up in that string; they are never returned as errors.

use std::sync::Arc;

use quorate_sampling::{
    ConsensusResult, GenerationRequest, GenerationResult, Generator, SelfConsistency,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{GenerationMode, QuorateConfig};
use crate::report::{NullReporter, Reporter, ReporterObserver};
use crate::Result;

/// Output of a single-pass call that returned no text.
pub const NO_RESPONSE: &str = "No response";

/// Result of one facade call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Mode that produced the output.
    pub mode: GenerationMode,
    /// Model the requests were sent to.
    pub model: String,
    /// Text handed to the reporter and returned to the caller.
    pub output: String,
    /// Vote details, in self-consistency mode.
    pub consensus: Option<ConsensusResult>,
}

/// Generation facade.
///
/// Owns the provider handle, the sampler built from configuration, and a
/// reporter. Nothing here is process-global; construct as many as needed.
///
/// # Example
///
/// ```rust,ignore
/// let quorate = Quorate::new(Arc::new(generator), QuorateConfig::default())?
///     .with_reporter(Arc::new(TracingReporter));
///
/// let text = quorate.generate_text(ANALYTICAL_SYSTEM_PROMPT, DEFAULT_USER_PROMPT).await;
/// println!("{}", text);
/// ```
pub struct Quorate {
    config: QuorateConfig,
    generator: Arc<dyn Generator>,
    sampler: SelfConsistency,
    reporter: Arc<dyn Reporter>,
}

impl Quorate {
    /// Creates a facade over `generator`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(generator: Arc<dyn Generator>, config: QuorateConfig) -> Result<Self> {
        config.validate()?;
        let sampler = config.sampling.sampler();

        info!(
            "Quorate ready: model {}, {} samples via {}",
            config.model.name,
            sampler.n_samples(),
            generator.name()
        );

        Ok(Self {
            config,
            generator,
            sampler,
            reporter: Arc::new(NullReporter),
        })
    }

    /// Replaces the reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &QuorateConfig {
        &self.config
    }

    /// Builds the request sent for `user_prompt`.
    ///
    /// The system prompt becomes the provider's system instruction unless
    /// the configuration already sets one.
    pub fn request(&self, system_prompt: &str, user_prompt: &str) -> GenerationRequest {
        let mut options = self.config.generation.clone();
        if options.system_instruction.is_none() && !system_prompt.trim().is_empty() {
            options.system_instruction = Some(system_prompt.to_string());
        }

        GenerationRequest::new(&self.config.model.name, vec![user_prompt.to_string()])
            .with_config(options)
    }

    /// Generates in the configured mode and returns the output text.
    pub async fn generate_text(&self, system_prompt: &str, user_prompt: &str) -> String {
        self.generate(system_prompt, user_prompt, self.config.sampling.mode)
            .await
            .output
    }

    /// Generates in `mode` and returns the full report.
    ///
    /// The reporter always receives the prompts and the output before this
    /// returns. The system prompt reported is the instruction actually sent.
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        mode: GenerationMode,
    ) -> GenerationReport {
        let request = self.request(system_prompt, user_prompt);
        debug!("Generating in {} mode", mode);

        let (output, consensus) = match mode {
            GenerationMode::SelfConsistency => {
                let result = self.consensus(&request).await;
                (result.to_string(), Some(result))
            }
            GenerationMode::SinglePass => (self.single_pass(&request).await, None),
        };

        let sent_system = request
            .config
            .system_instruction
            .as_deref()
            .unwrap_or(system_prompt);
        self.reporter.output(sent_system, user_prompt, &output);

        GenerationReport {
            mode,
            model: request.model,
            output,
            consensus,
        }
    }

    /// Runs self-consistency sampling for `request`.
    pub async fn consensus(&self, request: &GenerationRequest) -> ConsensusResult {
        let observer = ReporterObserver(self.reporter.as_ref());
        let result = self
            .sampler
            .run(self.generator.as_ref(), request, &observer)
            .await;
        self.reporter.consensus(&result);
        result
    }

    /// Issues exactly one call. No retry, no delay.
    pub async fn single_pass(&self, request: &GenerationRequest) -> String {
        match self
            .sampler
            .runner()
            .call(self.generator.as_ref(), request)
            .await
        {
            GenerationResult::Text(text) => text,
            GenerationResult::Empty => NO_RESPONSE.to_string(),
            GenerationResult::Failed(reason) => {
                warn!("Single pass failed: {}", reason);
                format!("Single pass failed: {}", reason)
            }
        }
    }
}
