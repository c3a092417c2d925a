//! Configuration types for quorate.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use quorate_sampling::{GenerationConfig, SampleRunner, SelfConsistency, DEFAULT_SAMPLES};
use serde::{Deserialize, Serialize};

use crate::error::QuorateError;
use crate::Result;

/// Configuration for the generation facade.
///
/// Every section falls back to its defaults when omitted from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuorateConfig {
    /// Model selection.
    pub model: ModelConfig,

    /// Options passed through to the provider.
    ///
    /// Fields left out of a `[generation]` table are sent as provider
    /// defaults, not as the values below.
    pub generation: GenerationConfig,

    /// Sampling behaviour.
    pub sampling: SamplingConfig,

    /// Provider connection settings.
    pub provider: ProviderConfig,
}

impl Default for QuorateConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            generation: GenerationConfig::default()
                .with_temperature(0.2)
                .with_top_p(0.5)
                .with_top_k(10)
                .with_max_output_tokens(5000),
            sampling: SamplingConfig::default(),
            provider: ProviderConfig::default(),
        }
    }
}

impl QuorateConfig {
    /// Loads and validates a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates TOML configuration text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks the configuration for values the sampler cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.model.name.trim().is_empty() {
            return Err(QuorateError::Config("model.name must not be empty".to_string()));
        }
        if self.sampling.n_samples == 0 {
            return Err(QuorateError::Config(
                "sampling.n_samples must be at least 1".to_string(),
            ));
        }
        if self.sampling.call_timeout_secs == Some(0) {
            return Err(QuorateError::Config(
                "sampling.call_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Model selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier sent to the provider.
    pub name: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gemini-2.5-flash".to_string(),
        }
    }
}

/// How answers are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    /// Sample several times and take the majority answer.
    #[default]
    SelfConsistency,
    /// One call, text returned as-is.
    SinglePass,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::SelfConsistency => write!(f, "self-consistency"),
            GenerationMode::SinglePass => write!(f, "single-pass"),
        }
    }
}

/// Sampling behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Generation mode.
    pub mode: GenerationMode,

    /// Samples drawn in self-consistency mode.
    pub n_samples: usize,

    /// Pause after a failed sample, in milliseconds.
    pub failure_delay_ms: u64,

    /// Upper bound on a single provider call, in seconds. `None` disables it.
    pub call_timeout_secs: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            mode: GenerationMode::SelfConsistency,
            n_samples: DEFAULT_SAMPLES,
            failure_delay_ms: 2000,
            call_timeout_secs: Some(60),
        }
    }
}

impl SamplingConfig {
    /// Builds the sample runner described by this section.
    pub fn runner(&self) -> SampleRunner {
        let runner =
            SampleRunner::new().with_failure_delay(Duration::from_millis(self.failure_delay_ms));
        match self.call_timeout_secs {
            Some(secs) => runner.with_call_timeout(Duration::from_secs(secs)),
            None => runner,
        }
    }

    /// Builds the self-consistency sampler described by this section.
    pub fn sampler(&self) -> SelfConsistency {
        SelfConsistency::new(self.n_samples).with_runner(self.runner())
    }
}

/// Provider connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API base URL.
    pub base_url: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QuorateConfig::default();
        assert_eq!(config.model.name, "gemini-2.5-flash");
        assert_eq!(config.sampling.n_samples, 5);
        assert_eq!(config.sampling.failure_delay_ms, 2000);
        assert_eq!(config.sampling.mode, GenerationMode::SelfConsistency);
        assert_eq!(config.generation.temperature, Some(0.2));
        assert_eq!(config.generation.top_k, Some(10));
        assert_eq!(config.provider.api_key_env, "GEMINI_API_KEY");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = QuorateConfig::from_toml_str(
            r#"
            [sampling]
            n_samples = 9
            mode = "single-pass"
            "#,
        )
        .unwrap();

        assert_eq!(config.sampling.n_samples, 9);
        assert_eq!(config.sampling.mode, GenerationMode::SinglePass);
        assert_eq!(config.sampling.failure_delay_ms, 2000);
        assert_eq!(config.model.name, "gemini-2.5-flash");
        assert_eq!(config.generation.max_output_tokens, Some(5000));
    }

    #[test]
    fn test_zero_samples_rejected() {
        let err = QuorateConfig::from_toml_str("[sampling]\nn_samples = 0\n").unwrap_err();
        assert!(matches!(err, QuorateError::Config(_)));
    }

    #[test]
    fn test_empty_model_rejected() {
        let mut config = QuorateConfig::default();
        config.model.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let err = QuorateConfig::from_toml_str("[sampling\nn_samples = 3").unwrap_err();
        assert!(matches!(err, QuorateError::ConfigParse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = QuorateConfig::default();
        let text = config.to_toml_string().unwrap();
        let parsed = QuorateConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_sampler_from_config() {
        let sampling = SamplingConfig {
            n_samples: 3,
            failure_delay_ms: 10,
            call_timeout_secs: None,
            ..SamplingConfig::default()
        };
        let sampler = sampling.sampler();
        assert_eq!(sampler.n_samples(), 3);
        assert_eq!(sampler.runner().failure_delay(), Duration::from_millis(10));
        assert!(sampler.runner().call_timeout().is_none());
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(GenerationMode::SelfConsistency.to_string(), "self-consistency");
        assert_eq!(GenerationMode::SinglePass.to_string(), "single-pass");
    }
}
