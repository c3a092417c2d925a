//! Command-line arguments and how they map onto configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use quorate_core::prompts::{PromptStyle, DEFAULT_USER_PROMPT};
use quorate_core::{GenerationMode, QuorateConfig};

/// Config file picked up when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config/quorate.toml";

#[derive(Debug, Parser)]
#[command(name = "quorate")]
#[command(about = "Quorate - self-consistency answers from hosted LLMs")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ask a question (default)
    Ask(AskArgs),
    /// Validate configuration and print the effective settings
    Check,
}

#[derive(Debug, Default, Args)]
pub struct AskArgs {
    /// Model name, overrides the config file
    #[arg(short, long)]
    pub model: Option<String>,

    /// Number of samples for self-consistency
    #[arg(short = 'n', long)]
    pub samples: Option<usize>,

    /// Issue one call instead of sampling
    #[arg(long)]
    pub single: bool,

    /// Question text
    #[arg(short, long, conflicts_with = "prompt_file")]
    pub prompt: Option<String>,

    /// Read the question from a file
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,

    /// System prompt text, overrides --style
    #[arg(long)]
    pub system: Option<String>,

    /// Built-in system prompt
    #[arg(long, value_enum, default_value_t = Style::Analytical)]
    pub style: Style,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Style {
    #[default]
    Analytical,
    SelfConsistency,
}

impl From<Style> for PromptStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Analytical => PromptStyle::Analytical,
            Style::SelfConsistency => PromptStyle::SelfConsistency,
        }
    }
}

impl AskArgs {
    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut QuorateConfig) {
        if let Some(model) = &self.model {
            config.model.name = model.clone();
        }
        if let Some(n) = self.samples {
            config.sampling.n_samples = n;
        }
        if self.single {
            config.sampling.mode = GenerationMode::SinglePass;
        }
    }

    pub fn system_prompt(&self) -> String {
        match &self.system {
            Some(text) => text.clone(),
            None => PromptStyle::from(self.style).system_prompt().to_string(),
        }
    }

    pub fn user_prompt(&self) -> Result<String> {
        if let Some(text) = &self.prompt {
            return Ok(text.clone());
        }
        match &self.prompt_file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read prompt file {}", path.display())),
            None => Ok(DEFAULT_USER_PROMPT.to_string()),
        }
    }
}

/// Loads `path`, or the default config file if present, or built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<QuorateConfig> {
    match path {
        Some(path) => QuorateConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => QuorateConfig::load(DEFAULT_CONFIG_PATH)
            .with_context(|| format!("Failed to load config {}", DEFAULT_CONFIG_PATH)),
        None => Ok(QuorateConfig::default()),
    }
}
