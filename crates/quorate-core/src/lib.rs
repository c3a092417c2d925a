//! # Quorate Core
//!
//! Generation facade for self-consistency querying of hosted LLMs.
//!
//! ## Modes
//!
//! | Mode | Calls | Output |
//! |------|-------|--------|
//! | Self-consistency | `n_samples`, sequential | `Consensus: <answer>` plus vote counts, or the raw tally |
//! | Single pass | exactly one | model text, `No response`, or `Single pass failed: <reason>` |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                        Quorate                          │
//! │   config ─► mode ─► request ─► output ─► Reporter       │
//! └───────────────┬─────────────────────────────┬───────────┘
//!                 │ self-consistency            │ single pass
//!                 ▼                             ▼
//!        ┌──────────────────┐          ┌──────────────────┐
//!        │ SelfConsistency  │          │   SampleRunner   │
//!        │  (n × runner)    │          │    (one call)    │
//!        └────────┬─────────┘          └────────┬─────────┘
//!                 └──────────────┬──────────────┘
//!                                ▼
//!                        ┌───────────────┐
//!                        │ dyn Generator │
//!                        └───────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quorate_core::{Quorate, QuorateConfig, TracingReporter};
//!
//! let config = QuorateConfig::load("quorate.toml")?;
//! let quorate = Quorate::new(generator, config)?.with_reporter(Arc::new(TracingReporter));
//!
//! let output = quorate.generate_text(system_prompt, user_prompt).await;
//! ```
//!
//! ## Failure Semantics
//!
//! - Only construction and configuration loading return errors
//! - Provider failures become `Error` samples or a `Single pass failed` string
//! - "No consensus" is a successful result carrying the raw tally

mod config;
mod error;
pub mod prompts;
mod quorate;
mod report;

pub use config::{GenerationMode, ModelConfig, ProviderConfig, QuorateConfig, SamplingConfig};
pub use error::QuorateError;
pub use quorate::{GenerationReport, Quorate, NO_RESPONSE};
pub use report::{NullReporter, Reporter, TracingReporter};

// Re-export sampling types for convenience
pub use quorate_sampling::{
    ConsensusResult, GenerationConfig, GenerationRequest, Generator, SampleOutcome, VoteTally,
};

/// Core result type for quorate operations.
pub type Result<T> = std::result::Result<T, QuorateError>;
