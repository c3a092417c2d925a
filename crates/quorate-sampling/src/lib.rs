//! # Self-Consistency Sampling
//!
//! Majority-vote answer selection over repeated LLM generations.
//!
//! ## Overview
//!
//! A single generation from a language model is a noisy estimate of the
//! answer. Self-consistency sampling issues the same prompt several times,
//! pulls one normalized scalar answer out of each completion, and keeps the
//! answer that the most samples agree on.
//!
//! Failures are part of the normal flow. A sample whose call fails, whose
//! completion is empty, or whose text carries no recognizable number still
//! produces exactly one outcome. Those outcomes never win the vote; they only
//! show up in the raw tally when nothing valid was produced at all.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────┐
//!   │               SelfConsistency                │
//!   │   n sequential samples, majority vote        │
//!   └──────────────────────┬───────────────────────┘
//!                          │ × n
//!                          ▼
//!   ┌──────────────────────────────────────────────┐
//!   │                 SampleRunner                 │
//!   │   one call, timeout, post-failure delay      │
//!   └──────────┬───────────────────────┬───────────┘
//!              ▼                       ▼
//!   ┌────────────────────┐   ┌────────────────────┐
//!   │  dyn Generator     │   │  AnswerExtractor   │
//!   │  (provider)        │   │  labeled / $ value │
//!   └────────────────────┘   └────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quorate_sampling::{GenerationRequest, SelfConsistency, NoopObserver};
//!
//! let request = GenerationRequest::new("gemini-2.5-flash", vec![question]);
//! let sampler = SelfConsistency::new(5);
//!
//! let result = sampler.run(&generator, &request, &NoopObserver).await;
//! println!("{}", result);
//! ```

pub mod consensus;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod runner;
pub mod testing;

pub use consensus::{
    ConsensusResult, NoopObserver, SampleObserver, SelfConsistency, VoteCount, VoteTally,
    DEFAULT_SAMPLES,
};
pub use error::GenerationError;
pub use extractor::{extract_final_answer, AnswerExtractor, ExtractedAnswer, NO_ANSWER};
pub use generator::{
    GenerationConfig, GenerationRequest, GenerationResponse, GenerationResult, Generator,
};
pub use runner::{SampleOutcome, SampleRunner, DEFAULT_FAILURE_DELAY};

/// Result type for generation calls.
pub type Result<T> = std::result::Result<T, GenerationError>;
