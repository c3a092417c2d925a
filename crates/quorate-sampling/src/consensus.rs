//! Majority-vote consensus over repeated samples.
//!
//! [`SelfConsistency`] runs the [`SampleRunner`] `n` times in sequence and
//! reduces the outcomes with [`ConsensusResult::from_outcomes`].
//!
//! # Voting Rules
//!
//! - Only extracted values vote; `Error`, `Empty` and unextractable
//!   outcomes are ignored
//! - The winner has the highest count
//! - Ties go to the value that appeared first in sample order
//! - With no valid votes the result carries the raw tally of every outcome
//!
//! "No consensus" is an ordinary return value, not an error.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::generator::{GenerationRequest, Generator};
use crate::runner::{SampleOutcome, SampleRunner};

/// Number of samples drawn when none is configured.
pub const DEFAULT_SAMPLES: usize = 5;

/// Count for a single answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCount {
    /// The answer label.
    pub answer: String,
    /// Number of samples that produced it.
    pub count: usize,
}

/// Frequency of each answer, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Counts, ordered by the first sample that produced each answer.
    pub entries: Vec<VoteCount>,
}

impl VoteTally {
    /// Counts labels, preserving first-appearance order.
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut entries: Vec<VoteCount> = Vec::new();

        for label in labels {
            match entries.iter_mut().find(|e| e.answer == label) {
                Some(entry) => entry.count += 1,
                None => entries.push(VoteCount {
                    answer: label.to_string(),
                    count: 1,
                }),
            }
        }

        Self { entries }
    }

    /// Returns the count for `answer` (0 if absent).
    pub fn count(&self, answer: &str) -> usize {
        self.entries
            .iter()
            .find(|e| e.answer == answer)
            .map_or(0, |e| e.count)
    }

    /// Total number of votes tallied.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Number of distinct answers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was tallied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry with the highest count.
    ///
    /// Ties resolve to the entry that appeared first.
    pub fn leader(&self) -> Option<&VoteCount> {
        self.entries.iter().fold(None, |best: Option<&VoteCount>, entry| match best {
            Some(b) if b.count >= entry.count => Some(b),
            _ => Some(entry),
        })
    }

    /// Iterates `(answer, count)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|e| (e.answer.as_str(), e.count))
    }
}

impl fmt::Display for VoteTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{}\": {}", entry.answer, entry.count)?;
        }
        write!(f, "}}")
    }
}

/// Outcome of a self-consistency run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsensusResult {
    /// At least one sample produced a valid answer.
    Consensus {
        /// The most frequent valid answer.
        answer: String,
        /// Counts over valid answers only.
        votes: VoteTally,
    },
    /// No sample produced a valid answer.
    NoConsensus {
        /// Counts over every outcome, including failures.
        raw: VoteTally,
    },
}

impl ConsensusResult {
    /// Reduces sample outcomes to a consensus.
    pub fn from_outcomes(outcomes: &[SampleOutcome]) -> Self {
        let votes = VoteTally::from_labels(outcomes.iter().filter_map(SampleOutcome::answer));

        match votes.leader().map(|leader| leader.answer.clone()) {
            Some(answer) => Self::Consensus { answer, votes },
            None => Self::NoConsensus {
                raw: VoteTally::from_labels(outcomes.iter().map(SampleOutcome::label)),
            },
        }
    }

    /// Returns the winning answer, if any.
    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Consensus { answer, .. } => Some(answer),
            Self::NoConsensus { .. } => None,
        }
    }

    /// Returns the tally carried by this result.
    ///
    /// Valid votes for a consensus, the raw tally otherwise.
    pub fn tally(&self) -> &VoteTally {
        match self {
            Self::Consensus { votes, .. } => votes,
            Self::NoConsensus { raw } => raw,
        }
    }

    /// Returns true if a consensus answer exists.
    pub fn is_consensus(&self) -> bool {
        matches!(self, Self::Consensus { .. })
    }
}

impl fmt::Display for ConsensusResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Consensus { answer, votes } => {
                write!(f, "Consensus: {}\nVotes: {}", answer, votes)
            }
            Self::NoConsensus { raw } => write!(f, "No consensus (raw: {})", raw),
        }
    }
}

/// Receives each sample outcome as soon as it is produced.
pub trait SampleObserver: Send + Sync {
    /// Called once per sample. `index` is zero-based.
    fn on_sample(&self, index: usize, outcome: &SampleOutcome);
}

/// Observer that ignores every sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SampleObserver for NoopObserver {
    fn on_sample(&self, _index: usize, _outcome: &SampleOutcome) {}
}

/// Self-consistency sampler.
///
/// Draws `n_samples` sequential samples for one request and votes on the
/// extracted answers. Every sample is attempted; neither failures nor an
/// early majority stop the run.
#[derive(Debug, Clone)]
pub struct SelfConsistency {
    runner: SampleRunner,
    n_samples: usize,
}

impl Default for SelfConsistency {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLES)
    }
}

impl SelfConsistency {
    /// Creates a sampler drawing `n_samples` with a default runner.
    pub fn new(n_samples: usize) -> Self {
        Self {
            runner: SampleRunner::new(),
            n_samples,
        }
    }

    /// Replaces the sample runner.
    pub fn with_runner(mut self, runner: SampleRunner) -> Self {
        self.runner = runner;
        self
    }

    /// Returns the number of samples drawn per run.
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Returns the sample runner.
    pub fn runner(&self) -> &SampleRunner {
        &self.runner
    }

    /// Draws every sample and returns the outcomes in issuance order.
    pub async fn collect(
        &self,
        generator: &dyn Generator,
        request: &GenerationRequest,
        observer: &dyn SampleObserver,
    ) -> Vec<SampleOutcome> {
        let mut outcomes = Vec::with_capacity(self.n_samples);

        for index in 0..self.n_samples {
            let outcome = self.runner.run(generator, request).await;
            info!("Path {}: {}", index + 1, outcome);
            observer.on_sample(index, &outcome);
            outcomes.push(outcome);
        }

        outcomes
    }

    /// Draws every sample and votes on the result.
    pub async fn run(
        &self,
        generator: &dyn Generator,
        request: &GenerationRequest,
        observer: &dyn SampleObserver,
    ) -> ConsensusResult {
        debug!(
            "Drawing {} samples from {} for model {}",
            self.n_samples,
            generator.name(),
            request.model
        );

        let outcomes = self.collect(generator, request, observer).await;
        let result = ConsensusResult::from_outcomes(&outcomes);

        match &result {
            ConsensusResult::Consensus { answer, votes } => {
                info!("Consensus {} with votes {}", answer, votes)
            }
            ConsensusResult::NoConsensus { raw } => info!("No consensus, raw {}", raw),
        }

        result
    }
}
