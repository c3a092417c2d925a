//! Deterministic generator for tests.
//!
//! [`ScriptedGenerator`] replays a fixed queue of responses and counts the
//! calls it receives, so sampling logic can be exercised without a network.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::generator::{GenerationRequest, GenerationResponse, Generator};
use crate::{GenerationError, Result};

/// A single scripted reply.
#[derive(Debug, Clone)]
enum Scripted {
    Text(String),
    Empty,
    Fail(String),
}

/// Generator that replays scripted responses in order.
///
/// Once the script runs out every further call returns an empty response.
///
/// # Example
///
/// ```rust
/// use quorate_sampling::testing::ScriptedGenerator;
///
/// let generator = ScriptedGenerator::new()
///     .text("FINAL: 60")
///     .fail("503")
///     .empty();
/// assert_eq!(generator.remaining(), 3);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<GenerationRequest>>,
    calls: AtomicUsize,
    latency: Option<Duration>,
}

impl ScriptedGenerator {
    /// Creates an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, reply: Scripted) -> Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
        self
    }

    /// Queues a text response.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.push(Scripted::Text(text.into()))
    }

    /// Queues a response without text.
    pub fn empty(self) -> Self {
        self.push(Scripted::Empty)
    }

    /// Queues a provider failure.
    pub fn fail(self, reason: impl Into<String>) -> Self {
        self.push(Scripted::Fail(reason.into()))
    }

    /// Queues one `FINAL: <answer>` response per answer.
    pub fn answers<'a>(self, answers: impl IntoIterator<Item = &'a str>) -> Self {
        answers
            .into_iter()
            .fold(self, |g, a| g.text(format!("FINAL: {}", a)))
    }

    /// Delays every call by `latency` before replying.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of scripted replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let reply = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or(Scripted::Empty);

        match reply {
            Scripted::Text(text) => Ok(GenerationResponse::text(text)),
            Scripted::Empty => Ok(GenerationResponse::empty()),
            Scripted::Fail(reason) => Err(GenerationError::Other(reason)),
        }
    }
}
