//! Reporting boundary.
//!
//! The facade hands every sample outcome, the consensus summary, and the
//! final prompt/output pair to a [`Reporter`]. Reporting never changes
//! what is returned.

use quorate_sampling::{ConsensusResult, SampleObserver, SampleOutcome};
use tracing::info;

/// Receives progress and results from the facade.
///
/// All methods default to doing nothing.
pub trait Reporter: Send + Sync {
    /// One sample finished. `index` is zero-based.
    fn sample(&self, _index: usize, _outcome: &SampleOutcome) {}

    /// The vote over all samples is complete.
    fn consensus(&self, _result: &ConsensusResult) {}

    /// The final output is ready.
    fn output(&self, _system_prompt: &str, _user_prompt: &str, _output: &str) {}
}

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Reporter that logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn sample(&self, index: usize, outcome: &SampleOutcome) {
        info!(sample = index + 1, "{}", outcome);
    }

    fn consensus(&self, result: &ConsensusResult) {
        info!(consensus = result.is_consensus(), "{}", result);
    }

    fn output(&self, _system_prompt: &str, _user_prompt: &str, output: &str) {
        info!(bytes = output.len(), "Generation complete");
    }
}

/// Adapts a [`Reporter`] to the sampler's observer hook.
pub(crate) struct ReporterObserver<'a>(pub(crate) &'a dyn Reporter);

impl SampleObserver for ReporterObserver<'_> {
    fn on_sample(&self, index: usize, outcome: &SampleOutcome) {
        self.0.sample(index, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorate_sampling::ExtractedAnswer;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder {
        samples: Mutex<Vec<usize>>,
    }

    impl Reporter for Recorder {
        fn sample(&self, index: usize, _outcome: &SampleOutcome) {
            self.samples.lock().unwrap().push(index);
        }
    }

    #[test]
    fn test_observer_forwards_to_reporter() {
        let recorder = Recorder::default();
        let observer = ReporterObserver(&recorder);

        observer.on_sample(0, &SampleOutcome::Error);
        observer.on_sample(
            1,
            &SampleOutcome::Extracted(ExtractedAnswer::Value("3".to_string())),
        );

        assert_eq!(*recorder.samples.lock().unwrap(), vec![0, 1]);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_tracing_reporter_logs_each_event() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .finish();
        let outcome = SampleOutcome::Extracted(ExtractedAnswer::Value("60".to_string()));
        let result = ConsensusResult::from_outcomes(&[outcome.clone(), outcome.clone()]);

        tracing::subscriber::with_default(subscriber, || {
            TracingReporter.sample(1, &outcome);
            TracingReporter.consensus(&result);
            TracingReporter.output("system", "user", "Consensus: 60");
        });

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("sample=2"));
        assert!(logs.contains("consensus=true"));
        assert!(logs.contains("Consensus: 60"));
        assert!(logs.contains("Generation complete"));
    }

    #[test]
    fn test_default_methods_are_noops() {
        let reporter = NullReporter;
        reporter.sample(0, &SampleOutcome::Empty);
        reporter.consensus(&ConsensusResult::from_outcomes(&[]));
        reporter.output("system", "user", "output");
    }
}
