//! # Self-Consistency Integration Tests
//!
//! End-to-end runs of the sampler against a scripted generator.
//!
//! | Property | Test |
//! |----------|------|
//! | Majority wins, failures ignored | `test_majority_with_failures` |
//! | All failures give a raw tally | `test_all_failures_report_no_consensus` |
//! | Every sample is attempted | `test_no_short_circuit_on_failure` |
//! | Tie-break by sample order | `test_tie_breaks_by_sample_order` |
//! | One observation per sample | `test_observer_sees_every_sample` |

use std::sync::Mutex;
use std::time::Duration;

use quorate_sampling::testing::ScriptedGenerator;
use quorate_sampling::{
    ConsensusResult, GenerationConfig, GenerationRequest, NoopObserver, SampleObserver,
    SampleOutcome, SampleRunner, SelfConsistency, VoteTally,
};

fn request() -> GenerationRequest {
    GenerationRequest::new("gemini-2.5-flash", vec!["How many units to break even?".to_string()])
        .with_config(GenerationConfig::default().with_temperature(0.2))
}

fn fast_sampler(n: usize) -> SelfConsistency {
    SelfConsistency::new(n).with_runner(SampleRunner::new().with_failure_delay(Duration::ZERO))
}

#[derive(Default)]
struct RecordingObserver {
    seen: Mutex<Vec<(usize, String)>>,
}

impl SampleObserver for RecordingObserver {
    fn on_sample(&self, index: usize, outcome: &SampleOutcome) {
        self.seen.lock().unwrap().push((index, outcome.to_string()));
    }
}

// =============================================================================
// VOTING
// =============================================================================

#[tokio::test]
async fn test_majority_with_failures() {
    let generator = ScriptedGenerator::new()
        .text("Reasoning...\nFINAL: 60")
        .text("FINAL: $60")
        .text("Answer: 61")
        .fail("503 Service Unavailable")
        .empty();

    let result = fast_sampler(5).run(&generator, &request(), &NoopObserver).await;

    assert_eq!(
        result,
        ConsensusResult::Consensus {
            answer: "60".to_string(),
            votes: VoteTally::from_labels(["60", "60", "61"]),
        }
    );
}

#[tokio::test]
async fn test_all_failures_report_no_consensus() {
    let generator = ScriptedGenerator::new()
        .fail("timeout")
        .empty()
        .fail("timeout")
        .empty()
        .fail("timeout");

    let result = fast_sampler(5).run(&generator, &request(), &NoopObserver).await;

    // No consensus is a normal result, not an error.
    assert!(!result.is_consensus());
    assert_eq!(result.tally().count("Error"), 3);
    assert_eq!(result.tally().count("Empty"), 2);
    assert_eq!(result.tally().total(), 5);
}

#[tokio::test]
async fn test_unextractable_texts_report_no_consensus() {
    let generator = ScriptedGenerator::new()
        .text("I am not sure.")
        .text("It depends on the market.");

    let result = fast_sampler(2).run(&generator, &request(), &NoopObserver).await;

    assert_eq!(
        result.to_string(),
        r#"No consensus (raw: {"No answer extracted": 2})"#
    );
}

#[tokio::test]
async fn test_whitespace_texts_are_unextractable_not_empty() {
    let generator = ScriptedGenerator::new().text("   \n").text(" ");

    let result = fast_sampler(2).run(&generator, &request(), &NoopObserver).await;

    assert_eq!(
        result.to_string(),
        r#"No consensus (raw: {"No answer extracted": 2})"#
    );
}

#[tokio::test]
async fn test_tie_breaks_by_sample_order() {
    let generator = ScriptedGenerator::new().answers(["100", "200", "200", "100"]);
    let result = fast_sampler(4).run(&generator, &request(), &NoopObserver).await;
    assert_eq!(result.answer(), Some("100"));

    let generator = ScriptedGenerator::new().answers(["200", "100", "100", "200"]);
    let result = fast_sampler(4).run(&generator, &request(), &NoopObserver).await;
    assert_eq!(result.answer(), Some("200"));
}

#[tokio::test]
async fn test_identical_responses_give_identical_results() {
    let script = ["143", "142", "143", "142.86", "143"];

    let first = fast_sampler(5)
        .run(&ScriptedGenerator::new().answers(script), &request(), &NoopObserver)
        .await;
    let second = fast_sampler(5)
        .run(&ScriptedGenerator::new().answers(script), &request(), &NoopObserver)
        .await;

    assert_eq!(first, second);
    assert_eq!(first.answer(), Some("143"));
}

// =============================================================================
// SAMPLING DISCIPLINE
// =============================================================================

#[tokio::test]
async fn test_no_short_circuit_on_failure() {
    let generator = ScriptedGenerator::new()
        .fail("first")
        .fail("second")
        .answers(["5", "5", "5"]);

    let outcomes = fast_sampler(5)
        .collect(&generator, &request(), &NoopObserver)
        .await;

    assert_eq!(generator.calls(), 5);
    assert_eq!(outcomes.len(), 5);
    assert_eq!(outcomes[0], SampleOutcome::Error);
    assert_eq!(outcomes[4].answer(), Some("5"));
}

#[tokio::test]
async fn test_no_short_circuit_on_early_majority() {
    let generator = ScriptedGenerator::new().answers(["7", "7", "7", "7", "7", "7", "7"]);

    fast_sampler(7).run(&generator, &request(), &NoopObserver).await;

    assert_eq!(generator.calls(), 7);
}

#[tokio::test]
async fn test_every_sample_uses_same_request() {
    let generator = ScriptedGenerator::new().answers(["1", "2", "3"]);
    let req = request();

    fast_sampler(3).run(&generator, &req, &NoopObserver).await;

    let seen = generator.requests();
    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|r| r == &req));
}

#[tokio::test]
async fn test_observer_sees_every_sample() {
    let generator = ScriptedGenerator::new().text("FINAL: 9").fail("down").empty();
    let observer = RecordingObserver::default();

    fast_sampler(3).run(&generator, &request(), &observer).await;

    let seen = observer.seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            (0, "9".to_string()),
            (1, "Error".to_string()),
            (2, "Empty".to_string()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_failures_pause_between_samples() {
    let generator = ScriptedGenerator::new().fail("a").fail("b").text("FINAL: 1");
    let start = tokio::time::Instant::now();

    let result = SelfConsistency::new(3)
        .run(&generator, &request(), &NoopObserver)
        .await;

    assert_eq!(result.answer(), Some("1"));
    assert!(start.elapsed() >= Duration::from_secs(4));
}
