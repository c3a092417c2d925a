//! Answer extraction from free-form model text.
//!
//! Applies an ordered list of recognition patterns and returns the first
//! match of the first pattern that matches anywhere in the text:
//!
//! | Priority | Pattern | Example |
//! |----------|---------|---------|
//! | 1 | Labeled value (`total`, `final`, `answer`, `result`, `amount`) | `FINAL: $1,234.50` |
//! | 2 | Currency-prefixed value | `costs $42 each` |
//!
//! Later numbers in the same text are ignored, even when a later one is
//! the "real" answer. Callers that need smarter disambiguation should shape
//! the prompt so the labeled answer is the first labeled number.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Marker returned when no pattern matches.
pub const NO_ANSWER: &str = "No answer extracted";

/// Normalized answer pulled from model text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtractedAnswer {
    /// Numeric literal with thousands separators removed.
    Value(String),
    /// No pattern matched.
    Unextractable,
}

impl ExtractedAnswer {
    /// Returns the value, if one was extracted.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unextractable => None,
        }
    }

    /// Returns true if a value was extracted.
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl fmt::Display for ExtractedAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{}", v),
            Self::Unextractable => write!(f, "{}", NO_ANSWER),
        }
    }
}

/// Recognition pattern. Capture group 1 holds the numeric literal.
struct AnswerPattern {
    pattern: Regex,
    description: &'static str,
}

/// Extracts a single scalar answer from model output.
pub struct AnswerExtractor {
    patterns: Vec<AnswerPattern>,
}

impl AnswerExtractor {
    /// Creates an extractor with the labeled and currency patterns.
    pub fn new() -> Self {
        Self {
            patterns: Self::build_patterns(),
        }
    }

    fn build_patterns() -> Vec<AnswerPattern> {
        vec![
            AnswerPattern {
                pattern: Regex::new(
                    r"(?i)(?:total|final|answer|result|amount)[:\s]*[$€£¥]?([0-9][0-9,]*\.?[0-9]*)",
                )
                .expect("labeled answer pattern is valid"),
                description: "labeled value",
            },
            AnswerPattern {
                pattern: Regex::new(r"[$€£¥]([0-9][0-9,]*\.?[0-9]*)")
                    .expect("currency pattern is valid"),
                description: "currency value",
            },
        ]
    }

    /// Extracts the answer from `text`.
    ///
    /// Pure: the same text always yields the same answer.
    pub fn extract(&self, text: &str) -> ExtractedAnswer {
        for pattern in &self.patterns {
            if let Some(literal) = pattern.pattern.captures(text).and_then(|c| c.get(1)) {
                let value = literal.as_str().replace(',', "").trim().to_string();
                tracing::trace!("Matched {}: {}", pattern.description, value);
                return ExtractedAnswer::Value(value);
            }
        }
        ExtractedAnswer::Unextractable
    }
}

impl Default for AnswerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the answer from `text` with a shared default extractor.
pub fn extract_final_answer(text: &str) -> ExtractedAnswer {
    static EXTRACTOR: OnceLock<AnswerExtractor> = OnceLock::new();
    EXTRACTOR.get_or_init(AnswerExtractor::new).extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(v: &str) -> ExtractedAnswer {
        ExtractedAnswer::Value(v.to_string())
    }

    #[test]
    fn test_labeled_currency_with_separators() {
        assert_eq!(extract_final_answer("Final answer: $1,234.50"), value("1234.50"));
    }

    #[test]
    fn test_final_line_format() {
        let text = "Contribution margin is 70 per unit.\nFINAL: 143";
        assert_eq!(extract_final_answer(text), value("143"));
    }

    #[test]
    fn test_each_label_word() {
        for label in ["total", "final", "answer", "result", "amount"] {
            let text = format!("{}: 7", label);
            assert_eq!(extract_final_answer(&text), value("7"), "label {}", label);
        }
    }

    #[test]
    fn test_label_is_case_insensitive() {
        assert_eq!(extract_final_answer("TOTAL 99"), value("99"));
        assert_eq!(extract_final_answer("Result:12.5"), value("12.5"));
    }

    #[test]
    fn test_unlabeled_currency_fallback() {
        assert_eq!(extract_final_answer("The widget costs $42 in stores"), value("42"));
    }

    #[test]
    fn test_other_currency_symbols() {
        assert_eq!(extract_final_answer("It costs €1,500 overall"), value("1500"));
        assert_eq!(extract_final_answer("Amount: £3.75"), value("3.75"));
    }

    #[test]
    fn test_no_numeric_content() {
        let answer = extract_final_answer("I cannot determine that from the question.");
        assert_eq!(answer, ExtractedAnswer::Unextractable);
        assert_eq!(answer.to_string(), NO_ANSWER);
    }

    #[test]
    fn test_unlabeled_plain_number_is_not_extracted() {
        assert_eq!(
            extract_final_answer("The answer is 42"),
            ExtractedAnswer::Unextractable
        );
    }

    #[test]
    fn test_first_labeled_match_wins() {
        let text = "Result: 50 after step one. Final: 60";
        assert_eq!(extract_final_answer(text), value("50"));
    }

    #[test]
    fn test_labeled_beats_earlier_currency() {
        let text = "Price is $120 per unit. FINAL: 143";
        assert_eq!(extract_final_answer(text), value("143"));
    }

    #[test]
    fn test_label_inside_word_matches() {
        let text = "Subtotal: $5, then FINAL: 60";
        assert_eq!(extract_final_answer(text), value("5"));
    }

    #[test]
    fn test_decimal_point_preserved() {
        assert_eq!(extract_final_answer("total: 10.00"), value("10.00"));
        assert_eq!(extract_final_answer("FINAL: 143."), value("143."));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = AnswerExtractor::new();
        let text = "Answer: $2,000";
        assert_eq!(extractor.extract(text), extractor.extract(text));
        assert_eq!(extractor.extract(text), value("2000"));
    }

    #[test]
    fn test_extracted_answer_accessors() {
        assert_eq!(value("5").value(), Some("5"));
        assert!(value("5").is_value());
        assert_eq!(ExtractedAnswer::Unextractable.value(), None);
    }
}
