//! Built-in prompts.
//!
//! Both system prompts ask the model to finish with a `FINAL: <answer>`
//! line, which the labeled extraction pattern picks up.

use serde::{Deserialize, Serialize};

/// Default system prompt.
pub const ANALYTICAL_SYSTEM_PROMPT: &str = "\
You are a careful analytical assistant.

Goal: Produce a correct and verifiable final answer.

Rules:
- Think privately, do not reveal hidden reasoning.
- Output must end with:
  FINAL: <answer>
- Keep FINAL concise and unambiguous.
- State minimal assumptions if required.
";

/// System prompt tuned for independent sampling.
pub const SELF_CONSISTENCY_SYSTEM_PROMPT: &str = "\
You are a careful analytical reasoner.

Goal: Produce a single correct quantitative or factual answer.

Rules:
- You may internally explore multiple solution paths.
- Do NOT expose hidden reasoning.
- End output with exactly one line in this format:
  FINAL: <answer>
- The FINAL answer must be unique and concise.
- If assumptions are required, state them briefly before FINAL.
- Do not output multiple possible answers.
";

/// Default question.
pub const DEFAULT_USER_PROMPT: &str = "\
A company has fixed costs of $10,000 per month and variable costs of $50 per unit.
If each unit sells for $120, how many units must be sold to break even?
Provide a single numerical answer.
";

/// Selects one of the built-in system prompts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptStyle {
    /// [`ANALYTICAL_SYSTEM_PROMPT`].
    #[default]
    Analytical,
    /// [`SELF_CONSISTENCY_SYSTEM_PROMPT`].
    SelfConsistency,
}

impl PromptStyle {
    /// Returns the system prompt text for this style.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            PromptStyle::Analytical => ANALYTICAL_SYSTEM_PROMPT,
            PromptStyle::SelfConsistency => SELF_CONSISTENCY_SYSTEM_PROMPT,
        }
    }
}
