//! Terminal output.

use quorate_core::{Reporter, SampleOutcome};

const RULE_WIDTH: usize = 60;

/// Prints each sample as it lands, then the prompt/output block.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn sample(&self, index: usize, outcome: &SampleOutcome) {
        println!("Path {}: {}", index + 1, outcome);
    }

    fn output(&self, system_prompt: &str, user_prompt: &str, output: &str) {
        println!("{}", render(system_prompt, user_prompt, output));
    }
}

/// Formats the prompt and output between two rules.
pub fn render(system_prompt: &str, user_prompt: &str, output: &str) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    format!(
        "\n{rule}\nPROMPT:\n{}\n{}\n\nOUTPUT:\n{}\n{rule}",
        system_prompt.trim_end(),
        user_prompt.trim_end(),
        output
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout() {
        let text = render("system\n", "question\n", "Consensus: 143\nVotes: {\"143\": 5}");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "-".repeat(60));
        assert_eq!(lines[2], "PROMPT:");
        assert_eq!(lines[3], "system");
        assert_eq!(lines[4], "question");
        assert_eq!(lines[6], "OUTPUT:");
        assert_eq!(lines[7], "Consensus: 143");
        assert_eq!(lines[8], "Votes: {\"143\": 5}");
        assert_eq!(*lines.last().unwrap(), "-".repeat(60));
    }

    #[test]
    fn test_render_keeps_output_verbatim() {
        let text = render("s", "u", "No consensus (raw: {\"Error\": 5})");
        assert!(text.contains("OUTPUT:\nNo consensus (raw: {\"Error\": 5})\n"));
    }
}
