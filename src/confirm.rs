//! Confirmation prompts
//!
//! Destructive actions (clearing a day) are gated by the caller asking a
//! [`Confirmation`]. The stores never prompt on their own.

use std::io::{BufRead, Write};

/// Yes/no question to the user
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Asks on the terminal; anything but `y`/`yes` declines
#[derive(Debug, Default)]
pub struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        let stdin = std::io::stdin();
        let mut stderr = std::io::stderr();
        ask(prompt, &mut stdin.lock(), &mut stderr)
    }
}

/// Confirms without asking (`--yes`)
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirmation for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

fn ask(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> bool {
    if write!(output, "{} [y/N] ", prompt).and_then(|_| output.flush()).is_err() {
        return false;
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(text: &str) -> bool {
        let mut input = std::io::Cursor::new(text.as_bytes().to_vec());
        let mut output = Vec::new();
        ask("Clear all logs for today?", &mut input, &mut output)
    }

    #[test]
    fn test_yes_answers() {
        assert!(answer("y\n"));
        assert!(answer("YES\n"));
        assert!(answer("  yes  \n"));
    }

    #[test]
    fn test_other_answers_decline() {
        assert!(!answer("n\n"));
        assert!(!answer("\n"));
        assert!(!answer(""));
        assert!(!answer("sure\n"));
    }

    #[test]
    fn test_prompt_written() {
        let mut input = std::io::Cursor::new(b"n\n".to_vec());
        let mut output = Vec::new();
        ask("Clear?", &mut input, &mut output);
        assert_eq!(String::from_utf8(output).unwrap(), "Clear? [y/N] ");
    }

    #[test]
    fn test_assume_yes() {
        assert!(AssumeYes.confirm("anything"));
    }
}
