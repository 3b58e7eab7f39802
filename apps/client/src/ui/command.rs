use std::str::FromStr;

use thiserror::Error;

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pick the option with this label (`A`, `B`, ...).
    Select(String),
    /// Place the current comment into a 0-based rank slot.
    Place(usize),
    Submit,
    Next,
    Retry,
    ResetScore,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown command '{0}' (type h for help)")]
    Unknown(String),
    #[error("rank slots start at 1")]
    ZeroSlot,
}

pub const HELP: &str = "\
a..z      pick that option (pick <label> for s, n, r, q, h)
1..n      place the current comment at that rank
s         lock in guess
n         next video
r         try again after an error
reset     reset streak and score
h         show this help
q         quit";

/// Parse a line. Single-letter shortcuts win over option labels.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let input = line.trim().to_ascii_lowercase();
    if input.is_empty() {
        return Err(CommandError::Empty);
    }

    match input.as_str() {
        "s" | "submit" => return Ok(Command::Submit),
        "n" | "next" => return Ok(Command::Next),
        "r" | "retry" => return Ok(Command::Retry),
        "reset" => return Ok(Command::ResetScore),
        "h" | "?" | "help" => return Ok(Command::Help),
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    if let Some(label) = input.strip_prefix("pick ") {
        let label = label.trim();
        if is_label(label) {
            return Ok(Command::Select(label.to_ascii_uppercase()));
        }
        return Err(CommandError::Unknown(input));
    }

    if let Ok(rank) = usize::from_str(&input) {
        return match rank {
            0 => Err(CommandError::ZeroSlot),
            n => Ok(Command::Place(n - 1)),
        };
    }

    if is_label(&input) {
        return Ok(Command::Select(input.to_ascii_uppercase()));
    }

    Err(CommandError::Unknown(input))
}

fn is_label(s: &str) -> bool {
    !s.is_empty() && s.len() <= 2 && s.chars().all(|c| c.is_ascii_alphabetic())
}
