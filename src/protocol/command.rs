//! Command definitions
//!
//! Turns a request line into a typed command. Arity and roster-size
//! violations are caught here and never reach the store.

use crate::record::MAX_ROSTER;

/// Tokens kept per request line; the rest are dropped
pub const MAX_TOKENS: usize = 20;

/// Lines returned by `get log` when no positive count is given
pub const DEFAULT_LOG_LINES: usize = 10;

/// A parsed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line
    Empty,

    /// Close the connection after replying
    Exit,

    /// Last `lines` lines of the audit log
    GetLog { lines: usize },

    /// Summary of every trainer
    ListTrainers,

    /// One trainer with its roster resolved
    GetTrainer { id: i32 },

    /// Create a trainer
    PostTrainer { name: String, species: Vec<i32> },

    /// Replace a trainer's roster
    PutTrainer { id: i32, species: Vec<i32> },

    /// Remove a trainer
    DeleteTrainer { id: i32 },

    /// Recognized keyword with bad arguments
    Rejected { reason: String },

    /// Anything else
    Unknown,
}

/// Split on whitespace, keeping at most [`MAX_TOKENS`] tokens
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().take(MAX_TOKENS).collect()
}

impl Command {
    /// Tokenize and parse one request line (line ending already stripped)
    pub fn parse(line: &str) -> Self {
        Self::from_tokens(&tokenize(line))
    }

    /// Parse an already tokenized request; keywords are case-sensitive
    pub fn from_tokens(tokens: &[&str]) -> Self {
        match tokens {
            [] => Command::Empty,
            ["exit", ..] => Command::Exit,

            ["get", "log", count] => Command::GetLog {
                lines: parse_log_lines(count),
            },
            ["get", "log", ..] => rejected("usage: get log <n>"),

            ["get", "trainer"] => Command::ListTrainers,
            ["get", "trainer", id] => match parse_id(id) {
                Ok(id) => Command::GetTrainer { id },
                Err(reason) => Command::Rejected { reason },
            },
            ["get", "trainer", ..] => rejected("usage: get trainer [<id>]"),

            ["post", "trainer", name, ids @ ..] => match parse_roster(ids) {
                Ok(species) => Command::PostTrainer {
                    name: name.to_string(),
                    species,
                },
                Err(reason) => Command::Rejected { reason },
            },
            ["post", "trainer"] => rejected("usage: post trainer <name> <species id>..."),

            ["put", "trainer", id, ids @ ..] => {
                match parse_id(id).and_then(|id| parse_roster(ids).map(|s| (id, s))) {
                    Ok((id, species)) => Command::PutTrainer { id, species },
                    Err(reason) => Command::Rejected { reason },
                }
            }
            ["put", "trainer"] => rejected("usage: put trainer <id> <species id>..."),

            ["delete", "trainer", id] => match parse_id(id) {
                Ok(id) => Command::DeleteTrainer { id },
                Err(reason) => Command::Rejected { reason },
            },
            ["delete", "trainer", ..] => rejected("usage: delete trainer <id>"),

            _ => Command::Unknown,
        }
    }

    /// True for the command that ends the connection
    pub fn is_exit(&self) -> bool {
        matches!(self, Command::Exit)
    }
}

fn rejected(reason: &str) -> Command {
    Command::Rejected {
        reason: reason.to_string(),
    }
}

fn parse_id(token: &str) -> Result<i32, String> {
    token
        .parse::<i32>()
        .map_err(|_| format!("'{}' is not a valid id", token))
}

/// Non-positive or non-numeric counts fall back to the default
fn parse_log_lines(token: &str) -> usize {
    match token.parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => DEFAULT_LOG_LINES,
    }
}

fn parse_roster(tokens: &[&str]) -> Result<Vec<i32>, String> {
    if tokens.is_empty() {
        return Err("a trainer needs at least one species id".to_string());
    }
    if tokens.len() > MAX_ROSTER {
        return Err(format!(
            "a trainer cannot have more than {} species",
            MAX_ROSTER
        ));
    }
    tokens.iter().map(|t| parse_id(t)).collect()
}
