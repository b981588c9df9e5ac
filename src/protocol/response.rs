//! Response definitions
//!
//! Represents responses to clients.

/// Line that terminates every response on the wire
pub const END_SENTINEL: &str = "[END]";

/// Body sent in reply to `exit`
pub const FAREWELL_MESSAGE: &str = "Goodbye from server.";

/// A response to send to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Human-readable text; may span several lines
    pub body: String,

    /// Close the connection once this response is sent
    pub close: bool,
}

impl Response {
    /// Plain message; the connection stays open
    pub fn message(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            close: false,
        }
    }

    /// Reply to `exit`
    pub fn farewell() -> Self {
        Self {
            body: FAREWELL_MESSAGE.to_string(),
            close: true,
        }
    }

    /// Generic reply to an unrecognized command
    pub fn invalid() -> Self {
        Self::message("Invalid command.")
    }

    /// Reply to a recognized command with bad arguments
    pub fn rejected(reason: &str) -> Self {
        Self::message(format!("Invalid command: {}.", reason))
    }
}
