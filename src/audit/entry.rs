//! Audit entry formatting.

use std::fmt;
use std::net::SocketAddr;

use chrono::{DateTime, Local};

/// strftime pattern for entry timestamps (local time)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One line of the audit log
#[derive(Debug, Clone)]
pub struct AuditEntry<'a> {
    /// When the request was received
    pub timestamp: DateTime<Local>,

    /// Client address and port
    pub peer: SocketAddr,

    /// Raw command text, line ending already stripped
    pub command: &'a str,
}

impl<'a> AuditEntry<'a> {
    pub fn new(timestamp: DateTime<Local>, peer: SocketAddr, command: &'a str) -> Self {
        Self {
            timestamp,
            peer,
            command,
        }
    }
}

impl fmt::Display for AuditEntry<'_> {
    /// Renders without a trailing newline; embedded line breaks become
    /// spaces so one entry is always one line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Client {}:{} issued command: ",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.peer.ip(),
            self.peer.port()
        )?;
        for c in self.command.chars() {
            let c = if c == '\n' || c == '\r' { ' ' } else { c };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
