//! Audit Log Module
//!
//! Append-only plain-text ledger of every request line a client sent.
//!
//! ## Responsibilities
//! - Append one line per request, before the request is dispatched
//! - Serve `get log <n>` (last n lines) under the same lock as appends
//! - Never fail a request because the ledger is unavailable
//!
//! ## File Format
//! ```text
//! [2025-12-08 14:03:11] Client 127.0.0.1:50412 issued command: get trainer
//! [2025-12-08 14:03:15] Client 127.0.0.1:50412 issued command: post trainer Ash 1 4 7
//! ```
//! No rotation, no deletion, no structured fields.

mod entry;
mod ledger;

pub use entry::{AuditEntry, TIMESTAMP_FORMAT};
pub use ledger::{AuditLog, EMPTY_LOG_MESSAGE, NO_LOG_MESSAGE};
