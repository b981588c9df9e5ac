//! # RosterDB
//!
//! A threaded TCP record server with:
//! - A read-only species catalog and a mutable trainer collection
//! - Fixed-width binary record files, scanned linearly
//! - One coarse lock per shared file (trainers, audit log)
//! - Crash-safe deletes via temp file + rename
//! - A line-based text protocol with `[END]`-terminated responses
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   TCP Acceptor (Server)                      │
//! │          one detached worker thread per connection           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │            Connection Worker (line → log → dispatch)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Dispatcher                             │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │   RecordStore   │                │    AuditLog     │
//!   │  (Mutex, CRUD)  │                │ (Mutex, append) │
//!   └────────┬────────┘                └─────────────────┘
//!            │
//!     ┌──────┴───────┐
//!     ▼              ▼
//!  trainers.bin   species.bin (read-only)
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod store;
pub mod audit;
pub mod protocol;
pub mod dispatcher;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RosterError, Result};
pub use config::Config;
pub use dispatcher::Dispatcher;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of RosterDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
