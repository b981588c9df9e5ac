//! Storage Module
//!
//! File-backed record storage: a read-only species catalog and a mutable
//! trainer collection.
//!
//! ## Responsibilities
//! - Linear-scan lookups over fixed-size record files
//! - Validate trainer rosters against the catalog at write time
//! - Serialize every trainer operation behind one coarse lock
//! - Crash-safe deletes (temp file + rename)
//!
//! ## Concurrency
//! ```text
//!   worker ─┐
//!   worker ─┼──► RecordStore ──► Mutex<TrainerFile> ──► trainers.bin
//!   worker ─┘         │
//!                     └────────► SpeciesCatalog (no lock, read-only)
//! ```
//! Reads and writes of the trainer file exclude each other; there is no
//! reader/writer split and no per-record locking.

mod catalog;
mod manager;
mod scan;
mod trainers;

pub use catalog::SpeciesCatalog;
pub use manager::RecordStore;
pub use scan::RecordScan;
