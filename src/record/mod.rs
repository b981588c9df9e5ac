//! Record Module
//!
//! Fixed-width binary records for the species catalog and the trainer file.
//!
//! ## Responsibilities
//! - Explicit encode/decode (never relies on in-memory layout)
//! - NUL-padded fixed-width text fields
//! - Positional record boundaries (no delimiters, no headers)
//!
//! ## File Format (schema version 1)
//! All integers and floats are 4 bytes, little-endian.
//! ```text
//! Species (244 bytes)
//! ┌────────┬──────────┬───────────┬───────────┬──────────────────┬───────────┬─────┐
//! │ id (4) │ name(50) │ type1(20) │ type2(20) │ 9 x i32 stats    │ color(20) │ ... │
//! └────────┴──────────┴───────────┴───────────┴──────────────────┴───────────┴─────┘
//!   ... has_gender(4) pr_male(f4) egg1(20) egg2(20) mega(4)
//!       height(f4) weight(f4) catch_rate(4) body_style(30)
//!
//! Trainer (82 bytes)
//! ┌────────┬──────────┬──────────────────────┬───────────┐
//! │ id (4) │ name(50) │ species_ids (6 x 4)  │ count (4) │
//! └────────┴──────────┴──────────────────────┴───────────┘
//! ```
//!
//! Any change to these layouts invalidates existing files; bump
//! [`SCHEMA_VERSION`] when that happens.

mod codec;
mod species;
mod trainer;

pub use codec::{get_fixed_str, put_fixed_str, read_block};
pub use species::{Species, SPECIES_RECORD_SIZE};
pub use trainer::{Trainer, TRAINER_RECORD_SIZE};

use crate::error::Result;

/// Version of the on-disk record layouts described above
pub const SCHEMA_VERSION: u16 = 1;

/// Maximum number of species a trainer can hold
pub const MAX_ROSTER: usize = 6;

/// Width of the name field in both record kinds
pub const NAME_LEN: usize = 50;

/// A record stored as a fixed-size block in a flat file
pub trait FixedRecord: Sized {
    /// Encoded size in bytes; every record of the kind has this size
    const SIZE: usize;

    /// Encode into exactly `SIZE` bytes
    fn encode(&self) -> Vec<u8>;

    /// Decode one record; `bytes` must be exactly `SIZE` long
    fn decode(bytes: &[u8]) -> Result<Self>;
}
