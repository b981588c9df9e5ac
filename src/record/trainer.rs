//! Trainer record.

use bytes::{Buf, BufMut, BytesMut};

use super::{get_fixed_str, put_fixed_str, FixedRecord, MAX_ROSTER, NAME_LEN};
use crate::error::{Result, RosterError};

/// Size of one encoded trainer record
pub const TRAINER_RECORD_SIZE: usize = 4 + NAME_LEN + 4 * MAX_ROSTER + 4;

/// A trainer and the species ids on its roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trainer {
    /// Assigned by the store (max existing id + 1)
    pub id: i32,

    /// Display name, at most `NAME_LEN - 1` bytes once stored
    pub name: String,

    /// Populated roster slots, in order
    pub species: Vec<i32>,
}

impl Trainer {
    pub fn new(id: i32, name: impl Into<String>, species: Vec<i32>) -> Self {
        Self {
            id,
            name: name.into(),
            species,
        }
    }

    /// Number of populated roster slots
    pub fn count(&self) -> usize {
        self.species.len()
    }
}

impl FixedRecord for Trainer {
    const SIZE: usize = TRAINER_RECORD_SIZE;

    /// Slots past `MAX_ROSTER` are not representable; the store rejects
    /// such rosters before they get here.
    fn encode(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(TRAINER_RECORD_SIZE);
        let count = self.species.len().min(MAX_ROSTER);

        buf.put_i32_le(self.id);
        put_fixed_str(&mut buf, &self.name, NAME_LEN);
        for slot in 0..MAX_ROSTER {
            buf.put_i32_le(if slot < count { self.species[slot] } else { 0 });
        }
        buf.put_i32_le(count as i32);

        buf.to_vec()
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != TRAINER_RECORD_SIZE {
            return Err(RosterError::Codec(format!(
                "trainer record must be {} bytes, got {}",
                TRAINER_RECORD_SIZE,
                bytes.len()
            )));
        }

        let mut buf = bytes;
        let id = buf.get_i32_le();
        let name = get_fixed_str(&mut buf, NAME_LEN);

        let mut slots = [0i32; MAX_ROSTER];
        for slot in slots.iter_mut() {
            *slot = buf.get_i32_le();
        }

        let raw_count = buf.get_i32_le();
        let count = raw_count.clamp(0, MAX_ROSTER as i32) as usize;
        if count as i32 != raw_count {
            tracing::warn!("Trainer {} has out-of-range count {}, clamped", id, raw_count);
        }

        Ok(Self {
            id,
            name,
            species: slots[..count].to_vec(),
        })
    }
}
