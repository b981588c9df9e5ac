//! Species catalog record.

use bytes::{Buf, BufMut, BytesMut};

use super::{get_fixed_str, put_fixed_str, FixedRecord, NAME_LEN};
use crate::error::{Result, RosterError};

const TYPE_LEN: usize = 20;
const COLOR_LEN: usize = 20;
const EGG_GROUP_LEN: usize = 20;
const BODY_STYLE_LEN: usize = 30;

/// Size of one encoded species record
pub const SPECIES_RECORD_SIZE: usize = 4           // id
    + NAME_LEN
    + TYPE_LEN * 2
    + 4 * 9                                         // total .. legendary
    + COLOR_LEN
    + 4                                             // has_gender
    + 4                                             // pr_male
    + EGG_GROUP_LEN * 2
    + 4                                             // has_mega_evolution
    + 4 * 2                                         // height_m, weight_kg
    + 4                                             // catch_rate
    + BODY_STYLE_LEN;

/// One entry of the read-only species catalog
///
/// Everything past `id`, `name` and the two types is carried verbatim; the
/// server never interprets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Species {
    pub id: i32,
    pub name: String,
    pub type1: String,
    /// Empty when the species has a single type
    pub type2: String,
    pub total: i32,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub sp_atk: i32,
    pub sp_def: i32,
    pub speed: i32,
    pub generation: i32,
    pub legendary: i32,
    pub color: String,
    pub has_gender: i32,
    pub pr_male: f32,
    pub egg_group1: String,
    pub egg_group2: String,
    pub has_mega_evolution: i32,
    pub height_m: f32,
    pub weight_kg: f32,
    pub catch_rate: i32,
    pub body_style: String,
}

impl Species {
    /// Minimal species with only the fields the server renders
    pub fn new(id: i32, name: &str, type1: &str, type2: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            type1: type1.to_string(),
            type2: type2.to_string(),
            ..Self::default()
        }
    }
}

impl FixedRecord for Species {
    const SIZE: usize = SPECIES_RECORD_SIZE;

    fn encode(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(SPECIES_RECORD_SIZE);

        buf.put_i32_le(self.id);
        put_fixed_str(&mut buf, &self.name, NAME_LEN);
        put_fixed_str(&mut buf, &self.type1, TYPE_LEN);
        put_fixed_str(&mut buf, &self.type2, TYPE_LEN);

        for stat in [
            self.total,
            self.hp,
            self.attack,
            self.defense,
            self.sp_atk,
            self.sp_def,
            self.speed,
            self.generation,
            self.legendary,
        ] {
            buf.put_i32_le(stat);
        }

        put_fixed_str(&mut buf, &self.color, COLOR_LEN);
        buf.put_i32_le(self.has_gender);
        buf.put_f32_le(self.pr_male);
        put_fixed_str(&mut buf, &self.egg_group1, EGG_GROUP_LEN);
        put_fixed_str(&mut buf, &self.egg_group2, EGG_GROUP_LEN);
        buf.put_i32_le(self.has_mega_evolution);
        buf.put_f32_le(self.height_m);
        buf.put_f32_le(self.weight_kg);
        buf.put_i32_le(self.catch_rate);
        put_fixed_str(&mut buf, &self.body_style, BODY_STYLE_LEN);

        debug_assert_eq!(buf.len(), SPECIES_RECORD_SIZE);
        buf.to_vec()
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SPECIES_RECORD_SIZE {
            return Err(RosterError::Codec(format!(
                "species record must be {} bytes, got {}",
                SPECIES_RECORD_SIZE,
                bytes.len()
            )));
        }

        let mut buf = bytes;
        Ok(Self {
            id: buf.get_i32_le(),
            name: get_fixed_str(&mut buf, NAME_LEN),
            type1: get_fixed_str(&mut buf, TYPE_LEN),
            type2: get_fixed_str(&mut buf, TYPE_LEN),
            total: buf.get_i32_le(),
            hp: buf.get_i32_le(),
            attack: buf.get_i32_le(),
            defense: buf.get_i32_le(),
            sp_atk: buf.get_i32_le(),
            sp_def: buf.get_i32_le(),
            speed: buf.get_i32_le(),
            generation: buf.get_i32_le(),
            legendary: buf.get_i32_le(),
            color: get_fixed_str(&mut buf, COLOR_LEN),
            has_gender: buf.get_i32_le(),
            pr_male: buf.get_f32_le(),
            egg_group1: get_fixed_str(&mut buf, EGG_GROUP_LEN),
            egg_group2: get_fixed_str(&mut buf, EGG_GROUP_LEN),
            has_mega_evolution: buf.get_i32_le(),
            height_m: buf.get_f32_le(),
            weight_kg: buf.get_f32_le(),
            catch_rate: buf.get_i32_le(),
            body_style: get_fixed_str(&mut buf, BODY_STYLE_LEN),
        })
    }
}
