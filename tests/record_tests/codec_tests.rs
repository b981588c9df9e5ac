//! Tests for the fixed-width record codec
//!
//! These tests verify:
//! - Encoded sizes and field offsets
//! - Text truncation and NUL termination
//! - Decoding of foreign-written records (zeroed padding, garbage after NUL)
//! - Rejection of wrongly sized blocks

use rosterdb::record::{
    FixedRecord, Species, Trainer, MAX_ROSTER, NAME_LEN, SCHEMA_VERSION, SPECIES_RECORD_SIZE,
    TRAINER_RECORD_SIZE,
};
use rosterdb::RosterError;

// =============================================================================
// Layout Version
// =============================================================================

#[test]
fn test_schema_version_pins_record_sizes() {
    // Changing either size means a new layout and a new version
    assert_eq!(SCHEMA_VERSION, 1);
    assert_eq!((SPECIES_RECORD_SIZE, TRAINER_RECORD_SIZE), (244, 82));
}

// =============================================================================
// Species
// =============================================================================

#[test]
fn test_species_record_size() {
    assert_eq!(SPECIES_RECORD_SIZE, 244);
    assert_eq!(<Species as FixedRecord>::SIZE, SPECIES_RECORD_SIZE);

    let species = Species::new(25, "Pikachu", "Electric", "");
    assert_eq!(species.encode().len(), SPECIES_RECORD_SIZE);
}

#[test]
fn test_species_carries_every_field() {
    let species = Species {
        id: 6,
        name: "Charizard".to_string(),
        type1: "Fire".to_string(),
        type2: "Flying".to_string(),
        total: 534,
        hp: 78,
        attack: 84,
        defense: 78,
        sp_atk: 109,
        sp_def: 85,
        speed: 100,
        generation: 1,
        legendary: 0,
        color: "Red".to_string(),
        has_gender: 1,
        pr_male: 0.875,
        egg_group1: "Monster".to_string(),
        egg_group2: "Dragon".to_string(),
        has_mega_evolution: 1,
        height_m: 1.7,
        weight_kg: 90.5,
        catch_rate: 45,
        body_style: "bipedal_tailed".to_string(),
    };

    let decoded = Species::decode(&species.encode()).unwrap();
    assert_eq!(decoded, species);
}

#[test]
fn test_species_name_starts_after_id() {
    let bytes = Species::new(1, "Bulbasaur", "Grass", "Poison").encode();

    assert_eq!(&bytes[..4], &1i32.to_le_bytes());
    assert_eq!(&bytes[4..13], b"Bulbasaur");
    assert_eq!(bytes[13], 0);
}

#[test]
fn test_species_decode_wrong_size() {
    let result = Species::decode(&[0u8; 100]);
    assert!(matches!(result, Err(RosterError::Codec(_))));
}

// =============================================================================
// Trainer
// =============================================================================

#[test]
fn test_trainer_record_size() {
    assert_eq!(TRAINER_RECORD_SIZE, 82);
    assert_eq!(<Trainer as FixedRecord>::SIZE, TRAINER_RECORD_SIZE);
}

#[test]
fn test_trainer_long_name_truncated() {
    let long_name = "x".repeat(80);
    let trainer = Trainer::new(1, long_name, vec![1]);

    let bytes = trainer.encode();
    assert_eq!(bytes.len(), TRAINER_RECORD_SIZE);
    // Last byte of the name field is always the terminator
    assert_eq!(bytes[4 + NAME_LEN - 1], 0);

    let decoded = Trainer::decode(&bytes).unwrap();
    assert_eq!(decoded.name.len(), NAME_LEN - 1);
    assert_eq!(decoded.species, vec![1]);
}

#[test]
fn test_trainer_name_stops_at_first_nul() {
    let mut bytes = Trainer::new(9, "Gary", vec![133]).encode();
    // Junk left behind after the terminator by some other writer
    bytes[4 + 10] = b'Z';

    let decoded = Trainer::decode(&bytes).unwrap();
    assert_eq!(decoded.name, "Gary");
}

#[test]
fn test_trainer_full_roster() {
    let species: Vec<i32> = (1..=MAX_ROSTER as i32).collect();
    let trainer = Trainer::new(4, "Red", species.clone());

    let decoded = Trainer::decode(&trainer.encode()).unwrap();
    assert_eq!(decoded.count(), MAX_ROSTER);
    assert_eq!(decoded.species, species);
}

#[test]
fn test_trainer_negative_count_reads_as_empty() {
    let mut bytes = Trainer::new(5, "Blue", vec![1, 2]).encode();
    bytes[TRAINER_RECORD_SIZE - 4..].copy_from_slice(&(-3i32).to_le_bytes());

    let decoded = Trainer::decode(&bytes).unwrap();
    assert_eq!(decoded.count(), 0);
    assert!(decoded.species.is_empty());
}

#[test]
fn test_trainer_decode_wrong_size() {
    let result = Trainer::decode(&[0u8; TRAINER_RECORD_SIZE + 1]);
    assert!(matches!(result, Err(RosterError::Codec(_))));
}
