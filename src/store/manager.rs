//! Record Store
//!
//! CRUD over the trainer collection, validated against the species catalog.
//!
//! ## Responsibilities
//! - Own the trainer file; callers only see these methods
//! - Check roster size and species ids before any write
//! - Assign ids as max + 1 under the lock
//! - In-place updates, crash-safe deletes

use std::path::Path;

use parking_lot::Mutex;

use crate::error::{Result, RosterError};
use crate::record::{Species, Trainer, MAX_ROSTER};

use super::catalog::SpeciesCatalog;
use super::trainers::TrainerFile;

/// File-backed record store shared by all connection workers
///
/// ## Concurrency:
/// - `trainers`: one exclusive Mutex held for the whole of every
///   list/find/create/update/delete (readers block writers too)
/// - `catalog`: read-only, no lock
/// - All methods use `&self`; share with `Arc<RecordStore>`
pub struct RecordStore {
    /// Read-only species catalog
    catalog: SpeciesCatalog,

    /// The trainer file, reachable only through this lock
    trainers: Mutex<TrainerFile>,
}

impl RecordStore {
    /// Open the store
    ///
    /// Fails if the catalog cannot be opened for reading or the trainer file
    /// cannot be opened or created.
    pub fn open(species_path: &Path, trainer_path: &Path) -> Result<Self> {
        let catalog = SpeciesCatalog::open(species_path)?;
        let trainers = TrainerFile::open(trainer_path)?;

        Ok(Self {
            catalog,
            trainers: Mutex::new(trainers),
        })
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// True when every id exists in the catalog
    pub fn validate_species(&self, ids: &[i32]) -> Result<bool> {
        self.catalog.contains_all(ids)
    }

    /// Look up one species
    pub fn find_species(&self, id: i32) -> Result<Option<Species>> {
        self.catalog.find(id)
    }

    pub fn catalog(&self) -> &SpeciesCatalog {
        &self.catalog
    }

    // =========================================================================
    // Trainers
    // =========================================================================

    pub fn find_trainer(&self, id: i32) -> Result<Option<Trainer>> {
        let trainers = self.trainers.lock();
        Ok(trainers.find(id)?.map(|(_, trainer)| trainer))
    }

    /// Trainer plus its roster resolved against the catalog
    ///
    /// Species missing from the catalog are left out of the roster.
    pub fn trainer_roster(&self, id: i32) -> Result<Option<(Trainer, Vec<Species>)>> {
        let trainers = self.trainers.lock();
        match trainers.find(id)? {
            Some((_, trainer)) => {
                let roster = self.catalog.resolve(&trainer.species)?;
                Ok(Some((trainer, roster)))
            }
            None => Ok(None),
        }
    }

    pub fn list_trainers(&self) -> Result<Vec<Trainer>> {
        let trainers = self.trainers.lock();
        trainers.all()
    }

    /// Create a trainer and return its new id
    ///
    /// The id is one past the highest id currently in the file.
    pub fn create_trainer(&self, name: &str, species: &[i32]) -> Result<i32> {
        let trainers = self.trainers.lock();
        self.check_roster(species)?;

        let (max_id, end) = trainers.max_id_and_end()?;
        let id = max_id
            .checked_add(1)
            .ok_or_else(|| RosterError::Storage("trainer id space exhausted".to_string()))?;

        let trainer = Trainer::new(id, name, species.to_vec());
        trainers.write_at(end, &trainer)?;

        tracing::debug!("Created trainer {} ({}) in {:?}", id, name, trainers.path());
        Ok(id)
    }

    /// Replace a trainer's roster; name and id are kept
    ///
    /// Returns false when no trainer has `id`.
    pub fn update_trainer(&self, id: i32, species: &[i32]) -> Result<bool> {
        let trainers = self.trainers.lock();
        self.check_roster(species)?;

        match trainers.find(id)? {
            Some((offset, mut trainer)) => {
                trainer.species = species.to_vec();
                trainers.write_at(offset, &trainer)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a trainer; returns false when no trainer has `id`
    pub fn delete_trainer(&self, id: i32) -> Result<bool> {
        let trainers = self.trainers.lock();
        trainers.rewrite_without(id)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Roster size must be 1..=MAX_ROSTER and every id must be in the catalog
    fn check_roster(&self, species: &[i32]) -> Result<()> {
        if species.is_empty() || species.len() > MAX_ROSTER {
            return Err(RosterError::InvalidRoster(species.len()));
        }

        match self.catalog.first_missing(species)? {
            Some(id) => Err(RosterError::UnknownSpecies(id)),
            None => Ok(()),
        }
    }
}
