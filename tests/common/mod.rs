//! Shared test fixtures

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use rosterdb::audit::AuditLog;
use rosterdb::record::{FixedRecord, Species};
use rosterdb::store::RecordStore;
use rosterdb::{Config, Dispatcher};
use tempfile::TempDir;

/// Write a species catalog file
pub fn write_catalog(path: &Path, species: &[Species]) {
    let mut file = File::create(path).unwrap();
    for s in species {
        file.write_all(&s.encode()).unwrap();
    }
    file.sync_all().unwrap();
}

/// Catalog with ids 1, 4 and 7
pub fn starter_species() -> Vec<Species> {
    vec![
        Species::new(1, "Bulbasaur", "Grass", "Poison"),
        Species::new(4, "Charmander", "Fire", ""),
        Species::new(7, "Squirtle", "Water", ""),
    ]
}

/// Temp directory holding a catalog, an (empty) trainer file path and a log path
pub struct Fixture {
    pub dir: TempDir,
    pub species_path: PathBuf,
    pub trainer_path: PathBuf,
    pub log_path: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_species(&starter_species())
    }

    pub fn with_species(species: &[Species]) -> Self {
        let dir = TempDir::new().unwrap();
        let species_path = dir.path().join("species.bin");
        let trainer_path = dir.path().join("trainers.bin");
        let log_path = dir.path().join("logs").join("server.log");
        write_catalog(&species_path, species);

        Self {
            dir,
            species_path,
            trainer_path,
            log_path,
        }
    }

    pub fn store(&self) -> RecordStore {
        RecordStore::open(&self.species_path, &self.trainer_path).unwrap()
    }

    pub fn audit_log(&self) -> AuditLog {
        AuditLog::open(&self.log_path).unwrap()
    }

    pub fn config(&self) -> Config {
        Config::builder()
            .listen_addr("127.0.0.1:0")
            .species_path(&self.species_path)
            .trainer_path(&self.trainer_path)
            .log_path(&self.log_path)
            .build()
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::open(&self.config()).unwrap()
    }
}
