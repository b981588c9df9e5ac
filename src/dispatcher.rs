//! Dispatcher Module
//!
//! Routes parsed commands to the record store and audit log and renders
//! the response text.
//!
//! ## Responsibilities
//! - Open the store and log at startup (failures are fatal)
//! - Map each command to store/log calls
//! - Turn every per-request failure into response text

use std::fmt::Write as _;

use crate::audit::AuditLog;
use crate::config::Config;
use crate::error::{Result, RosterError};
use crate::protocol::{Command, Response};
use crate::record::{Species, Trainer};
use crate::store::RecordStore;

/// Shown in place of an empty secondary type
const NO_TYPE: &str = "—";

/// Command router shared by every connection worker
///
/// Holds no per-request state; all locking happens inside the store and the
/// audit log.
pub struct Dispatcher {
    /// Species catalog + trainer collection
    store: RecordStore,

    /// Request ledger
    audit: AuditLog,
}

impl Dispatcher {
    /// Open the store and audit log named in `config`
    ///
    /// Fails if the catalog cannot be read, the trainer file cannot be
    /// opened or created, or the log directory cannot be created.
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;

        let store = RecordStore::open(&config.species_path, &config.trainer_path)?;
        let audit = AuditLog::open(&config.log_path)?;

        Ok(Self::new(store, audit))
    }

    pub fn new(store: RecordStore, audit: AuditLog) -> Self {
        Self { store, audit }
    }

    /// Execute a command and return its response
    ///
    /// Never fails: storage and validation errors become response text.
    pub fn execute(&self, command: Command) -> Response {
        match command {
            Command::Empty => Response::message("Empty command."),
            Command::Exit => Response::farewell(),
            Command::GetLog { lines } => Response::message(self.audit.tail(lines)),
            Command::ListTrainers => self.list_trainers(),
            Command::GetTrainer { id } => self.get_trainer(id),
            Command::PostTrainer { name, species } => self.post_trainer(&name, &species),
            Command::PutTrainer { id, species } => self.put_trainer(id, &species),
            Command::DeleteTrainer { id } => self.delete_trainer(id),
            Command::Rejected { reason } => Response::rejected(&reason),
            Command::Unknown => Response::invalid(),
        }
    }

    // =========================================================================
    // Command Handlers
    // =========================================================================

    fn list_trainers(&self) -> Response {
        match self.store.list_trainers() {
            Ok(trainers) => Response::message(render_trainer_list(&trainers)),
            Err(e) => storage_failure(e),
        }
    }

    fn get_trainer(&self, id: i32) -> Response {
        match self.store.trainer_roster(id) {
            Ok(Some((trainer, roster))) => Response::message(render_trainer(&trainer, &roster)),
            Ok(None) => Response::message(format!("Trainer {} not found.", id)),
            Err(e) => storage_failure(e),
        }
    }

    fn post_trainer(&self, name: &str, species: &[i32]) -> Response {
        match self.store.create_trainer(name, species) {
            Ok(id) => Response::message(format!("Trainer added successfully. ID={}", id)),
            Err(e) if is_validation(&e) => {
                Response::message(format!("Invalid command: Failed validation ({}).", e))
            }
            Err(e) => storage_failure(e),
        }
    }

    fn put_trainer(&self, id: i32, species: &[i32]) -> Response {
        match self.store.update_trainer(id, species) {
            Ok(true) => Response::message(format!("Trainer {} updated.", id)),
            Ok(false) => Response::message(format!("Trainer {} not updated.", id)),
            Err(e) if is_validation(&e) => {
                Response::message(format!("Trainer {} not updated: {}.", id, e))
            }
            Err(e) => storage_failure(e),
        }
    }

    fn delete_trainer(&self, id: i32) -> Response {
        match self.store.delete_trainer(id) {
            Ok(true) => Response::message(format!("Trainer {} deleted.", id)),
            Ok(false) => Response::message(format!("Trainer {} not found.", id)),
            Err(e) => storage_failure(e),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }
}

// =============================================================================
// Rendering
// =============================================================================

fn render_trainer_list(trainers: &[Trainer]) -> String {
    let mut out = String::from("All Trainers:\n");
    for trainer in trainers {
        let _ = writeln!(
            out,
            "  #{} {} ({} species)",
            trainer.id,
            trainer.name,
            trainer.count()
        );
    }
    out
}

fn render_trainer(trainer: &Trainer, roster: &[Species]) -> String {
    let mut out = format!(
        "Trainer #{}: {}\nSpecies count: {}\nTeam:\n",
        trainer.id,
        trainer.name,
        trainer.count()
    );
    for species in roster {
        let type2 = if species.type2.is_empty() {
            NO_TYPE
        } else {
            species.type2.as_str()
        };
        let _ = writeln!(
            out,
            "  - [{}] {} ({}/{})",
            species.id, species.name, species.type1, type2
        );
    }
    out
}

fn is_validation(e: &RosterError) -> bool {
    matches!(
        e,
        RosterError::UnknownSpecies(_) | RosterError::InvalidRoster(_)
    )
}

fn storage_failure(e: RosterError) -> Response {
    tracing::warn!("Storage operation failed: {}", e);
    match e {
        RosterError::Storage(detail) => Response::message(format!("Storage error: {}", detail)),
        other => Response::message(format!("Storage error: {}", other)),
    }
}
