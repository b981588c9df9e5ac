//! Configuration for RosterDB
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, RosterError};

/// Default request line cap (bytes, including the newline)
pub const DEFAULT_MAX_LINE_LEN: usize = 8192;

/// Main configuration for a RosterDB server instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Read-only species catalog (fixed-size records, externally supplied)
    pub species_path: PathBuf,

    /// Trainer collection file (created on startup if missing)
    pub trainer_path: PathBuf,

    // -------------------------------------------------------------------------
    // Audit Log Configuration
    // -------------------------------------------------------------------------
    /// Append-only request audit trail
    pub log_path: PathBuf,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// Longest request line read in one go; longer lines are split
    pub max_line_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            species_path: PathBuf::from("./data/species.bin"),
            trainer_path: PathBuf::from("./data/trainers.bin"),
            log_path: PathBuf::from("./data/server.log"),
            listen_addr: "0.0.0.0:5555".to_string(),
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject configurations the server cannot start with
    pub fn validate(&self) -> Result<()> {
        let paths = [
            ("species", &self.species_path),
            ("trainer", &self.trainer_path),
            ("log", &self.log_path),
        ];
        for (label, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(RosterError::Config(format!("{} path is empty", label)));
            }
        }

        if self.listen_addr.is_empty() {
            return Err(RosterError::Config("listen address is empty".to_string()));
        }

        // Room for at least one byte plus the newline
        if self.max_line_len < 2 {
            return Err(RosterError::Config(format!(
                "max_line_len must be at least 2, got {}",
                self.max_line_len
            )));
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the species catalog path
    pub fn species_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.species_path = path.into();
        self
    }

    /// Set the trainer collection path
    pub fn trainer_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.trainer_path = path.into();
        self
    }

    /// Set the audit log path
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the request line cap (in bytes)
    pub fn max_line_len(mut self, len: usize) -> Self {
        self.config.max_line_len = len;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
