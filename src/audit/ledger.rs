//! Audit Log writer/reader
//!
//! Both directions share one mutex, so `tail` never sees a half-written
//! append.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Seek, SeekFrom, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use parking_lot::Mutex;

use crate::error::Result;

use super::AuditEntry;

/// Returned by `tail` when the file is missing or unreadable
pub const NO_LOG_MESSAGE: &str = "No log file or cannot open log.";

/// Returned by `tail` when the file has no lines
pub const EMPTY_LOG_MESSAGE: &str = "Log file is empty.";

/// Mutex-serialized request ledger
pub struct AuditLog {
    path: PathBuf,

    /// Guards both append and tail; independent of the trainer lock
    lock: Mutex<()>,
}

impl AuditLog {
    /// Prepare the log at `path`, creating parent directories if needed
    ///
    /// The file itself is created lazily by the first append.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry
    ///
    /// Open/write failures are swallowed: the request is still served and
    /// only the ledger line is lost.
    pub fn append(&self, timestamp: DateTime<Local>, peer: SocketAddr, command: &str) {
        let entry = AuditEntry::new(timestamp, peer, command);
        let _guard = self.lock.lock();

        if let Err(e) = self.write_entry(&entry) {
            tracing::warn!("Failed to append to audit log {:?}: {}", self.path, e);
        }
    }

    /// Append an entry stamped with the current local time
    pub fn record(&self, peer: SocketAddr, command: &str) {
        self.append(Local::now(), peer, command);
    }

    /// Last `n` lines in original order, or a placeholder message
    ///
    /// Never fails: a missing/unreadable file yields [`NO_LOG_MESSAGE`], an
    /// empty one [`EMPTY_LOG_MESSAGE`].
    pub fn tail(&self, n: usize) -> String {
        let _guard = self.lock.lock();

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(_) => return NO_LOG_MESSAGE.to_string(),
        };

        match read_last_lines(BufReader::new(file), n) {
            Ok(Some(text)) => text,
            Ok(None) => EMPTY_LOG_MESSAGE.to_string(),
            Err(e) => {
                tracing::warn!("Failed to read audit log {:?}: {}", self.path, e);
                NO_LOG_MESSAGE.to_string()
            }
        }
    }

    fn write_entry(&self, entry: &AuditEntry<'_>) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

/// Two passes: count lines, then skip all but the last `n` and collect.
///
/// Returns `None` when the file has no lines at all.
fn read_last_lines<R: BufRead + Seek>(mut reader: R, n: usize) -> io::Result<Option<String>> {
    let mut line = Vec::new();

    // Pass 1: count
    let mut total = 0usize;
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        total += 1;
    }

    if total == 0 {
        return Ok(None);
    }

    // Pass 2: skip, then collect
    reader.seek(SeekFrom::Start(0))?;
    let skip = total.saturating_sub(n);
    let mut out = String::new();
    let mut index = 0usize;
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if index >= skip {
            out.push_str(&String::from_utf8_lossy(&line));
        }
        index += 1;
    }

    Ok(Some(out))
}
