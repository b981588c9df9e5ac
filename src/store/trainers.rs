//! Trainer File
//!
//! Raw record operations on the trainer file. Nothing here locks; the
//! [`RecordStore`](super::RecordStore) only hands a `TrainerFile` out from
//! behind its mutex.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, RosterError};
use crate::record::{FixedRecord, Trainer};

use super::RecordScan;

/// Suffix of the scratch file used by deletes
const TEMP_SUFFIX: &str = ".tmp";

pub(super) struct TrainerFile {
    path: PathBuf,
}

impl TrainerFile {
    /// Open the trainer file, creating an empty one if missing
    pub fn open(path: &Path) -> Result<Self> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Locate a trainer and the byte offset of its record
    pub fn find(&self, id: i32) -> Result<Option<(u64, Trainer)>> {
        for item in self.scan()? {
            let (offset, trainer) = item?;
            if trainer.id == id {
                return Ok(Some((offset, trainer)));
            }
        }
        Ok(None)
    }

    /// Every trainer in file order
    pub fn all(&self) -> Result<Vec<Trainer>> {
        self.scan()?.map(|item| item.map(|(_, t)| t)).collect()
    }

    /// Highest id present (0 for an empty file) and the offset where the
    /// next record belongs
    pub fn max_id_and_end(&self) -> Result<(i32, u64)> {
        let mut scan = self.scan()?;
        let mut max_id = 0;
        for item in scan.by_ref() {
            let (_, trainer) = item?;
            max_id = max_id.max(trainer.id);
        }
        Ok((max_id, scan.end_offset()))
    }

    /// Write one record at `offset`, overwriting whatever is there
    ///
    /// Used both for in-place updates and for appends (offset = end of the
    /// last complete record, so a torn tail gets overwritten).
    pub fn write_at(&self, offset: u64, trainer: &Trainer) -> Result<()> {
        let mut file = OpenOptions::new().write(true).open(&self.path)?;
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(&trainer.encode())?;
        file.sync_data()?;
        Ok(())
    }

    /// Rewrite the file without trainer `id`
    ///
    /// The survivors go to a temp file next to the original, which is
    /// synced and then renamed over it. Returns false (file untouched) when
    /// `id` is absent.
    pub fn rewrite_without(&self, id: i32) -> Result<bool> {
        let temp_path = self.temp_path();

        match self.write_survivors(id, &temp_path) {
            Ok(true) => {
                publish(&temp_path, &self.path)?;
                Ok(true)
            }
            Ok(false) => {
                if let Err(e) = fs::remove_file(&temp_path) {
                    tracing::warn!("Failed to remove scratch file {:?}: {}", temp_path, e);
                }
                Ok(false)
            }
            Err(e) => {
                let _ = fs::remove_file(&temp_path);
                Err(e)
            }
        }
    }

    /// Scratch path used by [`rewrite_without`](Self::rewrite_without)
    pub fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("trainers"));
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }

    fn write_survivors(&self, id: i32, temp_path: &Path) -> Result<bool> {
        let mut writer = BufWriter::new(File::create(temp_path)?);
        let mut found = false;

        for item in self.scan()? {
            let (_, trainer) = item?;
            if trainer.id == id {
                found = true;
                continue;
            }
            writer.write_all(&trainer.encode())?;
        }

        let file = writer.into_inner().map_err(|e| {
            RosterError::Storage(format!("Failed to flush temp trainer file: {}", e))
        })?;
        file.sync_all()?;

        Ok(found)
    }

    fn scan(&self) -> Result<RecordScan<Trainer>> {
        RecordScan::open(&self.path)
    }
}

/// Rename `temp` over `target`, then sync the directory entry
///
/// A failed rename removes `temp` and leaves `target` as it was.
fn publish(temp: &Path, target: &Path) -> Result<()> {
    if let Err(e) = fs::rename(temp, target) {
        let _ = fs::remove_file(temp);
        return Err(e.into());
    }
    sync_parent_dir(target);
    Ok(())
}

/// The rename has already happened, so a failure here is only logged
fn sync_parent_dir(path: &Path) {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    if let Err(e) = File::open(parent).and_then(|dir| dir.sync_all()) {
        tracing::warn!("Failed to sync directory {:?}: {}", parent, e);
    }
}
