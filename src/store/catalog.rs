//! Species Catalog
//!
//! Read-only view of the externally supplied species file.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::record::Species;

use super::RecordScan;

/// Read-only species catalog
///
/// The file is reopened for every scan, so no lock is held and records
/// added out of band become visible to later lookups.
#[derive(Debug, Clone)]
pub struct SpeciesCatalog {
    path: PathBuf,
}

impl SpeciesCatalog {
    /// Open the catalog, failing if the file cannot be read
    pub fn open(path: &Path) -> Result<Self> {
        File::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Look up one species by id
    pub fn find(&self, id: i32) -> Result<Option<Species>> {
        for item in self.scan()? {
            let (_, species) = item?;
            if species.id == id {
                return Ok(Some(species));
            }
        }
        Ok(None)
    }

    /// First id (in the order given) that is absent from the catalog
    ///
    /// One pass over the file, stopping early once every id is found.
    pub fn first_missing(&self, ids: &[i32]) -> Result<Option<i32>> {
        let mut pending: Vec<i32> = ids.to_vec();

        for item in self.scan()? {
            if pending.is_empty() {
                break;
            }
            let (_, species) = item?;
            pending.retain(|&id| id != species.id);
        }

        Ok(ids.iter().copied().find(|id| pending.contains(id)))
    }

    /// True when every id is present in the catalog
    pub fn contains_all(&self, ids: &[i32]) -> Result<bool> {
        Ok(self.first_missing(ids)?.is_none())
    }

    /// Resolve ids to species in order, skipping ids no longer present
    pub fn resolve(&self, ids: &[i32]) -> Result<Vec<Species>> {
        let mut found: Vec<Option<Species>> = vec![None; ids.len()];

        for item in self.scan()? {
            let (_, species) = item?;
            for (slot, &id) in found.iter_mut().zip(ids) {
                if slot.is_none() && id == species.id {
                    *slot = Some(species.clone());
                }
            }
        }

        Ok(found.into_iter().flatten().collect())
    }

    /// Every species in file order
    pub fn all(&self) -> Result<Vec<Species>> {
        self.scan()?.map(|item| item.map(|(_, s)| s)).collect()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn scan(&self) -> Result<RecordScan<Species>> {
        RecordScan::open(&self.path)
    }
}
