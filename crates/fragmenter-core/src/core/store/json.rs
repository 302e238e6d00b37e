use super::memory::InMemoryStore;
use super::{MoleculeStore, RecordQuery, StoreError, StoredMolecule};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A read-only store backed by a JSON array of [`StoredMolecule`] records.
///
/// The file is loaded once on open; queries are answered from memory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
    records: InMemoryStore,
}

impl JsonStore {
    /// Loads every record from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be read and
    /// [`StoreError::Parse`] if it is not a valid record list.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let records: Vec<StoredMolecule> =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), records = records.len(), "Loaded molecule store");
        Ok(Self {
            path,
            records: records.into_iter().collect(),
        })
    }

    /// Writes `records` to `path` in the format [`JsonStore::open`] reads.
    pub fn save(path: impl AsRef<Path>, records: &[StoredMolecule]) -> Result<(), StoreError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(records).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, content).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MoleculeStore for JsonStore {
    fn find(&self, query: &RecordQuery) -> Result<Vec<StoredMolecule>, StoreError> {
        self.records.find(query)
    }
}
