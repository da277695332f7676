//! Persistence port for the CRM collections.
//!
//! Every collection is a JSON array stored under a logical key. The port is
//! deliberately narrow (read/write whole collections) so a file-backed store,
//! an in-memory store for tests, or a real database client can be swapped in
//! without touching the services.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

pub const FUNNELS_KEY: &str = "crmFunnels";
pub const LEADS_KEY: &str = "crmLeads";
pub const CONTACTS_KEY: &str = "crmContacts";
pub const ACTIVITIES_KEY: &str = "crmActivities";
pub const ORGANIZATIONS_KEY: &str = "crmOrganizations";
pub const BRANCHES_KEY: &str = "crmBranches";
pub const SEQUENCES_KEY: &str = "crmSequences";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt collection {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub trait StoragePort: Send + Sync {
    /// Returns the collection stored under `key`, empty if absent.
    fn read(&self, key: &str) -> Result<Vec<Value>, StorageError>;

    /// Replaces the collection stored under `key`.
    fn write(&self, key: &str, rows: Vec<Value>) -> Result<(), StorageError>;
}

pub fn load<T: DeserializeOwned>(
    store: &dyn StoragePort,
    key: &str,
) -> Result<Vec<T>, StorageError> {
    store
        .read(key)?
        .into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
        })
        .collect()
}

pub fn save<T: Serialize>(
    store: &dyn StoragePort,
    key: &str,
    rows: &[T],
) -> Result<(), StorageError> {
    let rows = rows
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    store.write(key, rows)
}

/// In-memory store used by the tests.
#[derive(Default)]
pub struct MemoryStorage {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl StoragePort for MemoryStorage {
    fn read(&self, key: &str) -> Result<Vec<Value>, StorageError> {
        let collections = self
            .collections
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(collections.get(key).cloned().unwrap_or_default())
    }

    fn write(&self, key: &str, rows: Vec<Value>) -> Result<(), StorageError> {
        let mut collections = self
            .collections
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        collections.insert(key.to_string(), rows);
        Ok(())
    }
}

/// One JSON file per collection under a data directory. The whole collection
/// is rewritten on every write; the expected volumes are small (dozens to low
/// hundreds of rows per collection).
pub struct JsonFileStorage {
    dir: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            lock: RwLock::new(()),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StoragePort for JsonFileStorage {
    fn read(&self, key: &str) -> Result<Vec<Value>, StorageError> {
        let _guard = self.lock.read().unwrap_or_else(|p| p.into_inner());
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)?;
        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })
    }

    fn write(&self, key: &str, rows: Vec<Value>) -> Result<(), StorageError> {
        let _guard = self.lock.write().unwrap_or_else(|p| p.into_inner());
        fs::create_dir_all(&self.dir)?;
        let raw = serde_json::to_vec_pretty(&rows)?;
        fs::write(self.path_for(key), raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_storage_roundtrip() {
        let store = MemoryStorage::default();
        assert!(store.read("crmLeads").unwrap().is_empty());

        store
            .write("crmLeads", vec![json!({"title": "Apto Ipanema"})])
            .unwrap();
        let rows = store.read("crmLeads").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["title"], "Apto Ipanema");
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        let store = JsonFileStorage::new(dir.path());
        store
            .write("crmFunnels", vec![json!({"name": "Vendas"})])
            .unwrap();
        drop(store);

        let reopened = JsonFileStorage::new(dir.path());
        let rows = reopened.read("crmFunnels").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Vendas");
    }

    #[test]
    fn missing_collection_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStorage::new(dir.path());
        assert!(store.read("crmContacts").unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("crmLeads.json"), "not json").unwrap();

        let store = JsonFileStorage::new(dir.path());
        let err = store.read("crmLeads").unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }
}
