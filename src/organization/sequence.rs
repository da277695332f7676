//! Sequential code allocation over the storage port. Callers treat the
//! returned value as an opaque server-assigned token.

use crate::shared::storage::{self, StorageError, StoragePort, SEQUENCES_KEY};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SequenceRow {
    name: String,
    value: i64,
}

pub struct SequenceAllocator {
    store: Arc<dyn StoragePort>,
}

impl SequenceAllocator {
    pub fn new(store: Arc<dyn StoragePort>) -> Self {
        Self { store }
    }

    /// Increments and returns the named counter, starting at 1.
    pub fn next(&self, name: &str) -> Result<i64, StorageError> {
        let mut rows: Vec<SequenceRow> = storage::load(self.store.as_ref(), SEQUENCES_KEY)?;
        let value = match rows.iter_mut().find(|r| r.name == name) {
            Some(row) => {
                row.value += 1;
                row.value
            }
            None => {
                rows.push(SequenceRow {
                    name: name.to_string(),
                    value: 1,
                });
                1
            }
        };
        storage::save(self.store.as_ref(), SEQUENCES_KEY, &rows)?;
        Ok(value)
    }
}
