//! Redb-backed durable slot.

use std::path::{Path, PathBuf};

use handsign_knear::{decode, encode, Exemplar};
use redb::{Database, TableDefinition};

use crate::{PersistError, PersistResult, Persister};

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("handsign");

/// Key used when none is given.
pub const DEFAULT_KEY: &str = "training";

/// A slot stored under one key of a redb database.
///
/// Several slots (for example, one per gesture vocabulary) can share a
/// database file by using different keys.
pub struct RedbSlot {
    db: Database,
    path: PathBuf,
    key: String,
}

impl RedbSlot {
    /// Open or create a slot at `path` under [`DEFAULT_KEY`].
    pub fn open<P: AsRef<Path>>(path: P) -> PersistResult<Self> {
        Self::open_with_key(path, DEFAULT_KEY)
    }

    /// Open or create a slot at `path` under `key`.
    pub fn open_with_key<P: AsRef<Path>>(path: P, key: &str) -> PersistResult<Self> {
        let path = path.as_ref().to_path_buf();
        let db = Database::create(&path).map_err(|e| PersistError::Storage(e.to_string()))?;

        // Create the table if it doesn't exist
        let tx = db
            .begin_write()
            .map_err(|e| PersistError::Storage(e.to_string()))?;
        {
            let _ = tx
                .open_table(TABLE)
                .map_err(|e| PersistError::Storage(e.to_string()))?;
        }
        tx.commit().map_err(|e| PersistError::Storage(e.to_string()))?;

        Ok(Self {
            db,
            path,
            key: key.to_string(),
        })
    }
}

impl Persister for RedbSlot {
    fn save(&self, exemplars: &[Exemplar]) -> PersistResult<()> {
        let encoded = encode(exemplars)?;
        let tx = self
            .db
            .begin_write()
            .map_err(|e| PersistError::Storage(e.to_string()))?;
        {
            let mut table = tx
                .open_table(TABLE)
                .map_err(|e| PersistError::Storage(e.to_string()))?;
            table
                .insert(self.key.as_str(), encoded.as_slice())
                .map_err(|e| PersistError::Storage(e.to_string()))?;
        }
        tx.commit().map_err(|e| PersistError::Storage(e.to_string()))?;
        Ok(())
    }

    fn load(&self) -> PersistResult<Option<Vec<Exemplar>>> {
        let tx = self
            .db
            .begin_read()
            .map_err(|e| PersistError::Storage(e.to_string()))?;
        let table = tx
            .open_table(TABLE)
            .map_err(|e| PersistError::Storage(e.to_string()))?;

        match table
            .get(self.key.as_str())
            .map_err(|e| PersistError::Storage(e.to_string()))?
        {
            Some(value) => Ok(Some(decode(value.value())?)),
            None => Ok(None),
        }
    }

    fn location(&self) -> String {
        format!("redb:{}#{}", self.path.display(), self.key)
    }
}
