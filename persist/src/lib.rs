//! Durable storage for training data.
//!
//! A [`Persister`] holds a single slot that is overwritten with the full
//! exemplar list on every save. Three implementations are provided:
//!
//! - [`MemorySlot`]: in-process, for tests and ephemeral sessions.
//! - [`RedbSlot`]: one key in a redb database.
//! - [`JsonFile`]: a JSON model file, the same format used to move a
//!   trained model between machines.
//!
//! All slots store the record format from [`handsign_knear::encode`].

pub mod file;
pub mod memory;
pub mod redb;

use std::fmt;

use handsign_knear::{Exemplar, KnearError};
use thiserror::Error;

/// Errors that can occur while saving or loading training data.
#[derive(Error, Debug, Clone)]
pub enum PersistError {
    #[error("persist: storage error: {0}")]
    Storage(String),

    #[error("persist: encode error: {0}")]
    Encode(String),

    #[error("persist: decode error: {0}")]
    Decode(String),
}

impl From<KnearError> for PersistError {
    fn from(e: KnearError) -> Self {
        match e {
            KnearError::Encode(msg) => PersistError::Encode(msg),
            other => PersistError::Decode(other.to_string()),
        }
    }
}

/// Result type for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// A single durable slot of training data.
///
/// Implementations must be safe for concurrent use (Send + Sync).
pub trait Persister: Send + Sync {
    /// Overwrite the slot with `exemplars`.
    fn save(&self, exemplars: &[Exemplar]) -> PersistResult<()>;

    /// Read the slot. Returns `None` if nothing has been saved yet.
    fn load(&self) -> PersistResult<Option<Vec<Exemplar>>>;

    /// Short description of where the data lives, for logs.
    fn location(&self) -> String;
}

impl fmt::Debug for dyn Persister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Persister {{ {} }}", self.location())
    }
}

/// A boxed persister for use in trait objects.
pub type BoxedPersister = Box<dyn Persister>;

pub use file::JsonFile;
pub use memory::MemorySlot;
pub use self::redb::RedbSlot;
