//! In-memory slot implementation for testing.

use std::sync::{Arc, Mutex};

use handsign_knear::{decode, encode, Exemplar};

use crate::{PersistError, PersistResult, Persister};

/// An in-memory slot holding the encoded records.
///
/// Clones share the same slot, so a test can keep a handle and inspect
/// what a session saved.
#[derive(Clone, Default)]
pub struct MemorySlot {
    data: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemorySlot {
    /// Create a new empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-filled with raw bytes, as if saved by another process.
    pub fn with_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Arc::new(Mutex::new(Some(data.into()))),
        }
    }

    /// Returns the raw slot contents.
    pub fn bytes(&self) -> PersistResult<Option<Vec<u8>>> {
        let data = self
            .data
            .lock()
            .map_err(|e| PersistError::Storage(e.to_string()))?;
        Ok(data.clone())
    }
}

impl Persister for MemorySlot {
    fn save(&self, exemplars: &[Exemplar]) -> PersistResult<()> {
        let encoded = encode(exemplars)?;
        let mut data = self
            .data
            .lock()
            .map_err(|e| PersistError::Storage(e.to_string()))?;
        *data = Some(encoded);
        Ok(())
    }

    fn load(&self) -> PersistResult<Option<Vec<Exemplar>>> {
        let data = self
            .data
            .lock()
            .map_err(|e| PersistError::Storage(e.to_string()))?;
        match data.as_deref() {
            Some(bytes) => Ok(Some(decode(bytes)?)),
            None => Ok(None),
        }
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_empty() {
        let slot = MemorySlot::new();
        assert!(slot.load().unwrap().is_none());
        assert!(slot.bytes().unwrap().is_none());
    }

    #[test]
    fn test_memory_save_overwrites() {
        let slot = MemorySlot::new();
        slot.save(&[Exemplar::new("a", vec![1.0])]).unwrap();
        slot.save(&[Exemplar::new("a", vec![1.0]), Exemplar::new("b", vec![2.0])])
            .unwrap();

        let loaded = slot.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].label, "b");
    }

    #[test]
    fn test_memory_clones_share_slot() {
        let slot = MemorySlot::new();
        let handle = slot.clone();
        slot.save(&[Exemplar::new("x", vec![0.5])]).unwrap();
        assert_eq!(
            handle.bytes().unwrap().unwrap(),
            br#"[{"label":"x","data":[0.5]}]"#.to_vec()
        );
    }

    #[test]
    fn test_memory_corrupt_bytes() {
        let slot = MemorySlot::with_bytes("garbage");
        assert!(matches!(slot.load(), Err(PersistError::Decode(_))));
    }
}
