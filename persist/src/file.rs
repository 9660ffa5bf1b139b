//! JSON model files.
//!
//! A model file is the exported record list, pretty-printed. It doubles as
//! a durable slot: saving rewrites the whole file through a temporary
//! sibling and a rename, so readers never observe a half-written model.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use handsign_knear::{decode, encode_pretty, Exemplar};

use crate::{PersistError, PersistResult, Persister};

/// A training-data slot stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Persister for JsonFile {
    fn save(&self, exemplars: &[Exemplar]) -> PersistResult<()> {
        let encoded = encode_pretty(exemplars)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| PersistError::Storage(e.to_string()))?;
            }
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, encoded).map_err(|e| PersistError::Storage(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| PersistError::Storage(e.to_string()))?;
        Ok(())
    }

    fn load(&self) -> PersistResult<Option<Vec<Exemplar>>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistError::Storage(e.to_string())),
        };
        Ok(Some(decode(&data)?))
    }

    fn location(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("model.json"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("nested/deeper/model.json"));
        file.save(&[Exemplar::new("Ten", vec![0.25, 0.5])]).unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded, vec![Exemplar::new("Ten", vec![0.25, 0.5])]);
        assert!(!dir.path().join("nested/deeper/model.json.tmp").exists());
    }

    #[test]
    fn test_file_is_plain_record_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        JsonFile::new(&path)
            .save(&[Exemplar::new("Jin", vec![1.0])])
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"label\": \"Jin\""));
        assert!(text.contains("\"data\""));
    }

    #[test]
    fn test_load_hand_written_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, r#"[{"label":"Chi","data":[0.1,0.2,0.3]}]"#).unwrap();

        let loaded = JsonFile::new(&path).load().unwrap().unwrap();
        assert_eq!(loaded[0].label, "Chi");
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, "[{\"label\":").unwrap();
        assert!(matches!(
            JsonFile::new(&path).load(),
            Err(PersistError::Decode(_))
        ));
    }
}
