//! JSON documents on disk
//!
//! A save serializes into memory first, writes a `.partial` sibling, syncs it
//! and renames it over the target. An interrupted save leaves the previous
//! document in place.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{FinanceError, FinanceResult};

/// A JSON document at a fixed path
#[derive(Debug, Clone, Copy)]
pub struct JsonFile<'a> {
    path: &'a Path,
}

impl<'a> JsonFile<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// Deserialize the document, or `None` when the file does not exist
    pub fn load<T: DeserializeOwned>(&self) -> FinanceResult<Option<T>> {
        let file = match File::open(self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(FinanceError::Io(format!(
                    "Cannot open {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_reader(BufReader::new(file))
            .map(Some)
            .map_err(|e| {
                FinanceError::Storage(format!("Malformed JSON in {}: {}", self.path.display(), e))
            })
    }

    /// Replace the document with `value`, creating parent directories
    pub fn save<T: Serialize + ?Sized>(&self, value: &T) -> FinanceResult<()> {
        let bytes = serde_json::to_vec_pretty(value).map_err(|e| {
            FinanceError::Storage(format!("Cannot encode {}: {}", self.path.display(), e))
        })?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| {
                FinanceError::Io(format!("Cannot create {}: {}", dir.display(), e))
            })?;
        }

        let partial = self.partial_path();
        let written = write_synced(&partial, &bytes).and_then(|()| fs::rename(&partial, self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&partial);
            return Err(FinanceError::Io(format!(
                "Cannot save {}: {}",
                self.path.display(),
                e
            )));
        }
        Ok(())
    }

    /// `ledger.json` -> `ledger.json.partial`, in the same directory
    fn partial_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".partial");
        self.path.with_file_name(name)
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        label: String,
        count: u32,
    }

    #[test]
    fn test_missing_file_loads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");

        let loaded: Option<Doc> = JsonFile::new(&path).load().unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b").join("doc.json");
        let file = JsonFile::new(&path);

        let doc = Doc {
            label: "groceries".into(),
            count: 3,
        };
        file.save(&doc).unwrap();

        assert_eq!(file.load::<Doc>().unwrap(), Some(doc));
        assert!(!temp_dir.path().join("a/b/doc.json.partial").exists());
    }

    #[test]
    fn test_save_replaces_previous_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");
        let file = JsonFile::new(&path);

        file.save(&Doc { label: "old".into(), count: 1 }).unwrap();
        file.save(&Doc { label: "new".into(), count: 2 }).unwrap();

        let loaded: Doc = file.load().unwrap().unwrap();
        assert_eq!(loaded.label, "new");
    }

    #[test]
    fn test_failed_save_keeps_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");
        fs::write(&path, r#"{"label":"kept","count":7}"#).unwrap();

        // A directory where the partial file should go makes the write fail
        fs::create_dir(temp_dir.path().join("doc.json.partial")).unwrap();

        let err = JsonFile::new(&path)
            .save(&Doc { label: "lost".into(), count: 0 })
            .unwrap_err();
        assert!(err.is_io());

        let loaded: Doc = JsonFile::new(&path).load().unwrap().unwrap();
        assert_eq!(loaded.label, "kept");
    }

    #[test]
    fn test_malformed_document_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("doc.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFile::new(&path).load::<Doc>().unwrap_err();
        assert!(matches!(err, FinanceError::Storage(_)));
    }
}
