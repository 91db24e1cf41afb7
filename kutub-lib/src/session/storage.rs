use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access session storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("session storage contains invalid data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("session lifetime is out of range")]
    ExpiryOverflow,
}

/// persistent string key/value storage for session data
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.values.insert(key.to_owned(), value);

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);

        Ok(())
    }
}

/// json object on disk, written through on every change
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStorage {
    /// loads the given file. a missing file starts out empty
    pub fn load<P>(path: P) -> Result<Self, StorageError>
    where
        P: Into<PathBuf>
    {
        let path = path.into();

        let values = match std::fs::OpenOptions::new().read(true).open(&path) {
            Ok(file) => {
                let reader = std::io::BufReader::new(file);

                serde_json::from_reader(reader)?
            },
            Err(err) => match err.kind() {
                std::io::ErrorKind::NotFound => BTreeMap::new(),
                _ => {
                    return Err(StorageError::Io(err));
                }
            }
        };

        Ok(FileStorage { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<(), StorageError> {
        let file = std::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&self.path)?;
        let mut writer = std::io::BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, &self.values)?;

        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.values.insert(key.to_owned(), value);
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.values.remove(key).is_some() {
            self.save()
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn file_storage_persists_between_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        {
            let mut storage = FileStorage::load(&path).unwrap();
            storage.set("token", "abc".into()).unwrap();
            storage.set("other", "1".into()).unwrap();
            storage.remove("other").unwrap();
        }

        let storage = FileStorage::load(&path).unwrap();

        assert_eq!(storage.get("token").as_deref(), Some("abc"));
        assert_eq!(storage.get("other"), None);
    }

    #[test]
    fn file_storage_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::load(dir.path().join("none.json")).unwrap();

        assert_eq!(storage.get("token"), None);
    }

    #[test]
    fn file_storage_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");

        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(FileStorage::load(&path), Err(StorageError::Json(_))));
    }
}
