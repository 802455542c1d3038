use crate::domain::{DomainError, DomainResult, StoragePort};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Stores each key as `<key>.json` inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StoragePort for FileStorage {
    fn load(&self, key: &str) -> DomainResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::Storage(e.to_string())),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> DomainResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| DomainError::Storage(e.to_string()))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| DomainError::Storage(e.to_string()))?;
        fs::rename(&tmp, &path).map_err(|e| DomainError::Storage(e.to_string()))
    }
}

/// Keeps records in memory only. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: HashMap<String, String>,
}

impl StoragePort for MemoryStorage {
    fn load(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.records.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> DomainResult<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{APPOINTMENTS_KEY, PETS_KEY};
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_missing_key() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.load(APPOINTMENTS_KEY), Ok(None));
    }

    #[test]
    fn test_file_storage_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));

        storage.save(PETS_KEY, "[]").unwrap();
        assert_eq!(storage.load(PETS_KEY), Ok(Some("[]".to_string())));
        assert!(storage.path_for(PETS_KEY).exists());
        assert!(!storage.path_for(PETS_KEY).with_extension("json.tmp").exists());

        storage.save(PETS_KEY, "[1]").unwrap();
        assert_eq!(storage.load(PETS_KEY), Ok(Some("[1]".to_string())));
    }

    #[test]
    fn test_file_storage_keys_are_independent() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.save(PETS_KEY, "pets").unwrap();
        storage.save(APPOINTMENTS_KEY, "appointments").unwrap();

        assert_eq!(storage.load(PETS_KEY).unwrap().as_deref(), Some("pets"));
        assert_eq!(storage.load(APPOINTMENTS_KEY).unwrap().as_deref(), Some("appointments"));
    }

    #[test]
    fn test_file_storage_save_into_file_path_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut storage = FileStorage::new(&blocker);
        assert!(matches!(storage.save(PETS_KEY, "[]"), Err(DomainError::Storage(_))));
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::default();
        assert_eq!(storage.load("k"), Ok(None));
        storage.save("k", "v").unwrap();
        assert_eq!(storage.load("k"), Ok(Some("v".to_string())));
    }
}
