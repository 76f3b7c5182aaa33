//! Local key/value store for session data
//!
//! Holds the applicant email and auth flags between runs. No transactional
//! guarantees: each write rewrites the whole file.

use directories::ProjectDirs;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access store file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode store: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String-keyed get/set/remove store
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process store, used when no data directory is available
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// JSON-file-backed store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Default location under the platform data directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "onboard", "onboard-tui")
            .map(|dirs| dirs.data_dir().join("session.json"))
    }

    /// Open the store, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content).map_err(io_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

const USER_EMAIL: &str = "user.email";
const REGISTERED: &str = "auth.registered";
const APPLICATION_REFERENCE: &str = "kyc.reference";

/// Typed session operations over a key/value store
pub struct Session {
    store: Box<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::default()))
    }

    /// Email of an applicant who finished registration
    pub fn registered_email(&self) -> Option<String> {
        let registered = self.store.get(REGISTERED).is_some_and(|v| v == "true");
        if registered {
            self.store.get(USER_EMAIL).filter(|e| !e.is_empty())
        } else {
            None
        }
    }

    pub fn register(&mut self, email: &str) -> Result<(), StoreError> {
        self.store.set(USER_EMAIL, email)?;
        self.store.set(REGISTERED, "true")
    }

    pub fn record_reference(&mut self, reference: &str) -> Result<(), StoreError> {
        self.store.set(APPLICATION_REFERENCE, reference)
    }

    pub fn last_reference(&self) -> Option<String> {
        self.store.get(APPLICATION_REFERENCE)
    }

    pub fn sign_out(&mut self) -> Result<(), StoreError> {
        self.store.remove(REGISTERED)?;
        self.store.remove(USER_EMAIL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("onboard-store-{}", uuid::Uuid::new_v4()))
            .join("session.json")
    }

    mod memory_store {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_set_get_remove() {
            let mut store = MemoryStore::default();
            assert_eq!(store.get("k"), None);
            store.set("k", "v").unwrap();
            assert_eq!(store.get("k").as_deref(), Some("v"));
            store.remove("k").unwrap();
            assert_eq!(store.get("k"), None);
        }
    }

    mod file_store {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_missing_file_opens_empty() {
            let store = FileStore::open(temp_path()).unwrap();
            assert_eq!(store.get("anything"), None);
        }

        #[test]
        fn test_values_persist_across_open() {
            let path = temp_path();
            {
                let mut store = FileStore::open(&path).unwrap();
                store.set("user.email", "ops@acme.com").unwrap();
            }
            let store = FileStore::open(&path).unwrap();
            assert_eq!(store.get("user.email").as_deref(), Some("ops@acme.com"));
            fs::remove_dir_all(path.parent().unwrap()).unwrap();
        }

        #[test]
        fn test_corrupt_file_is_reported() {
            let path = temp_path();
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "not json").unwrap();
            let err = FileStore::open(&path).unwrap_err();
            assert!(matches!(err, StoreError::Corrupt { .. }));
            fs::remove_dir_all(path.parent().unwrap()).unwrap();
        }

        #[test]
        fn test_default_path_is_json() {
            if let Some(path) = FileStore::default_path() {
                assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
            }
        }
    }

    mod session {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_unregistered_by_default() {
            let session = Session::in_memory();
            assert_eq!(session.registered_email(), None);
        }

        #[test]
        fn test_register_then_sign_out() {
            let mut session = Session::in_memory();
            session.register("ops@acme.com").unwrap();
            assert_eq!(session.registered_email().as_deref(), Some("ops@acme.com"));
            session.sign_out().unwrap();
            assert_eq!(session.registered_email(), None);
        }

        #[test]
        fn test_email_without_flag_is_not_registered() {
            let mut store = MemoryStore::default();
            store.set("user.email", "ops@acme.com").unwrap();
            let session = Session::new(Box::new(store));
            assert_eq!(session.registered_email(), None);
        }

        #[test]
        fn test_reference_recorded() {
            let mut session = Session::in_memory();
            session.record_reference("KYC-42").unwrap();
            assert_eq!(session.last_reference().as_deref(), Some("KYC-42"));
        }
    }
}
