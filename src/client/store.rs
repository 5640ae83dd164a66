// ABOUTME: Local key-value store persisting the last profile and plan as a single JSON file
// ABOUTME: Initialized on load, rewritten wholesale on every change, and cleared on reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Local Store
//!
//! The terminal client keeps its state the way a browser keeps `localStorage`:
//! string keys mapping to JSON documents. Two keys are used,
//! [`USER_PROFILE_KEY`] and [`FITNESS_PLAN_KEY`]; both are overwritten together
//! after each successful generation and removed together on reset.
//!
//! Writes go to a sibling temporary file that is then renamed over the store,
//! so a crash mid-write leaves the previous contents intact. Every change is
//! made on a copy of the entries and only kept once the file write succeeds,
//! so memory never runs ahead of disk. Concurrent writers are last-write-wins.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::constants::storage::{FITNESS_PLAN_KEY, STORE_FILE_NAME, USER_PROFILE_KEY};
use crate::models::{FitnessPlan, UserProfile};

/// Directory name under the platform data directory
const APP_DIR_NAME: &str = "fitplan";

/// Store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// No data directory could be determined for this platform
    #[error("could not determine a data directory, set FITPLAN_DATA_DIR")]
    NoDataDir,
    /// Reading or writing the store file failed
    #[error("store I/O error at {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
    /// The store file or an entry is not valid JSON for the requested type
    #[error("store entry '{key}' is invalid: {source}")]
    Invalid {
        /// Entry key, or the file name for a corrupt store
        key: String,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

/// Persisted profile and plan pair
#[derive(Debug, Clone, PartialEq)]
pub struct SavedSession {
    /// Profile the plan was generated from
    pub profile: UserProfile,
    /// Last generated plan
    pub plan: FitnessPlan,
}

/// JSON-file key-value store
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl LocalStore {
    /// Open the store inside `data_dir`, or the platform data directory
    ///
    /// # Errors
    ///
    /// Returns an error if no directory can be determined or the file exists
    /// but cannot be read
    pub fn open_in(data_dir: Option<&Path>) -> Result<Self, StoreError> {
        let dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => dirs::data_dir()
                .ok_or(StoreError::NoDataDir)?
                .join(APP_DIR_NAME),
        };
        Self::open(dir.join(STORE_FILE_NAME))
    }

    /// Open the store at `path`, starting empty when the file does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|source| StoreError::Invalid {
                    key: STORE_FILE_NAME.to_owned(),
                    source,
                })?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No local store yet, starting empty");
                BTreeMap::new()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        Ok(Self { path, entries })
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the store holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read and decode an entry
    ///
    /// # Errors
    ///
    /// Returns an error if the entry exists but does not decode as `T`
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        self.entries
            .get(key)
            .map(|value| {
                T::deserialize(value).map_err(|source| StoreError::Invalid {
                    key: key.to_owned(),
                    source,
                })
            })
            .transpose()
    }

    /// Encode and write an entry, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or persisting fails
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value).map_err(|source| StoreError::Invalid {
            key: key.to_owned(),
            source,
        })?;
        let mut entries = self.entries.clone();
        entries.insert(key.to_owned(), value);
        self.commit(entries)
    }

    /// Remove an entry, returning whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails
    pub fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        if !self.entries.contains_key(key) {
            return Ok(false);
        }
        let mut entries = self.entries.clone();
        entries.remove(key);
        self.commit(entries)?;
        Ok(true)
    }

    /// Remove every entry
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.commit(BTreeMap::new())
    }

    /// Save a freshly generated plan together with its profile
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails
    pub fn save_session(
        &mut self,
        profile: &UserProfile,
        plan: &FitnessPlan,
    ) -> Result<(), StoreError> {
        let profile = serde_json::to_value(profile).map_err(|source| StoreError::Invalid {
            key: USER_PROFILE_KEY.to_owned(),
            source,
        })?;
        let plan = serde_json::to_value(plan).map_err(|source| StoreError::Invalid {
            key: FITNESS_PLAN_KEY.to_owned(),
            source,
        })?;
        let mut entries = self.entries.clone();
        entries.insert(USER_PROFILE_KEY.to_owned(), profile);
        entries.insert(FITNESS_PLAN_KEY.to_owned(), plan);
        self.commit(entries)
    }

    /// Saved profile, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the stored profile is invalid
    pub fn load_profile(&self) -> Result<Option<UserProfile>, StoreError> {
        self.get(USER_PROFILE_KEY)
    }

    /// Saved plan, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the stored plan is invalid
    pub fn load_plan(&self) -> Result<Option<FitnessPlan>, StoreError> {
        self.get(FITNESS_PLAN_KEY)
    }

    /// Saved profile and plan, only when both are present
    ///
    /// # Errors
    ///
    /// Returns an error if either stored entry is invalid
    pub fn load_session(&self) -> Result<Option<SavedSession>, StoreError> {
        match (self.load_profile()?, self.load_plan()?) {
            (Some(profile), Some(plan)) => Ok(Some(SavedSession { profile, plan })),
            (None, None) => Ok(None),
            _ => {
                warn!("Local store holds only half a session, ignoring it");
                Ok(None)
            }
        }
    }

    /// Forget the saved profile and plan
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails
    pub fn reset(&mut self) -> Result<(), StoreError> {
        let mut entries = self.entries.clone();
        entries.remove(USER_PROFILE_KEY);
        entries.remove(FITNESS_PLAN_KEY);
        self.commit(entries)
    }

    /// Write `entries` to disk, then make them the in-memory state
    fn commit(&mut self, entries: BTreeMap<String, Value>) -> Result<(), StoreError> {
        self.persist(&entries)?;
        self.entries = entries;
        Ok(())
    }

    fn persist(&self, entries: &BTreeMap<String, Value>) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let contents =
            serde_json::to_string_pretty(entries).map_err(|source| StoreError::Invalid {
                key: STORE_FILE_NAME.to_owned(),
                source,
            })?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, contents).map_err(io_error)?;
        fs::rename(&staging, &self.path).map_err(io_error)?;

        debug!(path = %self.path.display(), entries = entries.len(), "Local store saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open_in(Some(dir.path())).unwrap();
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_set_get_remove_persist_across_reopen() {
        let dir = TempDir::new().unwrap();
        let mut store = LocalStore::open_in(Some(dir.path())).unwrap();
        store.set("theme", &"dark").unwrap();
        store.set("count", &3_u32).unwrap();

        let mut reopened = LocalStore::open_in(Some(dir.path())).unwrap();
        assert_eq!(reopened.get::<String>("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get::<u32>("count").unwrap(), Some(3));

        assert!(reopened.remove("theme").unwrap());
        assert!(!reopened.remove("theme").unwrap());
        reopened.clear().unwrap();

        let emptied = LocalStore::open_in(Some(dir.path())).unwrap();
        assert!(emptied.is_empty());
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut store = LocalStore::open_in(Some(dir.path())).unwrap();
        store.set("count", &"three").unwrap();
        assert!(matches!(
            store.get::<u32>("count"),
            Err(StoreError::Invalid { key, .. }) if key == "count"
        ));
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        let mut store = LocalStore::open_in(Some(dir.path())).unwrap();
        store.set("theme", &"dark").unwrap();

        // A directory where the staging file should go makes every write fail
        fs::create_dir(store.path().with_extension("json.tmp")).unwrap();

        assert!(matches!(
            store.set("theme", &"light"),
            Err(StoreError::Io { .. })
        ));
        assert!(store.remove("theme").is_err());
        assert!(store.clear().is_err());

        assert_eq!(store.get::<String>("theme").unwrap().as_deref(), Some("dark"));
        let reopened = LocalStore::open_in(Some(dir.path())).unwrap();
        assert_eq!(reopened.get::<String>("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(STORE_FILE_NAME), "{not json").unwrap();
        assert!(matches!(
            LocalStore::open_in(Some(dir.path())),
            Err(StoreError::Invalid { .. })
        ));
    }
}
