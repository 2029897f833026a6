// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::{debug, info, warn};

use crate::error::StorageError;

pub trait KeyValueStore: Send + Sync {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
	fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
	fn remove(&self, key: &str) -> Result<(), StorageError>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_entries<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			entries: RwLock::new(
				entries
					.into_iter()
					.map(|(k, v)| (k.into(), v.into()))
					.collect(),
			),
		}
	}
}

impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
		Ok(entries.get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
		entries.insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
		entries.remove(key);
		Ok(())
	}
}

/// A JSON object file holding every key.
///
/// Writes go to a temporary sibling and are renamed into place.
#[derive(Debug)]
pub struct FileStore {
	path: PathBuf,
	write_lock: Mutex<()>,
}

impl FileStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			write_lock: Mutex::new(()),
		}
	}

	pub fn from_xdg() -> Result<Self, StorageError> {
		let data_dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
		let dir = data_dir.join("hares");
		std::fs::create_dir_all(&dir)?;

		let path = dir.join("storage.json");
		info!(path = %path.display(), "initialized local key-value store");

		Ok(Self::new(path))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "store file not found");
			return Ok(BTreeMap::new());
		}

		let contents = std::fs::read_to_string(&self.path)?;
		if contents.trim().is_empty() {
			return Ok(BTreeMap::new());
		}

		serde_json::from_str(&contents).map_err(|source| StorageError::Corrupt {
			path: self.path.clone(),
			source,
		})
	}

	fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
		if let Some(parent) = self.path.parent() {
			std::fs::create_dir_all(parent)?;
		}

		let json = serde_json::to_string_pretty(map)?;
		let tmp_path = self.path.with_extension("json.tmp");

		std::fs::write(&tmp_path, json)?;
		std::fs::rename(&tmp_path, &self.path)?;

		debug!(path = %self.path.display(), keys = map.len(), "saved store to disk");
		Ok(())
	}

	fn update<F>(&self, f: F) -> Result<(), StorageError>
	where
		F: FnOnce(&mut BTreeMap<String, String>),
	{
		let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

		let mut map = match self.read_map() {
			Ok(map) => map,
			Err(StorageError::Corrupt { path, source }) => {
				warn!(path = %path.display(), error = %source, "discarding corrupt store file");
				BTreeMap::new()
			}
			Err(e) => return Err(e),
		};

		f(&mut map);
		self.write_map(&map)
	}
}

impl KeyValueStore for FileStore {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		Ok(self.read_map()?.remove(key))
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		self.update(|map| {
			map.insert(key.to_string(), value.to_string());
		})
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		self.update(|map| {
			map.remove(key);
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	fn create_test_store() -> (FileStore, TempDir) {
		let tmp = TempDir::new().unwrap();
		let store = FileStore::new(tmp.path().join("storage.json"));
		(store, tmp)
	}

	#[test]
	fn test_memory_store_set_get_remove() {
		let store = MemoryStore::new();
		assert_eq!(store.get("locale").unwrap(), None);

		store.set("locale", "ar").unwrap();
		assert_eq!(store.get("locale").unwrap(), Some("ar".to_string()));

		store.remove("locale").unwrap();
		assert_eq!(store.get("locale").unwrap(), None);
	}

	#[test]
	fn test_memory_store_with_entries() {
		let store = MemoryStore::with_entries([("token", "abc"), ("locale", "en")]);
		assert_eq!(store.get("token").unwrap(), Some("abc".to_string()));
		assert_eq!(store.get("locale").unwrap(), Some("en".to_string()));
	}

	#[test]
	fn test_file_store_missing_file_reads_empty() {
		let (store, _tmp) = create_test_store();
		assert_eq!(store.get("locale").unwrap(), None);
	}

	#[test]
	fn test_file_store_persists_across_instances() {
		let (store, tmp) = create_test_store();
		store.set("locale", "ar").unwrap();
		store.set("token", "t-1").unwrap();

		let reopened = FileStore::new(tmp.path().join("storage.json"));
		assert_eq!(reopened.get("locale").unwrap(), Some("ar".to_string()));
		assert_eq!(reopened.get("token").unwrap(), Some("t-1".to_string()));
	}

	#[test]
	fn test_file_store_remove_keeps_other_keys() {
		let (store, _tmp) = create_test_store();
		store.set("token", "t-1").unwrap();
		store.set("user", "{}").unwrap();

		store.remove("token").unwrap();

		assert_eq!(store.get("token").unwrap(), None);
		assert_eq!(store.get("user").unwrap(), Some("{}".to_string()));
	}

	#[test]
	fn test_file_store_leaves_no_tmp_file() {
		let (store, tmp) = create_test_store();
		store.set("locale", "en").unwrap();
		assert!(!tmp.path().join("storage.json.tmp").exists());
	}

	#[test]
	fn test_corrupt_file_errors_on_read_and_recovers_on_write() {
		let (store, _tmp) = create_test_store();
		std::fs::write(store.path(), "not json").unwrap();

		assert!(matches!(
			store.get("locale"),
			Err(StorageError::Corrupt { .. })
		));

		store.set("locale", "ar").unwrap();
		assert_eq!(store.get("locale").unwrap(), Some("ar".to_string()));
	}
}
