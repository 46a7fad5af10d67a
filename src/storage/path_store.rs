// SPDX-License-Identifier: GPL-3.0-only

//! Durable key-value store for path lists
//!
//! The pair store persists two parallel string lists through this trait.
//! [`JsonPathStore`] keeps every key in one JSON object on disk;
//! [`MemoryPathStore`] keeps them in process.

use crate::errors::PersistError;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Durable string-list storage
pub trait PathStore: Send + Sync {
    /// Read the list stored under `key` (empty if absent)
    fn get_string_list<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Vec<String>>;

    /// Replace the list stored under `key`
    fn set_string_list<'a>(
        &'a self,
        key: &'a str,
        values: Vec<String>,
    ) -> BoxFuture<'a, Result<(), PersistError>>;
}

type Lists = HashMap<String, Vec<String>>;

/// Path lists stored as one JSON object file
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a crash mid-write leaves the previous snapshot intact.
#[derive(Debug)]
pub struct JsonPathStore {
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonPathStore {
    /// Create a store backed by `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Backing file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_lists(&self) -> Lists {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Lists::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read path store");
                return Lists::new();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Path store is malformed, ignoring");
            Lists::new()
        })
    }

    async fn write_lists(&self, lists: &Lists) -> Result<(), PersistError> {
        let content = serde_json::to_string_pretty(lists)
            .map_err(|e| PersistError::WriteFailed(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

impl PathStore for JsonPathStore {
    fn get_string_list<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Vec<String>> {
        Box::pin(async move {
            self.read_lists()
                .await
                .remove(key)
                .unwrap_or_default()
        })
    }

    fn set_string_list<'a>(
        &'a self,
        key: &'a str,
        values: Vec<String>,
    ) -> BoxFuture<'a, Result<(), PersistError>> {
        Box::pin(async move {
            let _guard = self.write_lock.lock().await;
            let mut lists = self.read_lists().await;
            let count = values.len();
            lists.insert(key.to_string(), values);
            self.write_lists(&lists).await?;
            debug!(key, count, path = %self.path.display(), "Path list saved");
            Ok(())
        })
    }
}

/// In-process path store
#[derive(Debug, Default)]
pub struct MemoryPathStore {
    lists: Mutex<Lists>,
}

impl MemoryPathStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key directly
    pub fn with_list(self, key: &str, values: Vec<String>) -> Self {
        if let Ok(mut lists) = self.lists.lock() {
            lists.insert(key.to_string(), values);
        }
        self
    }
}

impl PathStore for MemoryPathStore {
    fn get_string_list<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Vec<String>> {
        let values = self
            .lists
            .lock()
            .ok()
            .and_then(|lists| lists.get(key).cloned())
            .unwrap_or_default();
        Box::pin(async move { values })
    }

    fn set_string_list<'a>(
        &'a self,
        key: &'a str,
        values: Vec<String>,
    ) -> BoxFuture<'a, Result<(), PersistError>> {
        let result = self
            .lists
            .lock()
            .map(|mut lists| {
                lists.insert(key.to_string(), values);
            })
            .map_err(|e| PersistError::WriteFailed(e.to_string()));
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPathStore::new(dir.path().join("data").join("images.json"));
        store
            .set_string_list("original_images", vec!["a".into(), "b".into()])
            .await
            .unwrap();
        store
            .set_string_list("filtered_images", vec!["c".into()])
            .await
            .unwrap();

        let reopened = JsonPathStore::new(store.path());
        assert_eq!(
            reopened.get_string_list("original_images").await,
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(
            reopened.get_string_list("filtered_images").await,
            vec!["c".to_string()]
        );
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPathStore::new(dir.path().join("absent.json"));
        assert!(store.get_string_list("original_images").await.is_empty());
    }

    #[tokio::test]
    async fn test_json_store_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("images.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonPathStore::new(&path);
        assert!(store.get_string_list("original_images").await.is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_seed_and_replace() {
        let store = MemoryPathStore::new().with_list("k", vec!["1".into()]);
        assert_eq!(store.get_string_list("k").await, vec!["1".to_string()]);
        store.set_string_list("k", vec![]).await.unwrap();
        assert!(store.get_string_list("k").await.is_empty());
    }
}
