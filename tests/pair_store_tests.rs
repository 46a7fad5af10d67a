// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the image pair store

use filmcam::PersistError;
use filmcam::constants::storage::{FILTERED_IMAGES_KEY, ORIGINAL_IMAGES_KEY};
use filmcam::storage::{
    ImagePair, ImagePairStore, JsonPathStore, LocalFileSystem, MemoryPathStore, PathStore,
};
use futures::future::BoxFuture;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::tempdir;

fn touch(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, b"jpeg").unwrap();
    path.to_string_lossy().into_owned()
}

fn pair_on_disk(dir: &Path, n: usize) -> ImagePair {
    ImagePair::new(
        touch(dir, &format!("original_{}.jpg", n)),
        touch(dir, &format!("filtered_{}.jpg", n)),
    )
}

/// Wraps a memory store and fails writes on demand
#[derive(Default)]
struct FlakyPathStore {
    inner: MemoryPathStore,
    fail_originals: AtomicBool,
    fail_filtered: AtomicBool,
}

impl FlakyPathStore {
    async fn list(&self, key: &str) -> Vec<String> {
        self.inner.get_string_list(key).await
    }
}

impl PathStore for FlakyPathStore {
    fn get_string_list<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Vec<String>> {
        self.inner.get_string_list(key)
    }

    fn set_string_list<'a>(
        &'a self,
        key: &'a str,
        values: Vec<String>,
    ) -> BoxFuture<'a, Result<(), PersistError>> {
        let fail = match key {
            ORIGINAL_IMAGES_KEY => self.fail_originals.load(Ordering::SeqCst),
            FILTERED_IMAGES_KEY => self.fail_filtered.load(Ordering::SeqCst),
            _ => false,
        };
        if fail {
            return Box::pin(async { Err(PersistError::WriteFailed("disk full".into())) });
        }
        self.inner.set_string_list(key, values)
    }
}

#[tokio::test]
async fn test_appended_pair_survives_reload() {
    let dir = tempdir().unwrap();
    let store_file = dir.path().join("images.json");

    let first = pair_on_disk(dir.path(), 1);
    let second = pair_on_disk(dir.path(), 2);

    let store = ImagePairStore::new(
        Arc::new(JsonPathStore::new(&store_file)),
        Arc::new(LocalFileSystem),
    );
    store.load().await;
    store.append(first.clone()).await.unwrap();
    store.append(second.clone()).await.unwrap();

    let reopened = ImagePairStore::new(
        Arc::new(JsonPathStore::new(&store_file)),
        Arc::new(LocalFileSystem),
    );
    let pairs = reopened.load().await;

    assert_eq!(pairs, vec![first, second.clone()]);
    assert_eq!(pairs.iter().filter(|p| **p == second).count(), 1);
    assert_eq!(pairs.last(), Some(&second));
    assert_eq!(reopened.all().await, pairs);
}

#[tokio::test]
async fn test_pair_with_missing_file_is_dropped() {
    let dir = tempdir().unwrap();
    let pairs: Vec<ImagePair> = (0..3).map(|n| pair_on_disk(dir.path(), n)).collect();
    std::fs::remove_file(pairs[1].filtered_path()).unwrap();

    let path_store = MemoryPathStore::new()
        .with_list(
            ORIGINAL_IMAGES_KEY,
            pairs
                .iter()
                .map(|p| p.original_path().to_string_lossy().into_owned())
                .collect(),
        )
        .with_list(
            FILTERED_IMAGES_KEY,
            pairs
                .iter()
                .map(|p| p.filtered_path().to_string_lossy().into_owned())
                .collect(),
        );

    let store = ImagePairStore::new(Arc::new(path_store), Arc::new(LocalFileSystem));
    let loaded = store.load().await;

    assert_eq!(loaded, vec![pairs[0].clone(), pairs[2].clone()]);
}

#[tokio::test]
async fn test_uneven_lists_truncate_to_shorter() {
    let dir = tempdir().unwrap();
    let originals: Vec<String> = (0..5)
        .map(|n| touch(dir.path(), &format!("original_{}.jpg", n)))
        .collect();
    let filtered: Vec<String> = (0..3)
        .map(|n| touch(dir.path(), &format!("filtered_{}.jpg", n)))
        .collect();

    let path_store = MemoryPathStore::new()
        .with_list(ORIGINAL_IMAGES_KEY, originals.clone())
        .with_list(FILTERED_IMAGES_KEY, filtered.clone());

    let store = ImagePairStore::new(Arc::new(path_store), Arc::new(LocalFileSystem));
    let loaded = store.load().await;

    assert_eq!(loaded.len(), 3);
    for (n, pair) in loaded.iter().enumerate() {
        assert_eq!(pair.original_path(), Path::new(&originals[n]));
        assert_eq!(pair.filtered_path(), Path::new(&filtered[n]));
    }
}

#[tokio::test]
async fn test_failed_append_rolls_back() {
    let dir = tempdir().unwrap();
    let path_store = Arc::new(FlakyPathStore::default());
    let store = ImagePairStore::new(path_store.clone(), Arc::new(LocalFileSystem));

    let kept = pair_on_disk(dir.path(), 1);
    store.append(kept.clone()).await.unwrap();

    path_store.fail_originals.store(true, Ordering::SeqCst);
    let result = store.append(pair_on_disk(dir.path(), 2)).await;

    assert!(matches!(result, Err(PersistError::WriteFailed(_))));
    assert_eq!(store.all().await, vec![kept]);
}

#[tokio::test]
async fn test_second_list_failure_restores_first() {
    let dir = tempdir().unwrap();
    let path_store = Arc::new(FlakyPathStore::default());
    let store = ImagePairStore::new(path_store.clone(), Arc::new(LocalFileSystem));

    let kept = pair_on_disk(dir.path(), 1);
    store.append(kept.clone()).await.unwrap();

    path_store.fail_filtered.store(true, Ordering::SeqCst);
    assert!(store.append(pair_on_disk(dir.path(), 2)).await.is_err());

    assert_eq!(store.all().await, vec![kept.clone()]);
    assert_eq!(
        path_store.list(ORIGINAL_IMAGES_KEY).await,
        vec![kept.original_path().to_string_lossy().into_owned()]
    );
    assert_eq!(path_store.list(FILTERED_IMAGES_KEY).await.len(), 1);

    // A reload sees exactly the last successful save
    let reloaded = ImagePairStore::new(path_store.clone(), Arc::new(LocalFileSystem));
    assert_eq!(reloaded.load().await, vec![kept]);
}

#[tokio::test]
async fn test_remove_is_persisted() {
    let dir = tempdir().unwrap();
    let store_file = dir.path().join("images.json");
    let store = ImagePairStore::new(
        Arc::new(JsonPathStore::new(&store_file)),
        Arc::new(LocalFileSystem),
    );

    let first = pair_on_disk(dir.path(), 1);
    let second = pair_on_disk(dir.path(), 2);
    store.append(first.clone()).await.unwrap();
    store.append(second.clone()).await.unwrap();

    assert_eq!(store.remove(0).await.unwrap(), Some(first.clone()));
    assert!(!first.original_path().exists());

    let reopened = ImagePairStore::new(
        Arc::new(JsonPathStore::new(&store_file)),
        Arc::new(LocalFileSystem),
    );
    assert_eq!(reopened.load().await, vec![second]);
}

#[tokio::test]
async fn test_append_after_restart_keeps_saved_pairs() {
    let dir = tempdir().unwrap();
    let store_file = dir.path().join("images.json");

    let saved: Vec<ImagePair> = (0..2).map(|n| pair_on_disk(dir.path(), n)).collect();
    let store = ImagePairStore::new(
        Arc::new(JsonPathStore::new(&store_file)),
        Arc::new(LocalFileSystem),
    );
    for pair in &saved {
        store.append(pair.clone()).await.unwrap();
    }

    // Fresh store on the same file, appended to without an explicit load
    let restarted = ImagePairStore::new(
        Arc::new(JsonPathStore::new(&store_file)),
        Arc::new(LocalFileSystem),
    );
    let third = pair_on_disk(dir.path(), 2);
    restarted.append(third.clone()).await.unwrap();

    let reopened = ImagePairStore::new(
        Arc::new(JsonPathStore::new(&store_file)),
        Arc::new(LocalFileSystem),
    );
    assert_eq!(
        reopened.load().await,
        vec![saved[0].clone(), saved[1].clone(), third]
    );
}

#[tokio::test]
async fn test_remove_after_restart_keeps_other_pairs() {
    let dir = tempdir().unwrap();
    let store_file = dir.path().join("images.json");

    let store = ImagePairStore::new(
        Arc::new(JsonPathStore::new(&store_file)),
        Arc::new(LocalFileSystem),
    );
    let first = pair_on_disk(dir.path(), 1);
    let second = pair_on_disk(dir.path(), 2);
    store.append(first.clone()).await.unwrap();
    store.append(second.clone()).await.unwrap();

    let restarted = ImagePairStore::new(
        Arc::new(JsonPathStore::new(&store_file)),
        Arc::new(LocalFileSystem),
    );
    assert_eq!(restarted.remove(1).await.unwrap(), Some(second));
    assert_eq!(restarted.all().await, vec![first]);
}
