// SPDX-License-Identifier: GPL-3.0-only

//! Original/filtered image pairs
//!
//! [`ImagePairStore`] owns the ordered pair collection (oldest first) and keeps
//! it in step with two parallel path lists in a [`PathStore`]. All mutations
//! hold one lock across the durable write, so appends never interleave.

use super::filesystem::FileSystem;
use super::path_store::PathStore;
use crate::constants::storage::{FILTERED_IMAGES_KEY, ORIGINAL_IMAGES_KEY};
use crate::errors::PersistError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// The original and filtered files produced by one capture
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImagePair {
    original_path: PathBuf,
    filtered_path: PathBuf,
}

impl ImagePair {
    pub fn new(original_path: impl Into<PathBuf>, filtered_path: impl Into<PathBuf>) -> Self {
        Self {
            original_path: original_path.into(),
            filtered_path: filtered_path.into(),
        }
    }

    /// Unfiltered capture as delivered by the source
    pub fn original_path(&self) -> &Path {
        &self.original_path
    }

    /// Capture with the film look applied
    pub fn filtered_path(&self) -> &Path {
        &self.filtered_path
    }
}

/// Ordered, persisted collection of image pairs
///
/// The in-memory view is filled from the path store on first use, so a store
/// that was never explicitly loaded still appends onto the saved history.
pub struct ImagePairStore {
    path_store: Arc<dyn PathStore>,
    fs: Arc<dyn FileSystem>,
    pairs: Mutex<Option<Vec<ImagePair>>>,
}

impl ImagePairStore {
    /// Create a store; persisted pairs are read on first access
    pub fn new(path_store: Arc<dyn PathStore>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            path_store,
            fs,
            pairs: Mutex::new(None),
        }
    }

    /// Reload pairs from the path store
    ///
    /// Lists are paired index-wise up to the shorter one. Pairs with identical
    /// paths or a missing file are dropped; the durable lists are left as they
    /// are. The result replaces the in-memory view.
    pub async fn load(&self) -> Vec<ImagePair> {
        let mut pairs = self.pairs.lock().await;
        let loaded = self.read_persisted().await;
        *pairs = Some(loaded.clone());
        loaded
    }

    /// Record a new pair and persist both path lists
    ///
    /// On failure the pair is removed again, so the in-memory view matches the
    /// last successful save.
    pub async fn append(&self, pair: ImagePair) -> Result<(), PersistError> {
        let mut guard = self.pairs.lock().await;
        let pairs = self.loaded(&mut *guard).await;

        let mut next = pairs.clone();
        next.push(pair);
        self.persist(pairs.as_slice(), &next).await?;

        *pairs = next;
        debug!(count = pairs.len(), "Image pair appended");
        Ok(())
    }

    /// Remove the pair at `index` (insertion order) and delete its files
    ///
    /// Returns `Ok(None)` if the index is out of range. File deletion is best
    /// effort and happens only after the lists were saved.
    pub async fn remove(&self, index: usize) -> Result<Option<ImagePair>, PersistError> {
        let mut guard = self.pairs.lock().await;
        let pairs = self.loaded(&mut *guard).await;
        if index >= pairs.len() {
            return Ok(None);
        }

        let mut next = pairs.clone();
        let removed = next.remove(index);
        self.persist(pairs.as_slice(), &next).await?;
        *pairs = next;

        for path in [removed.original_path(), removed.filtered_path()] {
            if let Err(e) = self.fs.delete(path).await {
                debug!(path = %path.display(), error = %e, "Could not delete pair file");
            }
        }

        info!(index, "Image pair removed");
        Ok(Some(removed))
    }

    /// Current pairs, oldest first
    pub async fn all(&self) -> Vec<ImagePair> {
        let mut guard = self.pairs.lock().await;
        self.loaded(&mut *guard).await.clone()
    }

    /// Current pairs, newest first (display order)
    pub async fn newest_first(&self) -> Vec<ImagePair> {
        let mut pairs = self.all().await;
        pairs.reverse();
        pairs
    }

    /// Number of pairs
    pub async fn len(&self) -> usize {
        let mut guard = self.pairs.lock().await;
        self.loaded(&mut *guard).await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// The in-memory view, read from the path store if not loaded yet
    async fn loaded<'a>(&self, slot: &'a mut Option<Vec<ImagePair>>) -> &'a mut Vec<ImagePair> {
        if slot.is_none() {
            *slot = Some(self.read_persisted().await);
        }
        slot.get_or_insert_with(Vec::new)
    }

    async fn read_persisted(&self) -> Vec<ImagePair> {
        let originals = self.path_store.get_string_list(ORIGINAL_IMAGES_KEY).await;
        let filtered = self.path_store.get_string_list(FILTERED_IMAGES_KEY).await;

        if originals.len() != filtered.len() {
            warn!(
                originals = originals.len(),
                filtered = filtered.len(),
                "Path lists differ in length, truncating to the shorter"
            );
        }

        let mut loaded = Vec::with_capacity(originals.len().min(filtered.len()));
        for (original, filtered) in originals.into_iter().zip(filtered) {
            if original == filtered {
                debug!(path = %original, "Dropping pair with identical paths");
                continue;
            }

            let pair = ImagePair::new(original, filtered);
            if self.fs.exists(pair.original_path()).await
                && self.fs.exists(pair.filtered_path()).await
            {
                loaded.push(pair);
            } else {
                debug!(
                    original = %pair.original_path().display(),
                    filtered = %pair.filtered_path().display(),
                    "Dropping pair with missing file"
                );
            }
        }

        info!(count = loaded.len(), "Image pairs loaded");
        loaded
    }

    /// Write both lists for `next`
    ///
    /// If the second write fails the first list is restored from `previous`
    /// so the two stay the same length.
    async fn persist(&self, previous: &[ImagePair], next: &[ImagePair]) -> Result<(), PersistError> {
        let (originals, filtered) = path_lists(next);

        self.path_store
            .set_string_list(ORIGINAL_IMAGES_KEY, originals)
            .await?;

        if let Err(e) = self
            .path_store
            .set_string_list(FILTERED_IMAGES_KEY, filtered)
            .await
        {
            let (restored, _) = path_lists(previous);
            if let Err(restore_err) = self
                .path_store
                .set_string_list(ORIGINAL_IMAGES_KEY, restored)
                .await
            {
                warn!(error = %restore_err, "Failed to restore original path list");
            }
            return Err(e);
        }

        Ok(())
    }
}

fn path_lists(pairs: &[ImagePair]) -> (Vec<String>, Vec<String>) {
    pairs
        .iter()
        .map(|pair| {
            (
                pair.original_path.to_string_lossy().into_owned(),
                pair.filtered_path.to_string_lossy().into_owned(),
            )
        })
        .unzip()
}
