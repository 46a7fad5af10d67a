// SPDX-License-Identifier: MPL-2.0

//! Photo capture pipeline
//!
//! ```text
//! CaptureSource ─▶ original_<ms>.jpg ─▶ FilterWorker ─▶ filtered_<ms>.jpg ─▶ ImagePairStore
//! ```
//!
//! Either both files end up recorded as a pair, or neither file is left on
//! disk. Only one capture runs per pipeline at a time.

use super::processing::FilterWorker;
use crate::backends::CaptureSource;
use crate::constants::encoding::{FILTERED_MIN_QUALITY, MAX_QUALITY};
use crate::constants::storage::{FILTERED_PREFIX, ORIGINAL_PREFIX, PHOTO_EXTENSION};
use crate::errors::CaptureError;
use crate::film::FilmType;
use crate::pipelines::photo::encoding::EncodingQuality;
use crate::storage::{FileSystem, ImagePair, ImagePairStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, warn};

/// Marks the pipeline busy for as long as it lives
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Capture → filter → save → pair workflow
pub struct CapturePipeline {
    source: Arc<dyn CaptureSource>,
    fs: Arc<dyn FileSystem>,
    store: Arc<ImagePairStore>,
    worker: FilterWorker,
    output_dir: PathBuf,
    quality: u8,
    busy: AtomicBool,
}

impl CapturePipeline {
    /// Create a pipeline writing into `output_dir` with high JPEG quality
    pub fn new(
        source: Arc<dyn CaptureSource>,
        fs: Arc<dyn FileSystem>,
        store: Arc<ImagePairStore>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            fs,
            store,
            worker: FilterWorker::default(),
            output_dir: output_dir.into(),
            quality: EncodingQuality::High.jpeg_quality(),
            busy: AtomicBool::new(false),
        }
    }

    /// Set JPEG quality for filtered output (clamped to 90..=100)
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(FILTERED_MIN_QUALITY, MAX_QUALITY);
        self
    }

    /// Use a specific filter worker (e.g. one shared with other pipelines)
    pub fn with_worker(mut self, worker: FilterWorker) -> Self {
        self.worker = worker;
        self
    }

    /// Whether a capture is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// JPEG quality used for filtered output
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Directory receiving both variants
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Pair store this pipeline records into
    pub fn store(&self) -> &Arc<ImagePairStore> {
        &self.store
    }

    /// Capture one photo with `film` applied
    ///
    /// Returns [`CaptureError::Busy`] immediately if another capture is in
    /// flight. On any failure after the original was written, the files of
    /// this capture are deleted and no pair is recorded.
    pub async fn capture(&self, film: FilmType) -> Result<ImagePair, CaptureError> {
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            warn!("Capture requested while another capture is in flight");
            return Err(CaptureError::Busy);
        };

        info!(?film, "Capturing photo...");

        let raw = self.source.take_photo().await.map_err(|e| {
            error!(error = %e, "Capture source failed");
            CaptureError::from(e)
        })?;

        let original_path = self.unique_path(ORIGINAL_PREFIX).await;
        self.fs
            .write_bytes(&original_path, &raw)
            .await
            .map_err(|e| {
                error!(path = %original_path.display(), error = %e, "Failed to save original");
                CaptureError::Storage(e.to_string())
            })?;
        debug!(path = %original_path.display(), "Original saved");

        let filtered_path = match self.save_filtered(raw, film).await {
            Ok(path) => path,
            Err(e) => {
                error!(error = %e, "Filter stage failed, discarding original");
                self.discard(&original_path).await;
                return Err(e);
            }
        };

        let pair = ImagePair::new(original_path, filtered_path);
        if let Err(e) = self.store.append(pair.clone()).await {
            error!(error = %e, "Failed to record image pair, discarding files");
            self.discard(pair.original_path()).await;
            self.discard(pair.filtered_path()).await;
            return Err(e.into());
        }

        info!(
            original = %pair.original_path().display(),
            filtered = %pair.filtered_path().display(),
            "Photo pair saved"
        );
        Ok(pair)
    }

    /// Decode, filter and encode on the worker, then write the result
    async fn save_filtered(&self, raw: Vec<u8>, film: FilmType) -> Result<PathBuf, CaptureError> {
        let encoded = self
            .worker
            .process(Arc::new(raw), film, self.quality)
            .await?;

        let path = self.unique_path(FILTERED_PREFIX).await;
        if let Err(e) = self.fs.write_bytes(&path, &encoded).await {
            // A failed write may still leave a partial file behind
            self.discard(&path).await;
            return Err(CaptureError::FilterFailed(format!(
                "Failed to save filtered photo: {}",
                e
            )));
        }

        debug!(path = %path.display(), size = encoded.len(), "Filtered photo saved");
        Ok(path)
    }

    /// `{prefix}_{epoch-millis}.jpg`, bumped past any existing file
    async fn unique_path(&self, prefix: &str) -> PathBuf {
        let mut millis = chrono::Utc::now().timestamp_millis();
        loop {
            let path = self
                .output_dir
                .join(format!("{}_{}.{}", prefix, millis, PHOTO_EXTENSION));
            if !self.fs.exists(&path).await {
                return path;
            }
            millis += 1;
        }
    }

    async fn discard(&self, path: &Path) {
        if !self.fs.exists(path).await {
            return;
        }
        if let Err(e) = self.fs.delete(path).await {
            warn!(path = %path.display(), error = %e, "Failed to delete file");
        }
    }
}
