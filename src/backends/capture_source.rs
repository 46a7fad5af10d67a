// SPDX-License-Identifier: GPL-3.0-only

//! Capture sources
//!
//! A capture source delivers the encoded bytes of one still photo. Device
//! access and permissions live behind this trait.

use crate::constants::file_formats;
use crate::errors::CaptureSourceError;
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Source of raw photo bytes
pub trait CaptureSource: Send + Sync {
    /// Take one photo
    ///
    /// Suspends until the source delivers encoded image bytes or fails.
    fn take_photo(&self) -> BoxFuture<'_, Result<Vec<u8>, CaptureSourceError>>;
}

/// Capture source that "takes" a photo by reading an image file
///
/// Acts as a virtual camera for the command line and for tests.
#[derive(Debug, Clone)]
pub struct FileCaptureSource {
    path: PathBuf,
}

impl FileCaptureSource {
    /// Create a source for an image file
    ///
    /// Only the extension is checked here; the file is read on each capture.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, CaptureSourceError> {
        let path = path.into();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        if !file_formats::is_image_extension(&extension) {
            return Err(CaptureSourceError::NotAvailable(format!(
                "Unsupported file format: {}",
                extension
            )));
        }

        Ok(Self { path })
    }

    /// Path this source reads from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CaptureSource for FileCaptureSource {
    fn take_photo(&self) -> BoxFuture<'_, Result<Vec<u8>, CaptureSourceError>> {
        Box::pin(async move {
            info!(path = %self.path.display(), "Capturing photo from file source");

            let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CaptureSourceError::NotAvailable(format!(
                        "{} does not exist",
                        self.path.display()
                    ))
                } else {
                    CaptureSourceError::from(e)
                }
            })?;

            debug!(size = bytes.len(), "File source delivered photo");
            Ok(bytes)
        })
    }
}
