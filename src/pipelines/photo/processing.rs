// SPDX-License-Identifier: MPL-2.0

//! Film filter engine and its background worker
//!
//! [`apply_filter`] runs a [`FilmType`]'s stage list over a copy of the input
//! raster. [`FilterWorker`] moves the CPU-bound decode → filter → encode job
//! onto tokio's blocking pool, with a semaphore bounding how many jobs run at
//! once.

use super::encoding::{decode, encode};
use super::filters;
use super::RasterImage;
use crate::constants::film::{VIGNETTE_INNER, VIGNETTE_OUTER};
use crate::errors::ImageError;
use crate::film::FilmType;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// One primitive adjustment in a film's pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterStage {
    /// Convert to grayscale
    Desaturate,
    /// Contrast factor around mid-grey (1.0 = no change)
    Contrast(f32),
    /// Saturation factor (1.0 = no change)
    Saturation(f32),
    /// Signed per-channel level offsets
    ChannelOffset { red: i16, green: i16, blue: i16 },
    /// Deterministic noise bounded by `amplitude` levels
    ///
    /// [`apply_filter`] mixes `seed` with the input's content seed.
    Grain { amplitude: u8, seed: u32 },
    /// Edge darkening strength (0.0 - 1.0)
    Vignette(f32),
}

impl FilterStage {
    /// Run this stage, consuming the previous raster and yielding the next
    pub fn apply(&self, mut image: RasterImage) -> RasterImage {
        match *self {
            FilterStage::Desaturate => filters::desaturate(&mut image),
            FilterStage::Contrast(factor) => filters::adjust_contrast(&mut image, factor),
            FilterStage::Saturation(factor) => filters::adjust_saturation(&mut image, factor),
            FilterStage::ChannelOffset { red, green, blue } => {
                filters::offset_channels(&mut image, red, green, blue)
            }
            FilterStage::Grain { amplitude, seed } => {
                filters::add_grain(&mut image, amplitude, seed)
            }
            FilterStage::Vignette(strength) => {
                filters::vignette(&mut image, strength, VIGNETTE_INNER, VIGNETTE_OUTER)
            }
        }
        image
    }

    /// Mix `content` into the grain seed; other stages are unchanged
    pub fn seeded(self, content: u32) -> Self {
        match self {
            FilterStage::Grain { amplitude, seed } => FilterStage::Grain {
                amplitude,
                seed: seed ^ content,
            },
            other => other,
        }
    }
}

/// Apply a film look to a raster
///
/// The input is left untouched. Grain is seeded from the input's content, so
/// the same input always gives the same output. Fails only for
/// zero-dimension rasters.
pub fn apply_filter(image: &RasterImage, film: FilmType) -> Result<RasterImage, ImageError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidImage { width, height });
    }

    let content = filters::content_seed(image);
    let filtered = film
        .stages()
        .iter()
        .fold(image.clone(), |current, stage| stage.seeded(content).apply(current));

    debug!(width, height, ?film, "Film filter applied");
    Ok(filtered)
}

/// Decode captured bytes, apply the film, re-encode as JPEG
pub fn filter_encoded(bytes: &[u8], film: FilmType, quality: u8) -> Result<Vec<u8>, ImageError> {
    let image = decode(bytes)?;
    let filtered = apply_filter(&image, film)?;
    encode(&filtered, quality)
}

/// Bounded background executor for filter jobs
///
/// Cloning shares the same permit pool.
#[derive(Debug, Clone)]
pub struct FilterWorker {
    permits: Arc<Semaphore>,
}

impl FilterWorker {
    /// Create a worker that runs at most `max_jobs` filter jobs at once
    pub fn new(max_jobs: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_jobs.max(1))),
        }
    }

    /// Run [`filter_encoded`] off the calling task
    ///
    /// Waits for a free slot, then runs the job on the blocking pool and
    /// delivers its result.
    pub async fn process(
        &self,
        bytes: Arc<Vec<u8>>,
        film: FilmType,
        quality: u8,
    ) -> Result<Vec<u8>, ImageError> {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| ImageError::Encode(format!("Filter worker closed: {}", e)))?;

        info!(size = bytes.len(), ?film, quality, "Starting filter job");

        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            filter_encoded(&bytes, film, quality)
        });

        handle
            .await
            .map_err(|e| ImageError::Encode(format!("Filter task error: {}", e)))?
    }

    /// Filter slots currently free
    pub fn available_slots(&self) -> usize {
        self.permits.available_permits()
    }
}

impl Default for FilterWorker {
    fn default() -> Self {
        Self::new(crate::constants::workers::default_filter_workers())
    }
}
