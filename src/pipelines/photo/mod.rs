// SPDX-License-Identifier: MPL-2.0

//! Async photo capture pipeline
//!
//! ```text
//! Capture Source → Original file → Decode → Film filter → Encode → Filtered file
//!                                  └──────── filter worker ───────┘
//! ```
//!
//! # Pipeline Stages
//!
//! 1. **Capture**: Take raw bytes from the capture source
//! 2. **Original**: Save the bytes unmodified
//! 3. **Filter**: Decode, apply the selected [`FilmType`](crate::film::FilmType), encode (worker pool)
//! 4. **Filtered**: Save the encoded result
//! 5. **Pair**: Record both paths in the pair store

pub mod capture;
pub mod encoding;
pub mod filters;
pub mod processing;

pub use capture::CapturePipeline;
pub use encoding::{EncodingQuality, decode, encode};
pub use processing::{FilterStage, FilterWorker, apply_filter};

/// Decoded 8-bit RGB pixel buffer
pub type RasterImage = image::RgbImage;
