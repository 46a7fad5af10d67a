// SPDX-License-Identifier: MPL-2.0

//! filmcam - film camera core
//!
//! This library captures photos, applies simulated-film looks and stores the
//! original and filtered images as pairs that survive restarts.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`film`]: Film presets and their filter stage lists
//! - [`pipelines`]: Filter engine, codec adapter and the capture pipeline
//! - [`backends`]: Capture source abstraction
//! - [`storage`]: Filesystem, path store and image pair store
//! - [`session`]: Serialized command loop over the session state
//! - [`config`]: User configuration handling
//!
//! # Example
//!
//! ```ignore
//! let handle = Session::spawn(Arc::new(pipeline), FilmType::Vintage);
//! handle.select_film(FilmType::Monochrome).await?;
//! let pair = handle.capture().await?;
//! ```

pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod film;
pub mod pipelines;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use errors::{AppError, AppResult, CaptureError, ImageError, PersistError, SessionError};
pub use film::FilmType;
pub use pipelines::photo::{CapturePipeline, RasterImage, apply_filter, decode, encode};
pub use session::{Session, SessionEvent, SessionHandle, SessionState};
pub use storage::{ImagePair, ImagePairStore};
