// SPDX-License-Identifier: MPL-2.0

//! Backend abstraction layer for photo capture
//!
//! The core never talks to a device directly. It asks a [`CaptureSource`] for
//! the bytes of one still photo:
//!
//! ```text
//! ┌─────────────────────────────┐
//! │      Capture Pipeline       │
//! └──────────────┬──────────────┘
//!                │ take_photo()
//! ┌──────────────┴──────────────┐
//! │    CaptureSource trait      │
//! │  ┌───────────────────────┐  │
//! │  │   FileCaptureSource   │  │
//! │  └───────────────────────┘  │
//! └─────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`capture_source`]: capture source trait and the file-backed source

pub mod capture_source;

pub use capture_source::{CaptureSource, FileCaptureSource};
