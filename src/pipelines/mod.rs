// SPDX-License-Identifier: MPL-2.0

//! Processing pipelines for photo capture
//!
//! All heavy operations run in background tasks so the command loop stays
//! responsive.
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌───────────────────┐
//! │ Raw capture  │ ──▶ │  Photo Pipeline   │ ──▶ │ Original+Filtered │
//! │   (bytes)    │     │  - Decode         │     │    JPEG files     │
//! │              │     │  - Film filter    │     │                   │
//! │              │     │  - Encode         │     │                   │
//! └──────────────┘     └───────────────────┘     └───────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`photo`]: Async photo capture with film filters and JPEG encoding

pub mod photo;
