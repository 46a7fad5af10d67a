// SPDX-License-Identifier: MPL-2.0

//! Storage for captured photos
//!
//! - [`filesystem`]: file access collaborator
//! - [`path_store`]: durable string-list store
//! - [`pairs`]: the original/filtered pair collection
//!
//! Default locations follow the XDG directories from `dirs`.

pub mod filesystem;
pub mod pairs;
pub mod path_store;

pub use filesystem::{FileSystem, LocalFileSystem};
pub use pairs::{ImagePair, ImagePairStore};
pub use path_store::{JsonPathStore, MemoryPathStore, PathStore};

use crate::constants::storage::{APP_DIR_NAME, PATH_STORE_FILE};
use std::path::PathBuf;

/// Default photo directory (`~/Pictures/filmcam`)
pub fn default_photo_directory() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Default path store file (`$XDG_DATA_HOME/filmcam/images.json`)
pub fn default_path_store_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(PATH_STORE_FILE)
}
