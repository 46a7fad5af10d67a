// SPDX-License-Identifier: GPL-3.0-only

//! Filesystem collaborator
//!
//! The capture pipeline and the pair store only touch files through this
//! trait, so tests can swap in failing or instrumented implementations.

use futures::future::BoxFuture;
use std::io;
use std::path::Path;
use tracing::debug;

/// Minimal async file access used by the core
pub trait FileSystem: Send + Sync {
    /// Write `bytes` to `path`, replacing any existing file
    fn write_bytes<'a>(&'a self, path: &'a Path, bytes: &'a [u8]) -> BoxFuture<'a, io::Result<()>>;

    /// Read the whole file at `path`
    fn read_bytes<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, io::Result<Vec<u8>>>;

    /// Whether a regular file exists at `path`
    fn exists<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, bool>;

    /// Remove the file at `path`
    fn delete<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, io::Result<()>>;
}

/// Local disk via `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn write_bytes<'a>(&'a self, path: &'a Path, bytes: &'a [u8]) -> BoxFuture<'a, io::Result<()>> {
        Box::pin(async move {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(path, bytes).await?;
            debug!(path = %path.display(), size = bytes.len(), "File written");
            Ok(())
        })
    }

    fn read_bytes<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, io::Result<Vec<u8>>> {
        Box::pin(tokio::fs::read(path))
    }

    fn exists<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, bool> {
        Box::pin(async move {
            tokio::fs::metadata(path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false)
        })
    }

    fn delete<'a>(&'a self, path: &'a Path) -> BoxFuture<'a, io::Result<()>> {
        Box::pin(async move {
            tokio::fs::remove_file(path).await?;
            debug!(path = %path.display(), "File deleted");
            Ok(())
        })
    }
}
