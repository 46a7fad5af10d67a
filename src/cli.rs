// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for film camera operations
//!
//! This module provides command-line functionality for:
//! - Capturing a photo pair from an image file
//! - Listing and removing stored pairs
//! - Applying a film look to a single file
//! - Changing the default film

use filmcam::backends::FileCaptureSource;
use filmcam::pipelines::photo::{EncodingQuality, FilterWorker};
use filmcam::storage::{self, FileSystem, ImagePairStore, JsonPathStore, LocalFileSystem};
use filmcam::{AppError, AppResult, CapturePipeline, Config, FilmType, Session};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Open the pair store and load persisted pairs
async fn open_store(store_path: Option<PathBuf>) -> Arc<ImagePairStore> {
    let store_path = store_path.unwrap_or_else(storage::default_path_store_file);
    info!(path = %store_path.display(), "Opening path store");

    let store = Arc::new(ImagePairStore::new(
        Arc::new(JsonPathStore::new(store_path)),
        Arc::new(LocalFileSystem),
    ));
    store.load().await;
    store
}

/// Capture one pair through a session
pub fn capture(
    config: &Config,
    source: PathBuf,
    film: Option<FilmType>,
    dir: Option<PathBuf>,
    store_path: Option<PathBuf>,
) -> AppResult<()> {
    let source = FileCaptureSource::new(source)?;
    let output_dir = dir.unwrap_or_else(|| config.photo_dir());
    let film = film.unwrap_or(config.film_type);

    let rt = tokio::runtime::Runtime::new()?;
    let pair = rt.block_on(async {
        let store = open_store(store_path).await;
        let pipeline = CapturePipeline::new(
            Arc::new(source),
            Arc::new(LocalFileSystem),
            store,
            output_dir,
        )
        .with_quality(config.filtered_quality())
        .with_worker(FilterWorker::new(config.filter_workers()));

        let session = Session::spawn(Arc::new(pipeline), film);
        let result = session.capture().await;
        let _ = session.shutdown().await;
        result
    })?;

    println!("Film:     {}", film);
    println!("Original: {}", pair.original_path().display());
    println!("Filtered: {}", pair.filtered_path().display());
    Ok(())
}

/// Print stored pairs, newest first
pub fn list_pairs(store_path: Option<PathBuf>) -> AppResult<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let pairs = rt.block_on(async { open_store(store_path).await.newest_first().await });

    if pairs.is_empty() {
        println!("No photos stored.");
        return Ok(());
    }

    for (index, pair) in pairs.iter().enumerate() {
        println!("  [{}] {}", index, pair.filtered_path().display());
        println!("      original: {}", pair.original_path().display());
    }
    Ok(())
}

/// Remove a pair by its `list` index
pub fn remove_pair(index: usize, store_path: Option<PathBuf>) -> AppResult<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let removed = rt.block_on(async {
        let store = open_store(store_path).await;
        let len = store.len().await;
        if index >= len {
            return Ok(None);
        }
        // `list` shows newest first
        store.remove(len - 1 - index).await
    })?;

    match removed {
        Some(pair) => {
            println!("Removed: {}", pair.filtered_path().display());
            Ok(())
        }
        None => Err(format!("No photo at index {}", index).into()),
    }
}

/// Filter a single file and write the JPEG result
///
/// An explicit `quality` wins over `preset`; without either the configured
/// quality is used.
pub fn apply_film(
    config: &Config,
    input: PathBuf,
    output: PathBuf,
    film: Option<FilmType>,
    preset: Option<EncodingQuality>,
    quality: Option<u8>,
) -> AppResult<()> {
    let film = film.unwrap_or(config.film_type);
    let quality = quality
        .or(preset.map(|p| p.jpeg_quality()))
        .unwrap_or(config.jpeg_quality);
    let worker = FilterWorker::new(config.filter_workers());

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let fs = LocalFileSystem;
        let bytes = fs.read_bytes(&input).await?;
        let encoded = worker.process(Arc::new(bytes), film, quality).await?;
        fs.write_bytes(&output, &encoded).await?;
        Ok::<_, AppError>(())
    })?;

    println!("{} applied: {}", film, output.display());
    Ok(())
}

/// Store `film` as the default for future captures
pub fn set_default_film(mut config: Config, film: FilmType) -> AppResult<()> {
    config.film_type = film;
    filmcam::config::save(&config)?;
    println!("Default film: {}", film);
    Ok(())
}

/// Print the available film looks
pub fn list_films() -> AppResult<()> {
    println!("Available films:");
    for film in FilmType::ALL {
        let name = clap::ValueEnum::to_possible_value(&film)
            .map(|v| v.get_name().to_string())
            .unwrap_or_default();
        println!("  {:<14} {}", name, film.display_name());
    }
    Ok(())
}
