// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use filmcam::FilmType;
use filmcam::pipelines::photo::EncodingQuality;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "filmcam")]
#[command(about = "Film camera: capture photos with simulated film looks")]
#[command(version = filmcam::constants::app_info::version())]
struct Cli {
    /// Path store file (default: $XDG_DATA_HOME/filmcam/images.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a photo from an image file and store the original/filtered pair
    Capture {
        /// Image file acting as the camera
        #[arg(short, long)]
        source: PathBuf,

        /// Film look (default: from config)
        #[arg(short, long, value_enum)]
        film: Option<FilmType>,

        /// Output directory (default: ~/Pictures/filmcam)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// List stored pairs, newest first
    List,

    /// Apply a film look to an image file without storing a pair
    Apply {
        /// Input image
        #[arg(short, long)]
        input: PathBuf,

        /// Output JPEG path
        #[arg(short, long)]
        output: PathBuf,

        /// Film look (default: from config)
        #[arg(short, long, value_enum)]
        film: Option<FilmType>,

        /// JPEG quality preset
        #[arg(short, long, value_enum)]
        preset: Option<EncodingQuality>,

        /// JPEG quality 1-100 (default: from config)
        #[arg(short, long, conflicts_with = "preset")]
        quality: Option<u8>,
    },

    /// Remove a stored pair and its files (index as shown by `list`)
    Remove { index: usize },

    /// List available film looks
    Films,

    /// Set the film used when none is given
    SetFilm {
        #[arg(value_enum)]
        film: FilmType,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=filmcam=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config = filmcam::config::load();

    let result = match cli.command {
        Commands::Capture { source, film, dir } => {
            cli::capture(&config, source, film, dir, cli.store)
        }
        Commands::List => cli::list_pairs(cli.store),
        Commands::Apply {
            input,
            output,
            film,
            preset,
            quality,
        } => cli::apply_film(&config, input, output, film, preset, quality),
        Commands::Remove { index } => cli::remove_pair(index, cli.store),
        Commands::Films => cli::list_films(),
        Commands::SetFilm { film } => cli::set_default_film(config, film),
    };

    result?;
    Ok(())
}
