// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Film look tuning values
///
/// These are the per-film adjustment strengths used by
/// [`FilmType::stages`](crate::film::FilmType::stages). They are tuned by eye,
/// not contractual.
pub mod film {
    /// Maximum grain perturbation per channel, in 8-bit levels
    pub const GRAIN_AMPLITUDE: u8 = 5;

    /// Salt mixed with each image's content seed for the grain hash
    pub const GRAIN_SEED: u32 = 0x5EED_F11A;

    /// Monochrome: contrast after desaturation
    pub const MONOCHROME_CONTRAST: f32 = 1.2;

    /// Vintage: faded colors
    pub const VINTAGE_SATURATION: f32 = 0.7;
    /// Vintage: mild contrast boost
    pub const VINTAGE_CONTRAST: f32 = 1.1;
    /// Vintage: warm shift (red up, blue down)
    pub const VINTAGE_OFFSET: (i16, i16, i16) = (15, 0, -15);
    /// Vintage: edge darkening strength (0.0 - 1.0)
    pub const VINTAGE_VIGNETTE: f32 = 0.4;

    /// High contrast: strong contrast
    pub const HIGH_CONTRAST_CONTRAST: f32 = 1.3;
    /// High contrast: punchier colors
    pub const HIGH_CONTRAST_SATURATION: f32 = 1.2;

    /// Warm tone: slight saturation lift
    pub const WARM_TONE_SATURATION: f32 = 1.1;
    /// Warm tone: warm balance (red and green up, blue down)
    pub const WARM_TONE_OFFSET: (i16, i16, i16) = (12, 5, -10);
    /// Warm tone: mild contrast
    pub const WARM_TONE_CONTRAST: f32 = 1.05;

    /// Vignette falloff starts at this normalized distance from center
    pub const VIGNETTE_INNER: f32 = 0.3;
    /// Vignette reaches full strength at this normalized distance
    pub const VIGNETTE_OUTER: f32 = 0.9;
}

/// Encoding constants
pub mod encoding {
    /// Lowest JPEG quality accepted for filtered output
    pub const FILTERED_MIN_QUALITY: u8 = 90;

    /// Highest JPEG quality
    pub const MAX_QUALITY: u8 = 100;
}

/// Durable storage layout
pub mod storage {
    /// Path store key holding original image paths
    pub const ORIGINAL_IMAGES_KEY: &str = "original_images";

    /// Path store key holding filtered image paths
    pub const FILTERED_IMAGES_KEY: &str = "filtered_images";

    /// File name prefix for unfiltered captures
    pub const ORIGINAL_PREFIX: &str = "original";

    /// File name prefix for filtered captures
    pub const FILTERED_PREFIX: &str = "filtered";

    /// Extension used for both variants
    pub const PHOTO_EXTENSION: &str = "jpg";

    /// Application directory name under config/data/picture dirs
    pub const APP_DIR_NAME: &str = "filmcam";

    /// Path store file name inside the data directory
    pub const PATH_STORE_FILE: &str = "images.json";

    /// Config file name inside the config directory
    pub const CONFIG_FILE: &str = "config.json";
}

/// Worker and queue sizing
pub mod workers {
    /// Upper bound for the default number of concurrent filter jobs
    pub const MAX_DEFAULT_FILTER_WORKERS: usize = 4;

    /// Pending session commands before senders wait
    pub const COMMAND_QUEUE_DEPTH: usize = 16;

    /// Buffered session events per subscriber
    pub const EVENT_CHANNEL_CAPACITY: usize = 32;

    /// Default filter worker count for this machine
    pub fn default_filter_workers() -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .clamp(1, MAX_DEFAULT_FILTER_WORKERS)
    }
}

/// Supported file formats for the file capture source
pub mod file_formats {
    /// Supported image file extensions
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

    /// Check if a file extension is a supported image format
    pub fn is_image_extension(ext: &str) -> bool {
        IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
    }
}

/// Application information utilities
pub mod app_info {
    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions_case_insensitive() {
        assert!(file_formats::is_image_extension("JPG"));
        assert!(file_formats::is_image_extension("png"));
        assert!(!file_formats::is_image_extension("mp4"));
    }

    #[test]
    fn test_default_filter_workers_bounded() {
        let workers = workers::default_filter_workers();
        assert!(workers >= 1);
        assert!(workers <= workers::MAX_DEFAULT_FILTER_WORKERS);
    }
}
