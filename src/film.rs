// SPDX-License-Identifier: GPL-3.0-only

//! Film presets
//!
//! A [`FilmType`] names a fixed sequence of [`FilterStage`]s that emulates an
//! analog look. The sequence is declarative; the filter engine just runs it.

use crate::constants::film::*;
use crate::pipelines::photo::processing::FilterStage;
use serde::{Deserialize, Serialize};

/// Film look applied to a capture
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum FilmType {
    /// Grayscale with a contrast lift
    Monochrome,
    /// Faded, warm colors with darkened corners
    #[default]
    Vintage,
    /// Strong contrast and saturation
    HighContrast,
    /// Warm color balance
    WarmTone,
}

const GRAIN: FilterStage = FilterStage::Grain {
    amplitude: GRAIN_AMPLITUDE,
    seed: GRAIN_SEED,
};

const MONOCHROME_STAGES: &[FilterStage] = &[
    FilterStage::Desaturate,
    FilterStage::Contrast(MONOCHROME_CONTRAST),
    GRAIN,
];

// Vignette runs after grain so the corners darken the grain too
const VINTAGE_STAGES: &[FilterStage] = &[
    FilterStage::Saturation(VINTAGE_SATURATION),
    FilterStage::Contrast(VINTAGE_CONTRAST),
    FilterStage::ChannelOffset {
        red: VINTAGE_OFFSET.0,
        green: VINTAGE_OFFSET.1,
        blue: VINTAGE_OFFSET.2,
    },
    GRAIN,
    FilterStage::Vignette(VINTAGE_VIGNETTE),
];

const HIGH_CONTRAST_STAGES: &[FilterStage] = &[
    FilterStage::Contrast(HIGH_CONTRAST_CONTRAST),
    FilterStage::Saturation(HIGH_CONTRAST_SATURATION),
    GRAIN,
];

const WARM_TONE_STAGES: &[FilterStage] = &[
    FilterStage::Saturation(WARM_TONE_SATURATION),
    FilterStage::ChannelOffset {
        red: WARM_TONE_OFFSET.0,
        green: WARM_TONE_OFFSET.1,
        blue: WARM_TONE_OFFSET.2,
    },
    FilterStage::Contrast(WARM_TONE_CONTRAST),
    GRAIN,
];

impl FilmType {
    /// All film types for UI iteration
    pub const ALL: [FilmType; 4] = [
        FilmType::Monochrome,
        FilmType::Vintage,
        FilmType::HighContrast,
        FilmType::WarmTone,
    ];

    /// Get display name for the film type
    pub fn display_name(&self) -> &'static str {
        match self {
            FilmType::Monochrome => "Monochrome",
            FilmType::Vintage => "Vintage",
            FilmType::HighContrast => "High Contrast",
            FilmType::WarmTone => "Warm Tone",
        }
    }

    /// The stage sequence applied for this film, in order
    pub fn stages(&self) -> &'static [FilterStage] {
        match self {
            FilmType::Monochrome => MONOCHROME_STAGES,
            FilmType::Vintage => VINTAGE_STAGES,
            FilmType::HighContrast => HIGH_CONTRAST_STAGES,
            FilmType::WarmTone => WARM_TONE_STAGES,
        }
    }
}

impl std::fmt::Display for FilmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
