// SPDX-License-Identifier: MPL-2.0

//! Integration tests for constants module

use filmcam::FilmType;
use filmcam::constants::{film, storage};

#[test]
fn test_film_type_values() {
    // Test that all film types exist
    assert_eq!(FilmType::ALL.len(), 4);
}

#[test]
fn test_film_display_names() {
    // Test that all films have non-empty display names
    for film in FilmType::ALL {
        let name = film.display_name();
        assert!(!name.is_empty(), "Film {:?} has empty display name", film);
    }
}

#[test]
fn test_grain_amplitude_is_small() {
    assert!(film::GRAIN_AMPLITUDE > 0);
    assert!(film::GRAIN_AMPLITUDE <= 5);
}

#[test]
fn test_storage_keys_and_prefixes_distinct() {
    assert_ne!(storage::ORIGINAL_IMAGES_KEY, storage::FILTERED_IMAGES_KEY);
    assert_ne!(storage::ORIGINAL_PREFIX, storage::FILTERED_PREFIX);
    assert_eq!(storage::ORIGINAL_IMAGES_KEY, "original_images");
    assert_eq!(storage::FILTERED_IMAGES_KEY, "filtered_images");
}
