// SPDX-License-Identifier: MPL-2.0

//! CPU pixel primitives for film looks
//!
//! Every primitive works on 8-bit RGB and clamps its result to `0..=255`, so
//! chaining them never wraps around.

use image::RgbImage;

/// BT.601 luma weights
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// Contrast pivot (mid-grey)
const MID_GREY: f32 = 128.0;

#[inline]
fn luma(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

#[inline]
fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Replace each pixel with its luma
pub fn desaturate(image: &mut RgbImage) {
    for pixel in image.pixels_mut() {
        let gray = to_channel(luma(pixel[0] as f32, pixel[1] as f32, pixel[2] as f32));
        pixel.0 = [gray, gray, gray];
    }
}

/// Scale distance from mid-grey by `factor` (1.0 = no change)
pub fn adjust_contrast(image: &mut RgbImage, factor: f32) {
    for pixel in image.pixels_mut() {
        for c in pixel.0.iter_mut() {
            *c = to_channel((*c as f32 - MID_GREY) * factor + MID_GREY);
        }
    }
}

/// Scale distance from the pixel's luma by `factor` (0.0 = gray, 1.0 = no change)
pub fn adjust_saturation(image: &mut RgbImage, factor: f32) {
    for pixel in image.pixels_mut() {
        let [r, g, b] = pixel.0.map(|c| c as f32);
        let gray = luma(r, g, b);
        pixel.0 = [
            to_channel(gray + (r - gray) * factor),
            to_channel(gray + (g - gray) * factor),
            to_channel(gray + (b - gray) * factor),
        ];
    }
}

/// Add a signed offset to each channel
pub fn offset_channels(image: &mut RgbImage, red: i16, green: i16, blue: i16) {
    let offsets = [red, green, blue];
    for pixel in image.pixels_mut() {
        for (c, offset) in pixel.0.iter_mut().zip(offsets) {
            *c = (*c as i16 + offset).clamp(0, 255) as u8;
        }
    }
}

/// Add per-channel grain bounded by `amplitude` levels
///
/// The noise comes from a position hash, so the same image and seed always
/// produce the same grain.
pub fn add_grain(image: &mut RgbImage, amplitude: u8, seed: u32) {
    if amplitude == 0 {
        return;
    }
    let span = 2 * amplitude as u32 + 1;
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        for (channel, c) in pixel.0.iter_mut().enumerate() {
            let delta = (grain_hash(x, y, channel as u32, seed) % span) as i16 - amplitude as i16;
            *c = (*c as i16 + delta).clamp(0, 255) as u8;
        }
    }
}

/// Darken toward the edges; `strength` is the darkening at the far corners
pub fn vignette(image: &mut RgbImage, strength: f32, inner: f32, outer: f32) {
    let (width, height) = image.dimensions();
    let strength = strength.clamp(0.0, 1.0);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        // Sample at pixel centers in normalized 0-1 coordinates
        let dx = (x as f32 + 0.5) / width as f32 - 0.5;
        let dy = (y as f32 + 0.5) / height as f32 - 0.5;
        let dist = (dx * dx + dy * dy).sqrt();
        let factor = 1.0 - strength * smoothstep(inner, outer, dist);
        for c in pixel.0.iter_mut() {
            *c = to_channel(*c as f32 * factor);
        }
    }
}

/// Seed derived from the image itself
///
/// Mixes the dimensions with a 3x3 grid of sampled pixels, so different
/// captures get different grain while the same image always gets the same.
pub fn content_seed(image: &RgbImage) -> u32 {
    let (width, height) = image.dimensions();
    let mut seed = grain_hash(width, height, 0, 0);
    if width == 0 || height == 0 {
        return seed;
    }
    for gy in 0..3 {
        for gx in 0..3 {
            let x = (width - 1) * gx / 2;
            let y = (height - 1) * gy / 2;
            let [r, g, b] = image.get_pixel(x, y).0;
            let packed = u32::from_le_bytes([r, g, b, (gy * 3 + gx) as u8]);
            seed = grain_hash(x, y, packed, seed);
        }
    }
    seed
}

/// Smoothstep function for vignette
#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Integer avalanche hash of pixel position, channel and seed
#[inline]
fn grain_hash(x: u32, y: u32, channel: u32, seed: u32) -> u32 {
    let mut h = seed
        ^ x.wrapping_mul(0x9E37_79B1)
        ^ y.wrapping_mul(0x85EB_CA77)
        ^ channel.wrapping_mul(0xC2B2_AE3D);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7FEB_352D);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846C_A68B);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(rgb))
    }

    #[test]
    fn test_desaturate_equal_channels() {
        let mut image = solid(3, 3, [200, 40, 90]);
        desaturate(&mut image);
        for pixel in image.pixels() {
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
        }
    }

    #[test]
    fn test_contrast_keeps_mid_grey() {
        let mut image = solid(2, 2, [128, 128, 128]);
        adjust_contrast(&mut image, 1.3);
        assert_eq!(image.get_pixel(0, 0).0, [128, 128, 128]);
    }

    #[test]
    fn test_contrast_clamps_extremes() {
        let mut image = solid(1, 2, [250, 5, 128]);
        adjust_contrast(&mut image, 3.0);
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 128]);
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        let mut image = solid(2, 2, [255, 0, 0]);
        adjust_saturation(&mut image, 0.0);
        let p = image.get_pixel(1, 1);
        assert_eq!(p[0], p[1]);
        assert_eq!(p[1], p[2]);
    }

    #[test]
    fn test_unit_saturation_is_identity() {
        let mut image = solid(2, 2, [17, 99, 230]);
        adjust_saturation(&mut image, 1.0);
        assert_eq!(image.get_pixel(0, 0).0, [17, 99, 230]);
    }

    #[test]
    fn test_offset_channels_saturates() {
        let mut image = solid(1, 1, [250, 100, 3]);
        offset_channels(&mut image, 15, 0, -15);
        assert_eq!(image.get_pixel(0, 0).0, [255, 100, 0]);
    }

    #[test]
    fn test_grain_bounded_and_reproducible() {
        let base = solid(16, 16, [128, 128, 128]);
        let mut a = base.clone();
        let mut b = base.clone();
        add_grain(&mut a, 5, 42);
        add_grain(&mut b, 5, 42);
        assert_eq!(a, b);
        assert!(a.pixels().flat_map(|p| p.0).all(|c| (123..=133).contains(&c)));
        assert_ne!(a, base, "grain should perturb at least one channel");
    }

    #[test]
    fn test_content_seed_follows_pixels() {
        let a = solid(6, 4, [128, 128, 128]);
        let b = solid(6, 4, [129, 128, 128]);
        assert_eq!(content_seed(&a), content_seed(&a.clone()));
        assert_ne!(content_seed(&a), content_seed(&b));
        assert_ne!(content_seed(&a), content_seed(&solid(4, 6, [128, 128, 128])));
    }

    #[test]
    fn test_vignette_darkens_corners_not_center() {
        let mut image = solid(9, 9, [200, 200, 200]);
        vignette(&mut image, 0.4, 0.3, 0.9);
        assert_eq!(image.get_pixel(4, 4).0, [200, 200, 200]);
        assert!(image.get_pixel(0, 0)[0] < 200);
    }
}
