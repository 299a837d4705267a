//! Color-only stages: grayscale and sepia tone.
//!
//! Both act on the RGB channels and carry alpha through untouched.

use glam::{Mat3, Vec3};
use image::DynamicImage;

use super::{luma, map_rgb, to_u8};

/// Sepia color-mixing matrix. Rows map to output R, G, B.
///
/// ```text
/// R' = 0.393R + 0.769G + 0.189B
/// G' = 0.349R + 0.686G + 0.168B
/// B' = 0.272R + 0.534G + 0.131B
/// ```
const SEPIA: Mat3 = Mat3::from_cols(
    Vec3::new(0.393, 0.349, 0.272),
    Vec3::new(0.769, 0.686, 0.534),
    Vec3::new(0.189, 0.168, 0.131),
);

/// Replace each pixel with its luminance, keeping three color channels.
pub fn grayscale(image: &DynamicImage) -> DynamicImage {
    map_rgb(image, |_, _, rgb| {
        let l = luma(rgb);
        [l, l, l]
    })
}

/// Apply the sepia matrix to one pixel and blend with the original.
///
/// The toned value is clamped to `[0, 255]` before blending, so the result is
/// a straight line between the original and the clamped sepia pixel.
pub fn sepia_pixel(rgb: [u8; 3], intensity: f32) -> [u8; 3] {
    let original = Vec3::new(f32::from(rgb[0]), f32::from(rgb[1]), f32::from(rgb[2]));
    let toned = (SEPIA * original).clamp(Vec3::ZERO, Vec3::splat(255.0));
    let blended = original * (1.0 - intensity) + toned * intensity;
    [to_u8(blended.x), to_u8(blended.y), to_u8(blended.z)]
}

/// Sepia tone at the given intensity (`0.0` = unchanged, `1.0` = full sepia).
pub fn sepia(image: &DynamicImage, intensity: f32) -> DynamicImage {
    map_rgb(image, |_, _, rgb| sepia_pixel(rgb, intensity))
}
