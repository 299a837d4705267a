//! Adjustment pipeline: parameter definitions, per-stage filters, and the
//! fixed-order stage runner.

pub mod color;
pub mod enhance;
pub mod geometry;
pub mod params;
pub mod pipeline;

use image::DynamicImage;

use crate::image::normalize_channels;

/// ITU-R 601 luma weights, in thousandths.
const LUMA_REC601: [u32; 3] = [299, 587, 114];

/// Integer luma of an 8-bit RGB pixel, rounded to nearest.
pub fn luma(rgb: [u8; 3]) -> u8 {
    let sum = u32::from(rgb[0]) * LUMA_REC601[0]
        + u32::from(rgb[1]) * LUMA_REC601[1]
        + u32::from(rgb[2]) * LUMA_REC601[2];
    ((sum + 500) / 1000) as u8
}

/// Rewrite the color channels of every pixel, carrying alpha through untouched.
///
/// The closure receives `(x, y, [r, g, b])`. Non-8-bit inputs are normalized first.
pub(crate) fn map_rgb<F>(image: &DynamicImage, mut f: F) -> DynamicImage
where
    F: FnMut(u32, u32, [u8; 3]) -> [u8; 3],
{
    match normalize_channels(image.clone()) {
        DynamicImage::ImageRgba8(mut buffer) => {
            for (x, y, px) in buffer.enumerate_pixels_mut() {
                let [r, g, b, a] = px.0;
                let [r, g, b] = f(x, y, [r, g, b]);
                px.0 = [r, g, b, a];
            }
            DynamicImage::ImageRgba8(buffer)
        }
        DynamicImage::ImageRgb8(mut buffer) => {
            for (x, y, px) in buffer.enumerate_pixels_mut() {
                px.0 = f(x, y, px.0);
            }
            DynamicImage::ImageRgb8(buffer)
        }
        other => other,
    }
}

/// Round and clamp a channel value into the 8-bit range.
#[inline]
pub(crate) fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma([0, 0, 0]), 0);
        assert_eq!(luma([255, 255, 255]), 255);
    }

    #[test]
    fn test_luma_weights_green_heaviest() {
        assert!(luma([0, 255, 0]) > luma([255, 0, 0]));
        assert!(luma([255, 0, 0]) > luma([0, 0, 255]));
        assert_eq!(luma([255, 0, 0]), 76);
    }

    #[test]
    fn test_map_rgb_preserves_alpha() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 77])));
        let mapped = map_rgb(&image, |_, _, [r, g, b]| [b, g, r]);
        let rgba = mapped.as_rgba8().expect("rgba8");
        assert!(rgba.pixels().all(|px| px.0 == [30, 20, 10, 77]));
    }
}
