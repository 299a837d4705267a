//! Enhancement scalars: brightness, contrast, saturation, sharpness.
//!
//! Each enhancement interpolates between a "degenerate" version of the image
//! and the image itself:
//!
//! ```text
//! out = degenerate + factor × (in − degenerate)
//! ```
//!
//! `factor = 1.0` returns the input, `factor < 1.0` moves toward the
//! degenerate image, `factor > 1.0` extrapolates away from it. Results are
//! clamped to the 8-bit range; alpha is never touched.
//!
//! | enhancement | degenerate image                          |
//! |-------------|-------------------------------------------|
//! | brightness  | black                                     |
//! | contrast    | uniform gray at the mean luminance        |
//! | saturation  | per-pixel luminance (grayscale)           |
//! | sharpness   | 3×3 smoothed copy, border pixels unchanged |

use image::DynamicImage;

use super::{luma, map_rgb, to_u8};

/// 3×3 smoothing kernel, centre-weighted. Weights sum to [`SMOOTH_DIVISOR`].
const SMOOTH_KERNEL: [[u32; 3]; 3] = [[1, 1, 1], [1, 5, 1], [1, 1, 1]];
const SMOOTH_DIVISOR: u32 = 13;

#[inline]
fn blend(degenerate: [u8; 3], pixel: [u8; 3], factor: f32) -> [u8; 3] {
    let mut out = [0u8; 3];
    for c in 0..3 {
        let d = f32::from(degenerate[c]);
        out[c] = to_u8(d + factor * (f32::from(pixel[c]) - d));
    }
    out
}

/// Scale brightness. `0.5` halves every channel, `2.0` doubles it.
pub fn brightness(image: &DynamicImage, factor: f32) -> DynamicImage {
    map_rgb(image, |_, _, rgb| blend([0, 0, 0], rgb, factor))
}

/// Scale contrast around the image's mean luminance.
pub fn contrast(image: &DynamicImage, factor: f32) -> DynamicImage {
    let mean = mean_luma(image);
    map_rgb(image, |_, _, rgb| blend([mean, mean, mean], rgb, factor))
}

/// Scale saturation around each pixel's own luminance.
pub fn saturation(image: &DynamicImage, factor: f32) -> DynamicImage {
    map_rgb(image, |_, _, rgb| {
        let l = luma(rgb);
        blend([l, l, l], rgb, factor)
    })
}

/// Scale sharpness relative to a smoothed copy of the image.
pub fn sharpness(image: &DynamicImage, factor: f32) -> DynamicImage {
    let original = image.to_rgb8();
    let (width, height) = original.dimensions();

    map_rgb(image, |x, y, rgb| {
        if x == 0 || y == 0 || x + 1 >= width || y + 1 >= height {
            return rgb;
        }

        let mut sum = [0u32; 3];
        for (ky, row) in SMOOTH_KERNEL.iter().enumerate() {
            for (kx, weight) in row.iter().enumerate() {
                let px = original.get_pixel(x + kx as u32 - 1, y + ky as u32 - 1);
                for c in 0..3 {
                    sum[c] += u32::from(px.0[c]) * weight;
                }
            }
        }
        let smoothed = sum.map(|s| ((s + SMOOTH_DIVISOR / 2) / SMOOTH_DIVISOR) as u8);
        blend(smoothed, rgb, factor)
    })
}

/// Mean luminance over all pixels, rounded to nearest. Empty images yield 0.
pub fn mean_luma(image: &DynamicImage) -> u8 {
    let rgb = image.to_rgb8();
    let count = u64::from(rgb.width()) * u64::from(rgb.height());
    if count == 0 {
        return 0;
    }

    let total: u64 = rgb.pixels().map(|px| u64::from(luma(px.0))).sum();
    ((total + count / 2) / count) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn rgb_image(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| Rgb(f(x, y))))
    }

    #[test]
    fn test_factor_one_is_identity_for_all() {
        let image = rgb_image(5, 4, |x, y| [(x * 50) as u8, (y * 60) as u8, 200]);
        assert_eq!(brightness(&image, 1.0), image);
        assert_eq!(contrast(&image, 1.0), image);
        assert_eq!(saturation(&image, 1.0), image);
        assert_eq!(sharpness(&image, 1.0), image);
    }

    #[test]
    fn test_brightness_scales_and_clamps() {
        let image = rgb_image(1, 1, |_, _| [100, 200, 10]);
        let dim = brightness(&image, 0.5);
        assert_eq!(dim.as_rgb8().expect("rgb8").get_pixel(0, 0), &Rgb([50, 100, 5]));

        let bright = brightness(&image, 2.0);
        assert_eq!(bright.as_rgb8().expect("rgb8").get_pixel(0, 0), &Rgb([200, 255, 20]));
    }

    #[test]
    fn test_contrast_toward_mean() {
        // Two gray pixels: 0 and 200, mean luminance 100.
        let image = rgb_image(2, 1, |x, _| if x == 0 { [0, 0, 0] } else { [200, 200, 200] });
        assert_eq!(mean_luma(&image), 100);

        let flat = contrast(&image, 0.5);
        let rgb = flat.as_rgb8().expect("rgb8");
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([50, 50, 50]));
        assert_eq!(rgb.get_pixel(1, 0), &Rgb([150, 150, 150]));
    }

    #[test]
    fn test_saturation_small_factor_approaches_gray() {
        let image = rgb_image(1, 1, |_, _| [200, 40, 40]);
        let muted = saturation(&image, 1e-3);
        let px = muted.as_rgb8().expect("rgb8").get_pixel(0, 0).0;
        assert!(px[0].abs_diff(px[1]) <= 1 && px[1].abs_diff(px[2]) <= 1);
    }

    #[test]
    fn test_sharpness_leaves_flat_regions_alone() {
        let image = rgb_image(6, 6, |_, _| [90, 90, 90]);
        assert_eq!(sharpness(&image, 3.0), image);
    }

    #[test]
    fn test_sharpness_amplifies_isolated_peak() {
        let image = rgb_image(3, 3, |x, y| if (x, y) == (1, 1) { [130, 130, 130] } else { [0, 0, 0] });
        // smoothed centre = 130 * 5 / 13 = 50; 50 + 2 * (130 - 50) = 210
        let sharp = sharpness(&image, 2.0);
        let rgb = sharp.as_rgb8().expect("rgb8");
        assert_eq!(rgb.get_pixel(1, 1), &Rgb([210, 210, 210]));
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_enhance_preserves_alpha() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([100, 80, 60, 33])));
        for out in [
            brightness(&image, 1.7),
            contrast(&image, 0.4),
            saturation(&image, 2.5),
            sharpness(&image, 0.2),
        ] {
            let rgba = out.as_rgba8().expect("rgba8");
            assert!(rgba.pixels().all(|px| px.0[3] == 33));
        }
    }
}
