//! Colormaps for cell shading.

use palette::{FromColor, Hsv, LinSrgb, Mix, Srgb};

/// Hue at the low end of the rainbow (violet), in degrees.
const RAINBOW_START_HUE: f32 = 270.0;

/// Heatmap endpoints: pale cream to deep red.
const HEAT_LOW: [f32; 3] = [1.0, 0.96, 0.78];
const HEAT_HIGH: [f32; 3] = [0.60, 0.02, 0.08];

/// Rainbow colormap: violet at `t = 0`, through blue, green, and yellow, to red at `t = 1`.
pub fn rainbow(t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let hsv: Hsv = Hsv::new(RAINBOW_START_HUE * (1.0 - t), 0.85, 1.0);
    to_rgb8(Srgb::<f32>::from_color(hsv))
}

/// Sequential heat colormap, interpolated in linear light.
pub fn heat(t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let low: LinSrgb = Srgb::<f32>::from(HEAT_LOW).into_linear();
    let high: LinSrgb = Srgb::<f32>::from(HEAT_HIGH).into_linear();
    to_rgb8(Srgb::<f32>::from_linear(low.mix(high, t)))
}

/// Black or white, whichever reads better on `background`.
pub fn text_color(background: [u8; 3]) -> [u8; 3] {
    if relative_luminance(background) > 0.4 {
        [0, 0, 0]
    } else {
        [255, 255, 255]
    }
}

/// Rec. 709 relative luminance of an sRGB color, in `[0, 1]`.
pub fn relative_luminance(rgb: [u8; 3]) -> f32 {
    let linear: LinSrgb = Srgb::<u8>::from(rgb).into_format::<f32>().into_linear();
    0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
}

/// Position of `value` within `[min, max]`, or the midpoint when the range is empty.
pub fn normalize(value: u64, min: u64, max: u64) -> f32 {
    if max <= min {
        return 0.5;
    }
    (value.saturating_sub(min)) as f32 / (max - min) as f32
}

/// `#rrggbb` for CSS.
pub fn hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

fn to_rgb8(color: Srgb) -> [u8; 3] {
    let rgb: Srgb<u8> = color.into_format();
    [rgb.red, rgb.green, rgb.blue]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_rainbow_endpoints() {
        let low = rainbow(0.0);
        let high = rainbow(1.0);
        // Violet: blue and red present, little green.
        assert!(low[2] > low[1] && low[0] > low[1], "violet expected, got {low:?}");
        // Red: red dominant.
        assert!(high[0] > high[1] && high[0] > high[2], "red expected, got {high:?}");
    }

    #[test]
    fn test_heat_endpoints_and_clamp() {
        assert_eq!(heat(-1.0), heat(0.0));
        assert_eq!(heat(2.0), heat(1.0));
        assert!(relative_luminance(heat(0.0)) > relative_luminance(heat(1.0)));
    }

    #[test]
    fn test_text_color_contrast() {
        assert_eq!(text_color([255, 255, 255]), [0, 0, 0]);
        assert_eq!(text_color([0, 0, 0]), [255, 255, 255]);
    }

    #[test]
    fn test_normalize_degenerate_range() {
        assert!((normalize(5, 5, 5) - 0.5).abs() < EPSILON);
        assert!((normalize(1, 1, 9) - 0.0).abs() < EPSILON);
        assert!((normalize(9, 1, 9) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_hex() {
        assert_eq!(hex([255, 0, 16]), "#ff0010");
    }
}
