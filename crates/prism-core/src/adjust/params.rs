//! Central parameter struct that defines the entire image adjustment.
//!
//! `AdjustmentSpec` is the immutable contract between the front end and the
//! pipeline. Every control writes here; the pipeline reads the full struct.

use serde::{Deserialize, Serialize};

use crate::error::PrismError;

/// Scalars within this distance of 1.0 are treated as identity.
pub const IDENTITY_TOLERANCE: f32 = 1e-6;

/// Blur radii below this leave the image unchanged and skip the stage.
pub const MIN_BLUR_RADIUS: f32 = 0.5;

/// Rotation is accepted in `[-ROTATION_LIMIT, ROTATION_LIMIT]` degrees.
pub const ROTATION_LIMIT: f32 = 180.0;

/// Sepia tone settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SepiaParams {
    pub enabled: bool,
    /// Blend between original (0.0) and full sepia (1.0).
    pub intensity: f32,
}

impl Default for SepiaParams {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 1.0,
        }
    }
}

/// Gaussian blur settings. Radii under [`MIN_BLUR_RADIUS`] disable the stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurParams {
    /// Standard deviation of the kernel, in pixels.
    pub radius: f32,
}

impl BlurParams {
    /// Whether the radius is large enough to produce a usable kernel.
    pub fn is_active(&self) -> bool {
        self.radius >= MIN_BLUR_RADIUS
    }
}

/// Rotation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationParams {
    /// Counter-clockwise rotation in degrees.
    pub degrees: f32,
    /// Grow the canvas to fit the rotated bounds instead of cropping corners.
    pub expand_canvas: bool,
}

/// Mirror settings. Horizontal is applied before vertical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipParams {
    pub horizontal: bool,
    pub vertical: bool,
}

/// The full set of adjustments applied to a source image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentSpec {
    /// Convert to luminance, keeping the channel count.
    pub grayscale: bool,
    pub sepia: SepiaParams,
    pub blur: BlurParams,
    /// Brightness multiplier. 1.0 = neutral.
    pub brightness: f32,
    /// Contrast multiplier around mean luminance. 1.0 = neutral.
    pub contrast: f32,
    /// Saturation multiplier. 1.0 = neutral, 0.0 would be grayscale.
    pub saturation: f32,
    /// Sharpness multiplier. 1.0 = neutral, below 1.0 softens.
    pub sharpness: f32,
    pub rotation: RotationParams,
    pub flip: FlipParams,
}

impl Default for AdjustmentSpec {
    /// Produces an identity (no-op) adjustment; the image passes through unchanged.
    fn default() -> Self {
        Self {
            grayscale: false,
            sepia: SepiaParams::default(),
            blur: BlurParams::default(),
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            sharpness: 1.0,
            rotation: RotationParams::default(),
            flip: FlipParams::default(),
        }
    }
}

impl AdjustmentSpec {
    /// Whether every stage would be skipped.
    pub fn is_identity(&self) -> bool {
        !self.grayscale
            && (!self.sepia.enabled || self.sepia.intensity == 0.0)
            && !self.blur.is_active()
            && is_neutral(self.brightness)
            && is_neutral(self.contrast)
            && is_neutral(self.saturation)
            && is_neutral(self.sharpness)
            && self.rotation.degrees.rem_euclid(360.0) == 0.0
            && !self.flip.horizontal
            && !self.flip.vertical
    }

    /// Check every numeric field against its declared bound.
    pub fn validate(&self) -> Result<(), PrismError> {
        let intensity = self.sepia.intensity;
        if !(0.0..=1.0).contains(&intensity) {
            return Err(PrismError::invalid(
                "sepia.intensity",
                format!("{intensity} is outside [0, 1]"),
            ));
        }

        let radius = self.blur.radius;
        if !radius.is_finite() || radius < 0.0 {
            return Err(PrismError::invalid(
                "blur.radius",
                format!("{radius} must be a finite value >= 0"),
            ));
        }

        for (name, value) in [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturation", self.saturation),
            ("sharpness", self.sharpness),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PrismError::invalid(
                    name,
                    format!("{value} must be a finite value > 0"),
                ));
            }
        }

        let degrees = self.rotation.degrees;
        if !(-ROTATION_LIMIT..=ROTATION_LIMIT).contains(&degrees) {
            return Err(PrismError::invalid(
                "rotation.degrees",
                format!("{degrees} is outside [-{ROTATION_LIMIT}, {ROTATION_LIMIT}]"),
            ));
        }

        Ok(())
    }
}

/// Whether a multiplier is within tolerance of its identity value.
pub fn is_neutral(value: f32) -> bool {
    (value - 1.0).abs() <= IDENTITY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rejects(spec: AdjustmentSpec, field: &str) {
        match spec.validate() {
            Err(PrismError::InvalidParameter { name, .. }) => assert_eq!(name, field),
            other => panic!("expected InvalidParameter for {field}, got {other:?}"),
        }
    }

    #[test]
    fn test_default_is_identity_and_valid() {
        let spec = AdjustmentSpec::default();
        assert!(spec.is_identity());
        spec.validate().expect("identity spec is valid");
    }

    #[test]
    fn test_rejects_out_of_range_intensity() {
        let mut spec = AdjustmentSpec::default();
        spec.sepia.intensity = 1.5;
        assert_rejects(spec.clone(), "sepia.intensity");
        spec.sepia.intensity = -0.1;
        assert_rejects(spec, "sepia.intensity");
    }

    #[test]
    fn test_intensity_checked_even_when_disabled() {
        let mut spec = AdjustmentSpec::default();
        spec.sepia.enabled = false;
        spec.sepia.intensity = f32::NAN;
        assert_rejects(spec, "sepia.intensity");
    }

    #[test]
    fn test_rejects_non_positive_scalars() {
        let mut spec = AdjustmentSpec::default();
        spec.contrast = 0.0;
        assert_rejects(spec, "contrast");

        let mut spec = AdjustmentSpec::default();
        spec.sharpness = -2.0;
        assert_rejects(spec, "sharpness");

        let mut spec = AdjustmentSpec::default();
        spec.brightness = f32::INFINITY;
        assert_rejects(spec, "brightness");
    }

    #[test]
    fn test_tiny_blur_radius_is_identity() {
        for radius in [1e-40, 1e-30, 0.01, 0.1, MIN_BLUR_RADIUS - 0.01] {
            let mut spec = AdjustmentSpec::default();
            spec.blur.radius = radius;
            assert!(spec.validate().is_ok(), "radius {radius} is valid");
            assert!(spec.is_identity(), "radius {radius} should be skipped");
        }

        let mut spec = AdjustmentSpec::default();
        spec.blur.radius = MIN_BLUR_RADIUS;
        assert!(!spec.is_identity());
    }

    #[test]
    fn test_rejects_negative_blur() {
        let mut spec = AdjustmentSpec::default();
        spec.blur.radius = -1.0;
        assert_rejects(spec, "blur.radius");
    }

    #[test]
    fn test_rotation_bounds_inclusive() {
        let mut spec = AdjustmentSpec::default();
        spec.rotation.degrees = 180.0;
        spec.validate().expect("180 is in range");
        spec.rotation.degrees = -180.0;
        spec.validate().expect("-180 is in range");
        spec.rotation.degrees = 180.5;
        assert_rejects(spec, "rotation.degrees");
    }

    #[test]
    fn test_scalar_within_tolerance_is_neutral() {
        assert!(is_neutral(1.0 + 1e-7));
        assert!(!is_neutral(1.001));
    }

    #[test]
    fn test_partial_json_fills_identity_defaults() {
        let spec: AdjustmentSpec =
            serde_json::from_str(r#"{ "grayscale": true, "rotation": { "degrees": 45 } }"#)
                .expect("partial spec parses");
        assert!(spec.grayscale);
        assert_eq!(spec.rotation.degrees, 45.0);
        assert!(!spec.rotation.expand_canvas);
        assert_eq!(spec.brightness, 1.0);
        assert_eq!(spec.sepia, SepiaParams::default());
    }
}
