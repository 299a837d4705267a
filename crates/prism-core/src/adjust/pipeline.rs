//! Fixed-order adjustment pipeline.
//!
//! An [`AdjustmentSpec`] is planned into an ordered list of [`Stage`]s. The
//! order is fixed by [`plan`] and cannot be changed by callers:
//!
//! ```text
//!   Source ──→ Normalize (orientation, RGB/RGBA) ──→ Grayscale ──→ Sepia ──→ Blur
//!          ──→ Brightness ──→ Contrast ──→ Saturation ──→ Sharpness
//!          ──→ Rotate ──→ Flip H ──→ Flip V ──→ Output
//! ```
//!
//! Stages whose parameters are at their identity value are left out of the
//! plan entirely, so an identity spec only normalizes.

use std::time::Instant;

use image::DynamicImage;

use crate::adjust::params::{AdjustmentSpec, is_neutral};
use crate::adjust::{color, enhance, geometry};
use crate::error::PrismError;
use crate::image::SourceImage;

/// One named step of the pipeline with its resolved parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage {
    Grayscale,
    Sepia { intensity: f32 },
    Blur { radius: f32 },
    Brightness(f32),
    Contrast(f32),
    Saturation(f32),
    Sharpness(f32),
    Rotate { degrees: f32, expand_canvas: bool },
    FlipHorizontal,
    FlipVertical,
}

impl Stage {
    /// Stable identifier for logs and diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Grayscale => "grayscale",
            Self::Sepia { .. } => "sepia",
            Self::Blur { .. } => "blur",
            Self::Brightness(_) => "brightness",
            Self::Contrast(_) => "contrast",
            Self::Saturation(_) => "saturation",
            Self::Sharpness(_) => "sharpness",
            Self::Rotate { .. } => "rotate",
            Self::FlipHorizontal => "flip_horizontal",
            Self::FlipVertical => "flip_vertical",
        }
    }

    /// Run this stage, producing a new image.
    pub fn apply(&self, image: &DynamicImage) -> DynamicImage {
        match *self {
            Self::Grayscale => color::grayscale(image),
            Self::Sepia { intensity } => color::sepia(image, intensity),
            Self::Blur { radius } => image.blur(radius),
            Self::Brightness(factor) => enhance::brightness(image, factor),
            Self::Contrast(factor) => enhance::contrast(image, factor),
            Self::Saturation(factor) => enhance::saturation(image, factor),
            Self::Sharpness(factor) => enhance::sharpness(image, factor),
            Self::Rotate {
                degrees,
                expand_canvas,
            } => geometry::rotate(image, degrees, expand_canvas),
            Self::FlipHorizontal => geometry::flip_horizontal(image),
            Self::FlipVertical => geometry::flip_vertical(image),
        }
    }
}

/// Resolve a spec into its ordered, non-identity stages.
pub fn plan(spec: &AdjustmentSpec) -> Vec<Stage> {
    let scalar = |value: f32| (!is_neutral(value)).then_some(value);

    [
        spec.grayscale.then_some(Stage::Grayscale),
        (spec.sepia.enabled && spec.sepia.intensity > 0.0).then_some(Stage::Sepia {
            intensity: spec.sepia.intensity,
        }),
        spec.blur.is_active().then_some(Stage::Blur {
            radius: spec.blur.radius,
        }),
        scalar(spec.brightness).map(Stage::Brightness),
        scalar(spec.contrast).map(Stage::Contrast),
        scalar(spec.saturation).map(Stage::Saturation),
        scalar(spec.sharpness).map(Stage::Sharpness),
        (spec.rotation.degrees.rem_euclid(360.0) != 0.0).then_some(Stage::Rotate {
            degrees: spec.rotation.degrees,
            expand_canvas: spec.rotation.expand_canvas,
        }),
        spec.flip.horizontal.then_some(Stage::FlipHorizontal),
        spec.flip.vertical.then_some(Stage::FlipVertical),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Apply `spec` to `source`, returning a new upright RGB/RGBA image.
///
/// The spec is validated before any pixel work. `source` is never modified.
pub fn apply(source: &SourceImage, spec: &AdjustmentSpec) -> Result<SourceImage, PrismError> {
    spec.validate()?;

    let stages = plan(spec);
    let started = Instant::now();
    let mut image = source.normalized();

    for stage in &stages {
        let stage_started = Instant::now();
        image = stage.apply(&image);
        tracing::debug!(
            stage = stage.name(),
            width = image.width(),
            height = image.height(),
            elapsed_us = stage_started.elapsed().as_micros() as u64,
            "applied stage"
        );
    }

    tracing::debug!(
        stages = stages.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "pipeline finished"
    );

    Ok(SourceImage::from_dynamic(image))
}
