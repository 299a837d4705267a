//! Image representation for the adjustment pipeline.

use std::fmt;
use std::io::Cursor;

use image::metadata::Orientation;
use image::{DynamicImage, GenericImageView, ImageDecoder, ImageReader, RgbImage, RgbaImage};

use crate::error::PrismError;

/// Channel layout of a normalized image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// 8-bit red, green, blue.
    Rgb,
    /// 8-bit red, green, blue, alpha.
    Rgba,
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb => write!(f, "RGB"),
            Self::Rgba => write!(f, "RGBA"),
        }
    }
}

/// Ceilings applied while decoding an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum `width * height` accepted, checked from the header before decoding.
    pub max_pixels: u64,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_pixels: 40_000_000,
        }
    }
}

/// An immutable source image plus the orientation tag read from its metadata.
///
/// Pixels are kept exactly as decoded. Orientation and channel normalization
/// happen once, as the first pipeline stage, so the value itself never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pixels: DynamicImage,
    orientation: Orientation,
}

impl SourceImage {
    /// Decode an uploaded file (PNG, JPEG, WEBP, or any other format the codec reads).
    pub fn decode(bytes: &[u8], limits: &DecodeLimits) -> Result<Self, PrismError> {
        let (width, height) = reader_for(bytes)?
            .into_dimensions()
            .map_err(|e| PrismError::UnsupportedFormat(e.to_string()))?;

        let pixels = u64::from(width) * u64::from(height);
        if pixels > limits.max_pixels {
            return Err(PrismError::ResourceLimit(format!(
                "image is {width}x{height} ({pixels} pixels), limit is {} pixels",
                limits.max_pixels
            )));
        }

        let mut decoder = reader_for(bytes)?
            .into_decoder()
            .map_err(|e| PrismError::UnsupportedFormat(e.to_string()))?;
        // A broken metadata block is not worth rejecting the upload over.
        let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
        let decoded = DynamicImage::from_decoder(decoder)
            .map_err(|e| PrismError::UnsupportedFormat(e.to_string()))?;

        tracing::debug!(
            width,
            height,
            color = ?decoded.color(),
            ?orientation,
            "decoded source image"
        );

        Ok(Self {
            pixels: decoded,
            orientation,
        })
    }

    /// Wrap an in-memory image. No orientation tag is attached.
    pub fn from_dynamic(pixels: DynamicImage) -> Self {
        Self {
            pixels,
            orientation: Orientation::NoTransforms,
        }
    }

    pub fn from_rgb8(pixels: RgbImage) -> Self {
        Self::from_dynamic(DynamicImage::ImageRgb8(pixels))
    }

    pub fn from_rgba8(pixels: RgbaImage) -> Self {
        Self::from_dynamic(DynamicImage::ImageRgba8(pixels))
    }

    /// Attach an orientation tag, as if it had been read from file metadata.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Stored width, before orientation is applied.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Stored height, before orientation is applied.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Layout this image normalizes to.
    pub fn layout(&self) -> ChannelLayout {
        if self.pixels.color().has_alpha() {
            ChannelLayout::Rgba
        } else {
            ChannelLayout::Rgb
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.pixels
    }

    /// Upright, 8-bit RGB or RGBA copy of the pixels.
    pub fn normalized(&self) -> DynamicImage {
        let mut upright = self.pixels.clone();
        upright.apply_orientation(self.orientation);
        normalize_channels(upright)
    }
}

/// Convert to 8-bit RGB, or 8-bit RGBA when the source carries alpha.
pub(crate) fn normalize_channels(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => image,
        other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

fn reader_for(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, PrismError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PrismError::UnsupportedFormat(e.to_string()))?;
    if reader.format().is_none() {
        return Err(PrismError::UnsupportedFormat(
            "bytes are not a recognised image".to_string(),
        ));
    }
    Ok(reader)
}
