//! Export encoding for adjusted images.
//!
//! Encoding is the only place an image leaves the pipeline. Lossless targets
//! (PNG, WebP) keep every channel. JPEG is lossy and has no alpha channel:
//! an RGBA image exported to JPEG is flattened onto an opaque white
//! background first. That flattening discards transparency for good and is
//! reported through [`EncodedImage::flattened_alpha`] rather than as an error.

use std::fmt;
use std::ops::RangeInclusive;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::PrismError;
use crate::image::SourceImage;

/// Accepted JPEG quality values.
pub const JPEG_QUALITY_RANGE: RangeInclusive<u8> = 50..=100;

/// Default JPEG quality when none is requested.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Background that transparent pixels are composited onto for alpha-less targets.
pub const FLATTEN_BACKGROUND: [u8; 3] = [255, 255, 255];

/// File stem used when the caller does not supply one.
pub const DEFAULT_STEM: &str = "filtered_image";

/// Target format requested at export time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum OutputEncoding {
    /// Lossless PNG.
    #[default]
    Png,
    /// Lossless WebP.
    WebP,
    /// Lossy JPEG, quality in [`JPEG_QUALITY_RANGE`].
    Jpeg { quality: u8 },
}

impl OutputEncoding {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::WebP => "webp",
            Self::Jpeg { .. } => "jpg",
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::WebP => "image/webp",
            Self::Jpeg { .. } => "image/jpeg",
        }
    }

    pub const fn supports_alpha(self) -> bool {
        !matches!(self, Self::Jpeg { .. })
    }

    pub fn validate(self) -> Result<(), PrismError> {
        if let Self::Jpeg { quality } = self {
            if !JPEG_QUALITY_RANGE.contains(&quality) {
                return Err(PrismError::invalid(
                    "quality",
                    format!(
                        "{quality} is outside [{}, {}]",
                        JPEG_QUALITY_RANGE.start(),
                        JPEG_QUALITY_RANGE.end()
                    ),
                ));
            }
        }
        Ok(())
    }

    /// File name for an export with the given stem, e.g. `photo.jpg`.
    pub fn file_name(self, stem: &str) -> String {
        let stem = stem.trim();
        let stem = if stem.is_empty() { DEFAULT_STEM } else { stem };
        format!("{stem}.{}", self.extension())
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "PNG (lossless)"),
            Self::WebP => write!(f, "WebP (lossless)"),
            Self::Jpeg { quality } => write!(f, "JPEG (quality {quality})"),
        }
    }
}

/// An encoded export, ready to be written or downloaded.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub encoding: OutputEncoding,
    /// Alpha was composited onto [`FLATTEN_BACKGROUND`] because the target has none.
    pub flattened_alpha: bool,
}

impl EncodedImage {
    pub fn mime_type(&self) -> &'static str {
        self.encoding.mime_type()
    }
}

/// Encode `image` into the requested format.
pub fn encode(
    image: &SourceImage,
    encoding: OutputEncoding,
    stem: &str,
) -> Result<EncodedImage, PrismError> {
    encoding.validate()?;

    let mut pixels = image.normalized();
    let mut flattened_alpha = false;
    if !encoding.supports_alpha() && pixels.color().has_alpha() {
        pixels = DynamicImage::ImageRgb8(flatten_alpha(&pixels, FLATTEN_BACKGROUND));
        flattened_alpha = true;
        tracing::warn!(
            %encoding,
            "target has no alpha channel; transparency flattened onto white"
        );
    }

    let mut bytes = Vec::new();
    let written = match encoding {
        OutputEncoding::Png => pixels.write_with_encoder(PngEncoder::new(&mut bytes)),
        OutputEncoding::WebP => pixels.write_with_encoder(WebPEncoder::new_lossless(&mut bytes)),
        OutputEncoding::Jpeg { quality } => {
            pixels.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, quality))
        }
    };
    written.map_err(PrismError::Encode)?;

    let file_name = encoding.file_name(stem);
    tracing::info!(
        file_name = %file_name,
        size = bytes.len(),
        %encoding,
        flattened_alpha,
        "encoded export"
    );

    Ok(EncodedImage {
        bytes,
        file_name,
        encoding,
        flattened_alpha,
    })
}

/// Composite every pixel over an opaque `background`, dropping alpha.
///
/// ```text
/// out = (c × a + bg × (255 − a)) / 255
/// ```
pub fn flatten_alpha(image: &DynamicImage, background: [u8; 3]) -> RgbImage {
    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let a = u32::from(a);
        let mix = |c: u8, bg: u8| ((u32::from(c) * a + u32::from(bg) * (255 - a) + 127) / 255) as u8;
        image::Rgb([
            mix(r, background[0]),
            mix(g, background[1]),
            mix(b, background[2]),
        ])
    })
}
