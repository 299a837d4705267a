//! Image loading for the filter tool.

use std::path::{Path, PathBuf};

use prism_core::{DecodeLimits, PrismError, SourceImage};

/// Read an image file and decode it, refusing anything above `limits`.
///
/// The format is sniffed from the file contents, not the extension.
pub fn load_image(path: &Path, limits: &DecodeLimits) -> Result<SourceImage, ImageLoadError> {
    let bytes = std::fs::read(path).map_err(|source| ImageLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let image = SourceImage::decode(&bytes, limits).map_err(|source| ImageLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        layout = %image.layout(),
        "loaded image"
    );
    Ok(image)
}

/// Errors that can occur during image loading.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("could not decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: PrismError,
    },
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.png");
        let err = load_image(&path, &DecodeLimits::default()).expect_err("missing");
        assert!(matches!(err, ImageLoadError::Io { .. }));
    }

    #[test]
    fn test_non_image_is_unsupported_format() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(b"plain text, not pixels").expect("write temp file");

        let err = load_image(file.path(), &DecodeLimits::default()).expect_err("not an image");
        assert!(matches!(
            err,
            ImageLoadError::Decode {
                source: PrismError::UnsupportedFormat(_),
                ..
            }
        ));
    }
}
