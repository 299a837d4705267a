//! Errors reported by the command-line front end.

use std::path::PathBuf;

use prism_core::{PrismError, RenderError};

use crate::image_loader::ImageLoadError;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error(transparent)]
    Core(#[from] PrismError),

    #[error("visualisation failed: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Load(#[from] ImageLoadError),

    #[error("table size {size} is above the configured limit of {max} (PRISM_MAX_TABLE_SIZE)")]
    TableTooLarge { size: u32, max: u32 },

    #[error("failed to read adjustment file {}: {source}", .path.display())]
    SpecRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("adjustment file {} is not valid: {source}", .path.display())]
    SpecParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialise output: {0}")]
    Json(#[from] serde_json::Error),
}
