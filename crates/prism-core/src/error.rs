//! Error model shared by the pipeline, export, and table generation.

/// Errors surfaced by core image and table computations.
///
/// All variants are deterministic functions of the input; retrying with the
/// same input yields the same error.
#[derive(Debug, thiserror::Error)]
pub enum PrismError {
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid value for `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("resource limit exceeded: {0}")]
    ResourceLimit(String),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

impl PrismError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
