//! Prism Core, the domain layer for the image filter tool and the table viewers.
//!
//! This crate contains the image adjustment pipeline, export encoding,
//! multiplication-table generation, and table visualisation. No CLI or
//! logging-subscriber dependencies.

pub mod adjust;
pub mod error;
pub mod export;
pub mod image;
pub mod render;
pub mod table;

// Re-exports for convenience.
pub use crate::adjust::params::AdjustmentSpec;
pub use crate::adjust::pipeline::apply;
pub use crate::error::PrismError;
pub use crate::export::{EncodedImage, OutputEncoding};
pub use crate::image::{ChannelLayout, DecodeLimits, SourceImage};
pub use crate::render::{RenderError, Rendering};
pub use crate::table::MultiplicationTable;
