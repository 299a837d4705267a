//! Application configuration for the command-line front end.

use std::path::PathBuf;
use std::str::FromStr;

/// Default ceiling on the table size accepted from the command line.
const DEFAULT_MAX_TABLE_SIZE: u32 = 100;
/// Default ceiling on decoded image area.
const DEFAULT_MAX_IMAGE_PIXELS: u64 = 40_000_000;
/// Default styled-table cell budget, totals included.
const DEFAULT_MAX_STYLED_CELLS: u64 = 2_500;
/// Default largest heatmap side.
const DEFAULT_MAX_HEATMAP_SIZE: u32 = 50;

/// Runtime configuration, read from `PRISM_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Largest `--size` accepted by `prism table`.
    pub max_table_size: u32,
    /// Largest `width * height` accepted by `prism filter`.
    pub max_image_pixels: u64,
    /// Cell budget for the styled table.
    pub max_styled_cells: u64,
    /// Largest table that still gets a heatmap.
    pub max_heatmap_size: u32,
    /// Where `prism filter` writes exports when `--out-dir` is absent.
    pub output_dir: PathBuf,
}

impl AppConfig {
    /// Build from an arbitrary variable lookup; unset or unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            max_table_size: parsed(&lookup, "PRISM_MAX_TABLE_SIZE", DEFAULT_MAX_TABLE_SIZE),
            max_image_pixels: parsed(&lookup, "PRISM_MAX_IMAGE_PIXELS", DEFAULT_MAX_IMAGE_PIXELS),
            max_styled_cells: parsed(&lookup, "PRISM_MAX_STYLED_CELLS", DEFAULT_MAX_STYLED_CELLS),
            max_heatmap_size: parsed(&lookup, "PRISM_MAX_HEATMAP_SIZE", DEFAULT_MAX_HEATMAP_SIZE),
            output_dir: lookup("PRISM_OUTPUT_DIR")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring unparsable configuration value");
            default
        }),
        None => default,
    }
}
