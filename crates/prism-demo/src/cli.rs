//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use prism_core::OutputEncoding;
use prism_core::export::DEFAULT_JPEG_QUALITY;

#[derive(Debug, Parser)]
#[command(name = "prism", version, about = "Multiplication-table viewer and image filter tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render an n × n multiplication table.
    Table(TableArgs),
    /// Apply adjustments to an image and export it.
    Filter(FilterArgs),
}

/// Which table viewer to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Gradient-shaded table only.
    Plain,
    /// Totals, highlights, heatmap; any visualisation error fails the command.
    Deluxe,
    /// Like deluxe, but each failing view falls back to the plain table.
    Stable,
}

#[derive(Debug, Args)]
pub struct TableArgs {
    /// Number of rows and columns.
    #[arg(long, short = 'n', default_value_t = 10)]
    pub size: u32,

    #[arg(long, value_enum, default_value_t = Variant::Plain)]
    pub variant: Variant,

    /// Append a totals row and column.
    #[arg(long)]
    pub totals: bool,

    /// Highlight the row and column of this factor.
    #[arg(long, value_name = "K")]
    pub highlight: Option<u32>,

    /// Highlight the diagonal of perfect squares.
    #[arg(long)]
    pub squares: bool,

    /// Add a heatmap view.
    #[arg(long)]
    pub heatmap: bool,

    /// Write an HTML page here instead of printing a text grid.
    #[arg(long, value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// Also export the base table as CSV.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Also write the heatmap cells as JSON for client-side charts.
    #[arg(long, value_name = "PATH", requires = "heatmap")]
    pub heatmap_json: Option<PathBuf>,
}

/// Export format for `prism filter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Png,
    Webp,
    Jpeg,
}

impl Format {
    /// The encoding to request; `quality` only matters for JPEG.
    pub fn encoding(self, quality: u8) -> OutputEncoding {
        match self {
            Self::Png => OutputEncoding::Png,
            Self::Webp => OutputEncoding::WebP,
            Self::Jpeg => OutputEncoding::Jpeg { quality },
        }
    }
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Image to process (PNG, JPEG, WebP, ...).
    pub input: PathBuf,

    /// JSON adjustment file; flags below override its fields.
    #[arg(long, value_name = "JSON")]
    pub spec: Option<PathBuf>,

    #[arg(long)]
    pub grayscale: bool,

    /// Sepia strength in [0, 1].
    #[arg(long, value_name = "I")]
    pub sepia: Option<f32>,

    /// Gaussian blur radius in pixels.
    #[arg(long, value_name = "R")]
    pub blur: Option<f32>,

    #[arg(long, value_name = "V")]
    pub brightness: Option<f32>,

    #[arg(long, value_name = "V")]
    pub contrast: Option<f32>,

    #[arg(long, value_name = "V")]
    pub saturation: Option<f32>,

    #[arg(long, value_name = "V")]
    pub sharpness: Option<f32>,

    /// Counter-clockwise rotation in degrees, [-180, 180].
    #[arg(long, value_name = "D", allow_hyphen_values = true)]
    pub rotate: Option<f32>,

    /// Grow the canvas so a rotated image is not cropped.
    #[arg(long)]
    pub expand: bool,

    #[arg(long)]
    pub flip_h: bool,

    #[arg(long)]
    pub flip_v: bool,

    #[arg(long, value_enum, default_value_t = Format::Png)]
    pub format: Format,

    /// JPEG quality in [50, 100].
    #[arg(long, value_name = "Q", default_value_t = DEFAULT_JPEG_QUALITY)]
    pub quality: u8,

    /// Output directory; defaults to `PRISM_OUTPUT_DIR`.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Output file stem.
    #[arg(long, value_name = "NAME")]
    pub stem: Option<String>,

    /// Print the effective adjustments as JSON before processing.
    #[arg(long)]
    pub dump_spec: bool,
}
