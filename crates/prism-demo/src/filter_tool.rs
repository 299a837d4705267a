//! The `prism filter` command: load, adjust, encode, write.

use std::path::{Path, PathBuf};

use prism_core::export::{self, DEFAULT_STEM};
use prism_core::{AdjustmentSpec, DecodeLimits, apply};

use crate::cli::FilterArgs;
use crate::config::AppConfig;
use crate::error::DemoError;
use crate::image_loader;

/// Run `prism filter`, returning after the export is on disk.
pub fn run(args: &FilterArgs, config: &AppConfig) -> Result<(), DemoError> {
    let spec = effective_spec(args)?;
    if args.dump_spec {
        println!("{}", serde_json::to_string_pretty(&spec)?);
    }

    let encoding = args.format.encoding(args.quality);
    // Catch a bad quality before paying for decode and adjustment.
    encoding.validate()?;
    spec.validate()?;

    let limits = DecodeLimits {
        max_pixels: config.max_image_pixels,
    };
    let source = image_loader::load_image(&args.input, &limits)?;
    let adjusted = apply(&source, &spec)?;

    let stem = args.stem.as_deref().unwrap_or(DEFAULT_STEM);
    let encoded = export::encode(&adjusted, encoding, stem)?;
    if encoded.flattened_alpha {
        eprintln!("note: {encoding} has no transparency; transparent areas were filled with white");
    }

    let out_dir = args.out_dir.as_deref().unwrap_or(config.output_dir.as_path());
    let path = write_export(out_dir, &encoded.file_name, &encoded.bytes)?;
    println!("{}", path.display());
    Ok(())
}

/// Adjustments from `--spec` (or identity), with command-line flags layered on top.
pub fn effective_spec(args: &FilterArgs) -> Result<AdjustmentSpec, DemoError> {
    let base = match &args.spec {
        Some(path) => read_spec(path)?,
        None => AdjustmentSpec::default(),
    };
    Ok(overlay(base, args))
}

fn read_spec(path: &Path) -> Result<AdjustmentSpec, DemoError> {
    let text = std::fs::read_to_string(path).map_err(|source| DemoError::SpecRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DemoError::SpecParse {
        path: path.to_path_buf(),
        source,
    })
}

fn overlay(mut spec: AdjustmentSpec, args: &FilterArgs) -> AdjustmentSpec {
    spec.grayscale |= args.grayscale;
    if let Some(intensity) = args.sepia {
        spec.sepia.enabled = true;
        spec.sepia.intensity = intensity;
    }
    if let Some(radius) = args.blur {
        spec.blur.radius = radius;
    }
    if let Some(v) = args.brightness {
        spec.brightness = v;
    }
    if let Some(v) = args.contrast {
        spec.contrast = v;
    }
    if let Some(v) = args.saturation {
        spec.saturation = v;
    }
    if let Some(v) = args.sharpness {
        spec.sharpness = v;
    }
    if let Some(degrees) = args.rotate {
        spec.rotation.degrees = degrees;
    }
    spec.rotation.expand_canvas |= args.expand;
    spec.flip.horizontal |= args.flip_h;
    spec.flip.vertical |= args.flip_v;
    spec
}

fn write_export(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, DemoError> {
    std::fs::create_dir_all(dir).map_err(|source| DemoError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(file_name);
    std::fs::write(&path, bytes).map_err(|source| DemoError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), size = bytes.len(), "wrote export");
    Ok(path)
}
