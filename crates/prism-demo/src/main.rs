//! Prism: command-line multiplication-table viewer and image filter tool.
//!
//! `prism table` renders the table as a terminal grid or an HTML page in one
//! of three variants; `prism filter` runs the adjustment pipeline over an
//! image file and writes the encoded result.

mod cli;
mod config;
mod error;
mod filter_tool;
mod image_loader;
mod table_view;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{Cli, Command};
use crate::config::AppConfig;

/// Log directives used when `RUST_LOG` is unset.
const DEFAULT_LOG_DIRECTIVES: [&str; 2] = ["prism_core=info", "prism_demo=info"];

fn init_logging() {
    let mut filter = EnvFilter::from_default_env();
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_none() {
        for directive in DEFAULT_LOG_DIRECTIVES {
            if let Ok(d) = directive.parse() {
                filter = filter.add_directive(d);
            }
        }
    }

    // Logs go to stderr so stdout stays clean for the table grid.
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let config = AppConfig::default();
    tracing::debug!(?config, "loaded configuration");

    let result = match cli.command {
        Command::Table(args) => table_view::run(&args, &config),
        Command::Filter(args) => filter_tool::run(&args, &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
