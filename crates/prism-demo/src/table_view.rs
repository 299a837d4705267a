//! The `prism table` command: plain, deluxe, and stable table viewers.
//!
//! All three share the same base table. They differ in what happens when a
//! rich view cannot be built:
//!
//! | variant | styled table | heatmap | on failure |
//! |---------|--------------|---------|------------|
//! | plain   | gradient only | no     | command fails |
//! | deluxe  | full options | optional | command fails |
//! | stable  | full options | optional | that view falls back to the plain grid |

use std::path::Path;

use prism_core::render::html::{self, Page};
use prism_core::render::{Heatmap, PlainTable, StyleOptions, StyledTable, render_or_degrade};
use prism_core::{MultiplicationTable, RenderError};

use crate::cli::{TableArgs, Variant};
use crate::config::AppConfig;
use crate::error::DemoError;

/// Everything a table viewer needs, resolved from arguments and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableViewOptions {
    pub size: u32,
    pub variant: Variant,
    pub style: StyleOptions,
    pub heatmap: bool,
    pub max_heatmap_size: u32,
}

impl TableViewOptions {
    pub fn resolve(args: &TableArgs, config: &AppConfig) -> Result<Self, DemoError> {
        if args.size > config.max_table_size {
            return Err(DemoError::TableTooLarge {
                size: args.size,
                max: config.max_table_size,
            });
        }

        let style = match args.variant {
            Variant::Plain => StyleOptions {
                max_cells: config.max_styled_cells,
                ..StyleOptions::default()
            },
            Variant::Deluxe | Variant::Stable => StyleOptions {
                show_totals: args.totals,
                highlight_factor: args.highlight,
                highlight_squares: args.squares,
                max_cells: config.max_styled_cells,
            },
        };

        Ok(Self {
            size: args.size,
            variant: args.variant,
            style,
            heatmap: args.heatmap && args.variant != Variant::Plain,
            max_heatmap_size: config.max_heatmap_size,
        })
    }
}

/// A rendered table view.
#[derive(Debug, Clone)]
pub struct TableView {
    pub table: MultiplicationTable,
    pub page: Page,
    /// The heatmap, when requested and built.
    pub heatmap: Option<Heatmap>,
    /// Views that fell back to the plain grid (stable variant only).
    pub degraded: Vec<RenderError>,
}

/// Build the table and its views for `options`.
pub fn build(options: &TableViewOptions) -> Result<TableView, DemoError> {
    let table = MultiplicationTable::new(options.size)?;
    let mut page = Page::new(format!("Multiplication table, 1 to {}", options.size));
    let mut degraded = Vec::new();
    let mut rich_heatmap = None;

    match options.variant {
        Variant::Plain | Variant::Deluxe => {
            let styled = StyledTable::build(&table, &options.style)?;
            page = page.section("Table", html::styled_table(&styled));

            if options.heatmap {
                let heatmap = Heatmap::build(&table, options.max_heatmap_size)?;
                page = page.section("Heatmap", html::heatmap(&heatmap));
                rich_heatmap = Some(heatmap);
            }
        }
        Variant::Stable => {
            let styled = render_or_degrade(&table, "styled table", || {
                StyledTable::build(&table, &options.style)
            });
            degraded.extend(styled.reason().cloned());
            page = page.section("Table", html::rendering(&styled, html::styled_table));

            if options.heatmap {
                let heatmap = render_or_degrade(&table, "heatmap", || {
                    Heatmap::build(&table, options.max_heatmap_size)
                });
                degraded.extend(heatmap.reason().cloned());
                page = page.section("Heatmap", html::rendering(&heatmap, html::heatmap));
                rich_heatmap = heatmap.rich().cloned();
            }
        }
    }

    Ok(TableView {
        table,
        page,
        heatmap: rich_heatmap,
        degraded,
    })
}

/// Run `prism table`.
pub fn run(args: &TableArgs, config: &AppConfig) -> Result<(), DemoError> {
    let options = TableViewOptions::resolve(args, config)?;
    let view = build(&options)?;
    tracing::info!(
        size = options.size,
        variant = ?options.variant,
        degraded = view.degraded.len(),
        "table rendered"
    );

    if let Some(path) = &args.csv {
        write(path, &view.table.to_csv())?;
        tracing::info!(path = %path.display(), "wrote CSV");
    }

    if let Some(path) = &args.heatmap_json {
        match &view.heatmap {
            Some(heatmap) => {
                write(path, &heatmap.to_json()?)?;
                tracing::info!(path = %path.display(), "wrote heatmap JSON");
            }
            None => tracing::warn!(
                path = %path.display(),
                "no heatmap was built; skipping JSON export"
            ),
        }
    }

    match &args.html {
        Some(path) => {
            write(path, &view.page.render())?;
            tracing::info!(path = %path.display(), "wrote HTML page");
        }
        None => {
            for reason in &view.degraded {
                eprintln!("note: showing a plain table instead: {reason}");
            }
            print!("{}", PlainTable::from_table(&view.table).to_text());
        }
    }
    Ok(())
}

fn write(path: &Path, contents: &str) -> Result<(), DemoError> {
    std::fs::write(path, contents).map_err(|source| DemoError::Write {
        path: path.to_path_buf(),
        source,
    })
}
