//! Self-contained HTML output for the table views.
//!
//! Every function returns a fragment; [`Page`] wraps fragments into a full
//! document with a small embedded stylesheet.

use super::colormap::hex;
use super::{Heatmap, PlainTable, Rendering, StyledTable};
use crate::render::styled::CellKind;

const STYLESHEET: &str = "\
body { font-family: system-ui, sans-serif; margin: 2rem; color: #222; }
h1 { font-size: 1.6rem; }
table { border-collapse: collapse; margin-bottom: 1.5rem; }
th, td { padding: 0.3rem 0.6rem; text-align: right; border: 1px solid #ddd; }
th { background: #f4f4f4; }
td.highlight { outline: 3px solid #111; outline-offset: -3px; font-weight: bold; }
td.total { background: #fafafa; font-style: italic; }
table.heatmap td { width: 1.6rem; height: 1.6rem; padding: 0; border: none; }
.notice { padding: 0.6rem 1rem; background: #fff4e5; border-left: 4px solid #f0a020; }
";

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Unstyled grid.
pub fn plain_table(plain: &PlainTable) -> String {
    let mut out = String::from("<table class=\"plain\">\n<tr><th></th>");
    for label in &plain.labels {
        out.push_str(&format!("<th>{label}</th>"));
    }
    out.push_str("</tr>\n");

    for (label, row) in plain.labels.iter().zip(&plain.rows) {
        out.push_str(&format!("<tr><th>{label}</th>"));
        for value in row {
            out.push_str(&format!("<td>{value}</td>"));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

/// Shaded grid with highlight and totals classes.
pub fn styled_table(styled: &StyledTable) -> String {
    let mut out = String::from("<table class=\"styled\">\n<tr><th></th>");
    for label in &styled.column_labels {
        out.push_str(&format!("<th>{}</th>", escape(label)));
    }
    out.push_str("</tr>\n");

    for row in &styled.rows {
        out.push_str(&format!("<tr><th>{}</th>", escape(&row.label)));
        for cell in &row.cells {
            let mut classes = Vec::new();
            if cell.kind == CellKind::Total {
                classes.push("total");
            }
            if cell.highlighted {
                classes.push("highlight");
            }

            out.push_str("<td");
            if !classes.is_empty() {
                out.push_str(&format!(" class=\"{}\"", classes.join(" ")));
            }
            if let Some(background) = cell.background {
                out.push_str(&format!(
                    " style=\"background:{};color:{}\"",
                    hex(background),
                    hex(cell.foreground)
                ));
            }
            out.push_str(&format!(">{}</td>", cell.value));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

/// Heatmap grid; hovering a cell shows its tooltip.
pub fn heatmap(heatmap: &Heatmap) -> String {
    let mut out = String::from("<table class=\"heatmap\">\n");
    for row in heatmap.cells.chunks(heatmap.size.max(1) as usize) {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!(
                "<td title=\"{}\" style=\"background:{}\"></td>",
                escape(&cell.tooltip),
                hex(cell.color)
            ));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

/// The rich fragment, or the plain table preceded by a notice naming the reason.
pub fn rendering<T>(rendering: &Rendering<T>, rich: impl FnOnce(&T) -> String) -> String {
    match rendering {
        Rendering::Rich(view) => rich(view),
        Rendering::Degraded { plain, reason } => {
            let mut out = notice(&format!("Showing a plain table instead: {reason}."));
            out.push_str(&plain_table(plain));
            out
        }
    }
}

/// A highlighted message block.
pub fn notice(message: &str) -> String {
    format!("<p class=\"notice\">{}</p>\n", escape(message))
}

/// A full HTML document built from titled sections.
#[derive(Debug, Clone, Default)]
pub struct Page {
    title: String,
    sections: Vec<(String, String)>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section; `body` is trusted HTML.
    pub fn section(mut self, heading: impl Into<String>, body: String) -> Self {
        self.sections.push((heading.into(), body));
        self
    }

    pub fn render(&self) -> String {
        let title = escape(&self.title);
        let mut out = format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title}</title>\n<style>\n{STYLESHEET}</style>\n</head>\n<body>\n<h1>{title}</h1>\n"
        );
        for (heading, body) in &self.sections {
            out.push_str(&format!("<section>\n<h2>{}</h2>\n{body}</section>\n", escape(heading)));
        }
        out.push_str("</body>\n</html>\n");
        out
    }
}
