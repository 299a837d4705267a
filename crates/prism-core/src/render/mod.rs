//! Table visualisation: styled grid, heatmap, and graceful degradation.
//!
//! Rich views can fail (a caller budget is exceeded, a highlight is out of
//! range). A failure never aborts the base table: [`render_or_degrade`] turns
//! it into [`Rendering::Degraded`], which carries an always-available
//! [`PlainTable`] plus the reason. Each view degrades on its own; one view
//! failing has no effect on another.

pub mod colormap;
pub mod heatmap;
pub mod html;
pub mod styled;

pub use heatmap::Heatmap;
pub use styled::{StyleOptions, StyledTable};

use serde::Serialize;

use crate::table::MultiplicationTable;

/// Why a rich view could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("highlight factor {factor} is outside 1..={size}")]
    HighlightOutOfRange { factor: u32, size: u32 },

    #[error("styled table needs {cells} cells, budget is {budget}")]
    TooManyCells { cells: u64, budget: u64 },

    #[error("heatmap of size {size} exceeds the limit of {max}")]
    HeatmapTooLarge { size: u32, max: u32 },
}

/// Outcome of a visualisation step.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendering<T> {
    /// The rich view built successfully.
    Rich(T),
    /// The rich view failed; show `plain` and tell the user `reason`.
    Degraded { plain: PlainTable, reason: RenderError },
}

impl<T> Rendering<T> {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub fn rich(&self) -> Option<&T> {
        match self {
            Self::Rich(view) => Some(view),
            Self::Degraded { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&RenderError> {
        match self {
            Self::Rich(_) => None,
            Self::Degraded { reason, .. } => Some(reason),
        }
    }
}

/// Try to build a rich view, falling back to the plain table on failure.
pub fn render_or_degrade<T, F>(table: &MultiplicationTable, view: &'static str, build: F) -> Rendering<T>
where
    F: FnOnce() -> Result<T, RenderError>,
{
    match build() {
        Ok(rich) => Rendering::Rich(rich),
        Err(reason) => {
            tracing::warn!(view, %reason, "visualisation degraded to plain table");
            Rendering::Degraded {
                plain: PlainTable::from_table(table),
                reason,
            }
        }
    }
}

/// Unstyled, labelled grid. Building it cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlainTable {
    pub labels: Vec<u32>,
    pub rows: Vec<Vec<u64>>,
}

impl PlainTable {
    pub fn from_table(table: &MultiplicationTable) -> Self {
        Self {
            labels: table.labels().collect(),
            rows: table.rows().map(<[u64]>::to_vec).collect(),
        }
    }

    /// Right-aligned text grid for terminals.
    pub fn to_text(&self) -> String {
        let widest = self
            .rows
            .iter()
            .flatten()
            .copied()
            .chain(self.labels.iter().map(|&l| u64::from(l)))
            .max()
            .unwrap_or(0);
        let width = widest.to_string().len();

        let mut out = String::new();
        out.push_str(&format!("{:>width$}", ""));
        for label in &self.labels {
            out.push_str(&format!(" {label:>width$}"));
        }
        out.push('\n');

        for (label, row) in self.labels.iter().zip(&self.rows) {
            out.push_str(&format!("{label:>width$}"));
            for value in row {
                out.push_str(&format!(" {value:>width$}"));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_or_degrade_keeps_rich_view() {
        let table = MultiplicationTable::new(3).expect("valid size");
        let rendering = render_or_degrade(&table, "test", || Ok::<_, RenderError>(42));
        assert_eq!(rendering.rich(), Some(&42));
        assert!(!rendering.is_degraded());
    }

    #[test]
    fn test_render_or_degrade_falls_back_to_plain() {
        let table = MultiplicationTable::new(3).expect("valid size");
        let reason = RenderError::HeatmapTooLarge { size: 3, max: 2 };
        let rendering: Rendering<()> = render_or_degrade(&table, "test", || Err(reason.clone()));

        assert!(rendering.is_degraded());
        assert_eq!(rendering.reason(), Some(&reason));
        match rendering {
            Rendering::Degraded { plain, .. } => {
                assert_eq!(plain.rows, vec![vec![1, 2, 3], vec![2, 4, 6], vec![3, 6, 9]]);
            }
            Rendering::Rich(_) => panic!("expected degraded rendering"),
        }
    }

    #[test]
    fn test_plain_text_alignment() {
        let plain = PlainTable::from_table(&MultiplicationTable::new(4).expect("valid size"));
        let text = plain.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "    1  2  3  4");
        assert_eq!(lines[4], " 4  4  8 12 16");
    }
}
