//! Styled table: rainbow-shaded cells, optional totals, optional highlights.

use serde::Serialize;

use super::RenderError;
use super::colormap;
use crate::table::MultiplicationTable;

/// Label used for the totals row and column.
pub const TOTAL_LABEL: &str = "Total";

/// Presentation choices for the styled table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleOptions {
    /// Append a totals row and column (unshaded, never highlighted).
    pub show_totals: bool,
    /// Highlight the row and column of this factor.
    pub highlight_factor: Option<u32>,
    /// Highlight the diagonal of perfect squares.
    pub highlight_squares: bool,
    /// Refuse to style grids with more cells than this, totals included.
    pub max_cells: u64,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            show_totals: false,
            highlight_factor: None,
            highlight_squares: false,
            max_cells: 2_500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Base,
    Total,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledCell {
    pub value: u64,
    pub kind: CellKind,
    /// Shading for base cells; totals are unshaded.
    pub background: Option<[u8; 3]>,
    pub foreground: [u8; 3],
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledRow {
    pub label: String,
    pub cells: Vec<StyledCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledTable {
    pub column_labels: Vec<String>,
    pub rows: Vec<StyledRow>,
}

impl StyledTable {
    pub fn build(table: &MultiplicationTable, options: &StyleOptions) -> Result<Self, RenderError> {
        let size = table.size();
        if let Some(factor) = options.highlight_factor {
            if factor == 0 || factor > size {
                return Err(RenderError::HighlightOutOfRange { factor, size });
            }
        }

        let side = u64::from(size) + u64::from(options.show_totals);
        let cells = side * side;
        if cells > options.max_cells {
            return Err(RenderError::TooManyCells {
                cells,
                budget: options.max_cells,
            });
        }

        let (min, max) = table.value_range();
        let is_highlighted = |row: u32, column: u32| {
            options
                .highlight_factor
                .is_some_and(|k| row == k || column == k)
                || (options.highlight_squares && row == column)
        };

        let mut rows: Vec<StyledRow> = table
            .labels()
            .zip(table.rows())
            .map(|(row, values)| {
                let cells = (1..=size)
                    .zip(values)
                    .map(|(column, &value)| {
                        let background = colormap::rainbow(colormap::normalize(value, min, max));
                        StyledCell {
                            value,
                            kind: CellKind::Base,
                            background: Some(background),
                            foreground: colormap::text_color(background),
                            highlighted: is_highlighted(row, column),
                        }
                    })
                    .collect();
                StyledRow {
                    label: row.to_string(),
                    cells,
                }
            })
            .collect();

        let mut column_labels: Vec<String> = table.labels().map(|l| l.to_string()).collect();

        if options.show_totals {
            for (row, total) in rows.iter_mut().zip(table.row_totals()) {
                row.cells.push(total_cell(total));
            }

            let mut totals: Vec<StyledCell> =
                table.column_totals().into_iter().map(total_cell).collect();
            totals.push(total_cell(table.grand_total()));
            rows.push(StyledRow {
                label: TOTAL_LABEL.to_string(),
                cells: totals,
            });
            column_labels.push(TOTAL_LABEL.to_string());
        }

        Ok(Self {
            column_labels,
            rows,
        })
    }

    /// Base cells only, row-major.
    pub fn base_cells(&self) -> impl Iterator<Item = &StyledCell> {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|cell| cell.kind == CellKind::Base)
    }
}

fn total_cell(value: u64) -> StyledCell {
    StyledCell {
        value,
        kind: CellKind::Total,
        background: None,
        foreground: [0, 0, 0],
        highlighted: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(n: u32) -> MultiplicationTable {
        MultiplicationTable::new(n).expect("valid size")
    }

    #[test]
    fn test_plain_gradient_shades_every_base_cell() {
        let styled = StyledTable::build(&table(5), &StyleOptions::default()).expect("builds");
        assert_eq!(styled.rows.len(), 5);
        assert_eq!(styled.column_labels, ["1", "2", "3", "4", "5"]);
        assert!(styled.base_cells().all(|c| c.background.is_some() && !c.highlighted));
    }

    #[test]
    fn test_gradient_ends_match_colormap() {
        let styled = StyledTable::build(&table(4), &StyleOptions::default()).expect("builds");
        assert_eq!(styled.rows[0].cells[0].background, Some(colormap::rainbow(0.0)));
        assert_eq!(styled.rows[3].cells[3].background, Some(colormap::rainbow(1.0)));
    }

    #[test]
    fn test_totals_appended_and_never_highlighted() {
        let options = StyleOptions {
            show_totals: true,
            highlight_factor: Some(3),
            highlight_squares: true,
            ..StyleOptions::default()
        };
        let styled = StyledTable::build(&table(3), &options).expect("builds");

        assert_eq!(styled.column_labels.last().map(String::as_str), Some(TOTAL_LABEL));
        assert_eq!(styled.rows.len(), 4);

        let totals_row: Vec<u64> = styled.rows[3].cells.iter().map(|c| c.value).collect();
        assert_eq!(totals_row, vec![6, 12, 18, 36]);
        let totals_col: Vec<u64> = styled.rows[..3].iter().map(|r| r.cells[3].value).collect();
        assert_eq!(totals_col, vec![6, 12, 18]);

        for row in &styled.rows {
            for cell in row.cells.iter().filter(|c| c.kind == CellKind::Total) {
                assert!(!cell.highlighted);
                assert!(cell.background.is_none());
            }
        }
    }

    #[test]
    fn test_highlight_factor_marks_row_and_column() {
        let options = StyleOptions {
            highlight_factor: Some(2),
            ..StyleOptions::default()
        };
        let styled = StyledTable::build(&table(4), &options).expect("builds");
        let marked = styled.base_cells().filter(|c| c.highlighted).count();
        // Row 2 and column 2 share one cell: 4 + 4 - 1.
        assert_eq!(marked, 7);
        assert!(styled.rows[1].cells[3].highlighted);
        assert!(!styled.rows[0].cells[0].highlighted);
    }

    #[test]
    fn test_highlight_squares_marks_diagonal() {
        let options = StyleOptions {
            highlight_squares: true,
            ..StyleOptions::default()
        };
        let styled = StyledTable::build(&table(6), &options).expect("builds");
        for (i, row) in styled.rows.iter().enumerate() {
            for (j, cell) in row.cells.iter().enumerate() {
                assert_eq!(cell.highlighted, i == j);
                if i == j {
                    assert_eq!(cell.value, ((i + 1) * (i + 1)) as u64);
                }
            }
        }
    }

    #[test]
    fn test_highlight_out_of_range_fails() {
        let options = StyleOptions {
            highlight_factor: Some(9),
            ..StyleOptions::default()
        };
        let err = StyledTable::build(&table(5), &options).expect_err("factor beyond size");
        assert_eq!(err, RenderError::HighlightOutOfRange { factor: 9, size: 5 });
    }

    #[test]
    fn test_cell_budget_counts_totals() {
        let options = StyleOptions {
            show_totals: true,
            max_cells: 100,
            ..StyleOptions::default()
        };
        // 9 + 1 = 10 per side fits exactly; 10 + 1 does not.
        assert!(StyledTable::build(&table(9), &options).is_ok());
        let err = StyledTable::build(&table(10), &options).expect_err("over budget");
        assert_eq!(err, RenderError::TooManyCells { cells: 121, budget: 100 });
    }
}
