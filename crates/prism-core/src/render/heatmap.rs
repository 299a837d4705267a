//! Heatmap view with per-cell hover tooltips.

use serde::Serialize;

use super::RenderError;
use super::colormap;
use crate::table::MultiplicationTable;

/// One shaded heatmap cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub row: u32,
    pub column: u32,
    pub value: u64,
    pub color: [u8; 3],
    /// Text shown on hover, e.g. `"3 × 4 = 12"`.
    pub tooltip: String,
}

/// Heatmap data for an `n × n` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub size: u32,
    pub cells: Vec<HeatmapCell>,
}

impl Heatmap {
    /// Build the heatmap, refusing tables larger than `max_size` per side.
    pub fn build(table: &MultiplicationTable, max_size: u32) -> Result<Self, RenderError> {
        let size = table.size();
        if size > max_size {
            return Err(RenderError::HeatmapTooLarge {
                size,
                max: max_size,
            });
        }

        let (min, max) = table.value_range();
        let cells = table
            .labels()
            .zip(table.rows())
            .flat_map(|(row, values)| {
                (1..=size).zip(values).map(move |(column, &value)| HeatmapCell {
                    row,
                    column,
                    value,
                    color: colormap::heat(colormap::normalize(value, min, max)),
                    tooltip: format!("{row} × {column} = {value}"),
                })
            })
            .collect();

        Ok(Self { size, cells })
    }

    /// Cell at 1-indexed `(row, column)`.
    pub fn cell(&self, row: u32, column: u32) -> Option<&HeatmapCell> {
        if row == 0 || column == 0 || row > self.size || column > self.size {
            return None;
        }
        self.cells
            .get((row - 1) as usize * self.size as usize + (column - 1) as usize)
    }

    /// Serialise for a client-side chart.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heatmap_tooltips() {
        let table = MultiplicationTable::new(4).expect("valid size");
        let heatmap = Heatmap::build(&table, 10).expect("builds");
        assert_eq!(heatmap.cells.len(), 16);

        let cell = heatmap.cell(3, 4).expect("in range");
        assert_eq!(cell.value, 12);
        assert_eq!(cell.tooltip, "3 × 4 = 12");
        assert!(heatmap.cell(5, 1).is_none());
    }

    #[test]
    fn test_heatmap_symmetric_colors() {
        let table = MultiplicationTable::new(6).expect("valid size");
        let heatmap = Heatmap::build(&table, 10).expect("builds");
        for i in 1..=6 {
            for j in 1..=6 {
                assert_eq!(heatmap.cell(i, j).map(|c| c.color), heatmap.cell(j, i).map(|c| c.color));
            }
        }
    }

    #[test]
    fn test_heatmap_size_limit() {
        let table = MultiplicationTable::new(12).expect("valid size");
        let err = Heatmap::build(&table, 11).expect_err("too large");
        assert_eq!(err, RenderError::HeatmapTooLarge { size: 12, max: 11 });
    }

    #[test]
    fn test_heatmap_json_shape() {
        let table = MultiplicationTable::new(2).expect("valid size");
        let json = Heatmap::build(&table, 10).expect("builds").to_json().expect("serializes");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(parsed["size"], 2);
        assert_eq!(parsed["cells"][3]["tooltip"], "2 × 2 = 4");
    }
}
