//! Multiplication table generation.
//!
//! `cell(i, j) = i × j` for `1 ≤ i, j ≤ n`, 1-indexed. Totals are derived
//! from the base matrix only and are never part of it.

mod csv;

use serde::Serialize;

use crate::error::PrismError;

/// Largest table this crate will build. Callers should impose a tighter ceiling.
pub const MAX_TABLE_SIZE: u32 = 1_000;

/// An `n × n` multiplication table, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiplicationTable {
    size: u32,
    cells: Vec<u64>,
}

impl MultiplicationTable {
    /// Build the table for `size` in `1..=MAX_TABLE_SIZE`.
    pub fn new(size: u32) -> Result<Self, PrismError> {
        if size == 0 || size > MAX_TABLE_SIZE {
            return Err(PrismError::invalid(
                "size",
                format!("{size} is outside [1, {MAX_TABLE_SIZE}]"),
            ));
        }

        let n = u64::from(size);
        let cells = (1..=n)
            .flat_map(|i| (1..=n).map(move |j| i * j))
            .collect();

        Ok(Self { size, cells })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Value at 1-indexed `(row, column)`, or `None` outside the table.
    pub fn cell(&self, row: u32, column: u32) -> Option<u64> {
        if row == 0 || column == 0 || row > self.size || column > self.size {
            return None;
        }
        let index = (row - 1) as usize * self.size as usize + (column - 1) as usize;
        self.cells.get(index).copied()
    }

    /// Rows of the base matrix, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> + '_ {
        self.cells.chunks_exact(self.size as usize)
    }

    /// Smallest and largest values in the base matrix.
    pub fn value_range(&self) -> (u64, u64) {
        let n = u64::from(self.size);
        (1, n * n)
    }

    /// Sum across each row of the base matrix.
    pub fn row_totals(&self) -> Vec<u64> {
        self.rows().map(|row| row.iter().sum()).collect()
    }

    /// Sum down each column of the base matrix.
    pub fn column_totals(&self) -> Vec<u64> {
        let mut totals = vec![0u64; self.size as usize];
        for row in self.rows() {
            for (total, value) in totals.iter_mut().zip(row) {
                *total += value;
            }
        }
        totals
    }

    /// Sum of every base cell.
    pub fn grand_total(&self) -> u64 {
        self.cells.iter().sum()
    }

    /// `1..=n`, the labels of both axes.
    pub fn labels(&self) -> impl Iterator<Item = u32> {
        1..=self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_by_three() {
        let table = MultiplicationTable::new(3).expect("valid size");
        let rows: Vec<Vec<u64>> = table.rows().map(<[u64]>::to_vec).collect();
        assert_eq!(rows, vec![vec![1, 2, 3], vec![2, 4, 6], vec![3, 6, 9]]);
        assert_eq!(table.row_totals(), vec![6, 12, 18]);
        assert_eq!(table.column_totals(), vec![6, 12, 18]);
        assert_eq!(table.grand_total(), 36);
    }

    #[test]
    fn test_cell_is_one_indexed() {
        let table = MultiplicationTable::new(5).expect("valid size");
        assert_eq!(table.cell(1, 1), Some(1));
        assert_eq!(table.cell(4, 5), Some(20));
        assert_eq!(table.cell(0, 1), None);
        assert_eq!(table.cell(6, 1), None);
    }

    #[test]
    fn test_size_bounds() {
        assert!(MultiplicationTable::new(0).is_err());
        assert!(MultiplicationTable::new(MAX_TABLE_SIZE + 1).is_err());
        assert!(MultiplicationTable::new(1).is_ok());
    }

    #[test]
    fn test_single_cell_table() {
        let table = MultiplicationTable::new(1).expect("valid size");
        assert_eq!(table.value_range(), (1, 1));
        assert_eq!(table.row_totals(), vec![1]);
    }

    #[test]
    fn test_grand_total_is_square_of_triangle() {
        // (1 + … + n)² for n = 10 is 55² = 3025.
        let table = MultiplicationTable::new(10).expect("valid size");
        assert_eq!(table.grand_total(), 3025);
        assert_eq!(table.row_totals().iter().sum::<u64>(), table.grand_total());
    }
}
