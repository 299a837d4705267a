//! CSV export of the base matrix.

use super::MultiplicationTable;

impl MultiplicationTable {
    /// Render the base matrix as CSV with 1-indexed labels.
    ///
    /// The header row starts with an empty corner cell followed by `1..=n`;
    /// each following row starts with its label. Totals are never included.
    pub fn to_csv(&self) -> String {
        let header: Vec<String> = std::iter::once(String::new())
            .chain(self.labels().map(|label| label.to_string()))
            .collect();

        let mut lines = vec![header.join(",")];
        for (label, row) in self.labels().zip(self.rows()) {
            let cells: Vec<String> = std::iter::once(label.to_string())
                .chain(row.iter().map(u64::to_string))
                .collect();
            lines.push(cells.join(","));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_layout() {
        let table = MultiplicationTable::new(3).expect("valid size");
        assert_eq!(table.to_csv(), ",1,2,3\n1,1,2,3\n2,2,4,6\n3,3,6,9\n");
    }

    #[test]
    fn test_csv_has_no_totals() {
        let table = MultiplicationTable::new(4).expect("valid size");
        let csv = table.to_csv();
        assert_eq!(csv.lines().count(), 5);
        assert!(csv.lines().all(|line| line.split(',').count() == 5));
        assert!(!csv.contains("40"), "row total of 4 must not appear");
    }
}
