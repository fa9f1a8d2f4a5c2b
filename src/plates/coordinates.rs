//! Well coordinate math
//!
//! Converts between 0-based row-major well indices and the spreadsheet-style
//! names printed on plate hardware ("A1", "H12"), and formats index sets as
//! compact human-readable ranges for validation messages.

use super::models::PlateMap;

const ROW_ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Label for a 0-based row index
///
/// Rows 0-25 take a single letter. Rows 26 and up take the legacy two-letter
/// form (26 is "AA", 51 "AZ", 52 "BA"), which is not spreadsheet bijective
/// base-26 and stops at "ZZ" (row 701); no plate format comes close to that.
fn row_label(row: usize) -> String {
    if row < 26 {
        (ROW_ALPHABET[row] as char).to_string()
    } else {
        let first = ROW_ALPHABET[row / 26 - 1] as char;
        let second = ROW_ALPHABET[row % 26] as char;
        format!("{first}{second}")
    }
}

impl PlateMap {
    /// Row index of a well number
    pub fn row_num(&self, well_num: usize) -> usize {
        well_num / self.num_cols()
    }

    /// Column index of a well number
    pub fn col_num(&self, well_num: usize) -> usize {
        well_num % self.num_cols()
    }

    /// Row indices for a set of well numbers
    pub fn row_nums(&self, wells: &[usize]) -> Vec<usize> {
        wells.iter().map(|&well| self.row_num(well)).collect()
    }

    /// Column indices for a set of well numbers
    pub fn col_nums(&self, wells: &[usize]) -> Vec<usize> {
        wells.iter().map(|&well| self.col_num(well)).collect()
    }

    /// Well number at a (row, column) position
    pub fn well_num(&self, row: usize, col: usize) -> usize {
        row * self.num_cols() + col
    }

    /// Spreadsheet-style name of a well ("B7")
    ///
    /// `padded` zero-pads the column number to the width of the highest
    /// column ("B07" on a 12-column plate), which keeps exported labels
    /// sortable as text. Panics when `well_num` is outside the grid.
    pub fn well_name(&self, well_num: usize, padded: bool) -> String {
        assert!(
            well_num < self.well_count(),
            "well {well_num} outside a {}x{} plate",
            self.num_rows(),
            self.num_cols()
        );
        let row = row_label(self.row_num(well_num));
        let col = self.col_num(well_num) + 1;
        if padded {
            let width = self.num_cols().to_string().len();
            format!("{row}{col:0width$}")
        } else {
            format!("{row}{col}")
        }
    }

    /// Compact description of a well-index set
    ///
    /// Indices are sorted and deduplicated, then grouped into maximal runs
    /// of consecutive wells within one row; runs render as an en-dash range
    /// ("A1\u{2013}A4"), joined by commas. The empty set reads "No wells".
    pub fn readable_wells(&self, wells: &[usize]) -> String {
        match wells {
            [] => "No wells".to_string(),
            [well] => self.well_name(*well, false),
            _ => {
                let mut sorted = wells.to_vec();
                sorted.sort_unstable();
                sorted.dedup();
                let mut runs = Vec::new();
                let mut start = sorted[0];
                let mut prev = sorted[0];
                for &well in &sorted[1..] {
                    let adjacent = well == prev + 1 && self.row_num(well) == self.row_num(prev);
                    if !adjacent {
                        runs.push(self.run_label(start, prev));
                        start = well;
                    }
                    prev = well;
                }
                runs.push(self.run_label(start, prev));
                runs.join(", ")
            }
        }
    }

    fn run_label(&self, start: usize, end: usize) -> String {
        if start == end {
            self.well_name(start, false)
        } else {
            format!(
                "{}\u{2013}{}",
                self.well_name(start, false),
                self.well_name(end, false)
            )
        }
    }
}
