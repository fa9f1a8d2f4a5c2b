//! Selection arithmetic
//!
//! Wells selected in a grid UI travel as 0-based row-major indices. Moving
//! a selection translates every index at once and refuses the whole move
//! when any well would leave the plate, so a failed move never scatters a
//! selection.

use serde::{Deserialize, Serialize};

use crate::common::errors::{PlateMapError, PlateResult};

use super::models::PlateMap;

/// Direction a selection auto-steps after an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDirection {
    Down,
    Right,
}

/// Extent of a set of positions: max - min + 1, or 0 when empty
fn span(positions: &[usize]) -> usize {
    match (positions.iter().min(), positions.iter().max()) {
        (Some(min), Some(max)) => max - min + 1,
        _ => 0,
    }
}

impl PlateMap {
    /// Number of rows a selection spans, bounding box not count
    pub fn selection_height(&self, wells: &[usize]) -> usize {
        span(&self.row_nums(wells))
    }

    /// Number of columns a selection spans
    pub fn selection_width(&self, wells: &[usize]) -> usize {
        span(&self.col_nums(wells))
    }

    /// Translate every well index by `step` rows or columns
    ///
    /// All-or-nothing: when any well would leave the plate the whole call
    /// fails with `SelectionOutOfBounds` naming that well, and the caller
    /// keeps its selection where it was.
    pub fn move_selection_by(
        &self,
        wells: &[usize],
        step: isize,
        in_row_direction: bool,
    ) -> PlateResult<Vec<usize>> {
        wells
            .iter()
            .map(|&well| {
                let moved = if in_row_direction {
                    self.checked_row_move(well, step)
                } else {
                    self.checked_col_move(well, step)
                };
                moved.ok_or_else(|| PlateMapError::SelectionOutOfBounds {
                    well: self.well_name(well, false),
                })
            })
            .collect()
    }

    /// Auto-step a selection by its own height (down) or width (right)
    ///
    /// Inherits the all-or-nothing boundary behavior of `move_selection_by`.
    pub fn step_selection(
        &self,
        wells: &[usize],
        direction: StepDirection,
    ) -> PlateResult<Vec<usize>> {
        let (step, in_row_direction) = match direction {
            StepDirection::Down => (self.selection_height(wells), true),
            StepDirection::Right => (self.selection_width(wells), false),
        };
        // a plate cannot have enough wells for this conversion to fail
        let step = isize::try_from(step).unwrap_or(isize::MAX);
        self.move_selection_by(wells, step, in_row_direction)
    }

    /// Flat index after a row move, when the result stays on the plate
    fn checked_row_move(&self, well: usize, step: isize) -> Option<usize> {
        let offset = isize::try_from(self.num_cols()).ok()?.checked_mul(step)?;
        let target = well.checked_add_signed(offset)?;
        (target < self.well_count()).then_some(target)
    }

    /// Flat index after a column move, when the column stays on the plate
    fn checked_col_move(&self, well: usize, step: isize) -> Option<usize> {
        let col = self.col_num(well).checked_add_signed(step)?;
        (col < self.num_cols()).then_some(self.well_num(self.row_num(well), col))
    }
}
