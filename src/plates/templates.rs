//! Template application
//!
//! A template ("MASTER") plate map is a reusable source whose contents are
//! copied well-for-well into a real plate, either wholesale or one field at
//! a time.

use serde::{Deserialize, Serialize};

use crate::common::errors::{PlateMapError, PlateResult};

use super::models::PlateMap;

/// Scope of a template copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateView {
    /// Cell lines, drugs and doses together
    Overview,
    CellLines,
    Drugs,
    Doses,
}

impl PlateMap {
    /// Copy the fields selected by `view` well-for-well from `source`
    ///
    /// Dimensions must match exactly; on mismatch nothing is copied. Slot
    /// vectors are cloned, so source and destination stay independently
    /// mutable. Fields outside the view keep their previous values, and the
    /// server-computed dip rate is never part of a template.
    pub fn apply_template(&mut self, source: &PlateMap, view: TemplateView) -> PlateResult<()> {
        if self.num_rows() != source.num_rows() || self.num_cols() != source.num_cols() {
            return Err(PlateMapError::DimensionMismatch {
                source_rows: source.num_rows(),
                source_cols: source.num_cols(),
                dest_rows: self.num_rows(),
                dest_cols: self.num_cols(),
            });
        }

        let copy_cell_lines = matches!(view, TemplateView::Overview | TemplateView::CellLines);
        let copy_drugs = matches!(view, TemplateView::Overview | TemplateView::Drugs);
        let copy_doses = matches!(view, TemplateView::Overview | TemplateView::Doses);

        for (dest, src) in self.wells_mut().iter_mut().zip(source.wells()) {
            if copy_cell_lines {
                dest.cell_line = src.cell_line;
            }
            if copy_drugs {
                dest.drugs = src.drugs.clone();
            }
            if copy_doses {
                dest.doses = src.doses.clone();
            }
        }
        self.mark_changed();
        tracing::debug!(
            "Applied {view:?} template from plate map {}",
            source.plate_id()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::models::{PlateId, PlateMap};
    use super::*;

    fn template() -> PlateMap {
        let mut master = PlateMap::new(PlateId::master(), 2, 2);
        master.set_cell_line(0, Some(1));
        master.set_drug(0, 0, Some(5));
        master.set_dose(0, 0, Some(1e-6));
        master.set_cell_line(3, Some(2));
        master
    }

    #[test]
    fn test_overview_copies_all_assignment_fields() {
        let mut plate = PlateMap::new(PlateId::from(9), 2, 2);
        plate
            .apply_template(&template(), TemplateView::Overview)
            .unwrap();
        assert_eq!(plate.well(0).cell_line, Some(1));
        assert_eq!(plate.well(0).drugs, vec![Some(5)]);
        assert_eq!(plate.well(0).doses, vec![Some(1e-6)]);
        assert_eq!(plate.well(3).cell_line, Some(2));
        assert!(plate.has_unsaved_changes());
    }

    #[test]
    fn test_drugs_view_leaves_other_fields_alone() {
        let mut plate = PlateMap::new(PlateId::from(9), 2, 2);
        plate.set_cell_line(0, Some(7));
        plate.set_dose(0, 0, Some(3e-9));
        plate
            .apply_template(&template(), TemplateView::Drugs)
            .unwrap();
        assert_eq!(plate.well(0).cell_line, Some(7));
        assert_eq!(plate.well(0).drugs, vec![Some(5)]);
        assert_eq!(plate.well(0).doses, vec![Some(3e-9)]);
    }

    #[test]
    fn test_cell_lines_view_copies_only_cell_lines() {
        let mut plate = PlateMap::new(PlateId::from(9), 2, 2);
        plate
            .apply_template(&template(), TemplateView::CellLines)
            .unwrap();
        assert_eq!(plate.well(0).cell_line, Some(1));
        assert!(plate.well(0).drugs.is_empty());
        assert!(plate.well(0).doses.is_empty());
    }

    #[test]
    fn test_copies_are_deep_and_the_source_stays_intact() {
        let master = template();
        let mut plate = PlateMap::new(PlateId::from(9), 2, 2);
        plate
            .apply_template(&master, TemplateView::Overview)
            .unwrap();
        plate.set_drug(0, 0, Some(8));
        plate.set_dose(0, 0, Some(5e-5));
        assert_eq!(master.well(0).drugs, vec![Some(5)]);
        assert_eq!(master.well(0).doses, vec![Some(1e-6)]);
    }

    #[test]
    fn test_dimension_mismatch_copies_nothing() {
        let mut plate = PlateMap::new(PlateId::from(9), 8, 12);
        let result = plate.apply_template(&template(), TemplateView::Overview);
        assert!(matches!(
            result,
            Err(PlateMapError::DimensionMismatch { .. })
        ));
        assert!(!plate.has_unsaved_changes());
        assert!(plate.wells().iter().all(|well| well.is_empty()));
    }

    #[test]
    fn test_view_wire_names() {
        assert_eq!(
            serde_json::to_value(TemplateView::CellLines).unwrap(),
            serde_json::json!("celllines")
        );
        assert_eq!(
            serde_json::from_str::<TemplateView>("\"overview\"").unwrap(),
            TemplateView::Overview
        );
    }
}
