//! Structural validation
//!
//! Checks that well contents make sense as a screening run: every dose
//! names a drug, every drug carries a dose and a cell line, and no well
//! lists the same drug twice. Findings are plain strings for a UI to show;
//! the caller decides whether to block on them or save anyway.

use super::models::{PlateMap, Well};

/// Whether any non-empty drug id appears in more than one slot
fn has_duplicate_drug(well: &Well) -> bool {
    let ids: Vec<_> = well.drugs.iter().copied().flatten().collect();
    ids.iter().enumerate().any(|(i, id)| ids[..i].contains(id))
}

impl PlateMap {
    /// Check every well, collecting human-readable findings per rule
    ///
    /// Short-circuits to success when nothing changed since the last save.
    /// Never mutates; a well can trigger several findings at once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        if !self.has_unsaved_changes() {
            return Ok(());
        }

        let mut dose_no_drug = Vec::new();
        let mut drug_no_dose = Vec::new();
        let mut drug_no_cell_line = Vec::new();
        let mut duplicate_drug = Vec::new();

        for (well_num, well) in self.wells().iter().enumerate() {
            let slots = well.drugs.len().max(well.doses.len());
            let mut slot_without_drug = false;
            let mut slot_without_dose = false;
            for slot in 0..slots {
                let drug = well.drugs.get(slot).copied().flatten();
                let dose = well.doses.get(slot).copied().flatten();
                match (drug, dose) {
                    (None, Some(_)) => slot_without_drug = true,
                    (Some(_), None) => slot_without_dose = true,
                    _ => {}
                }
            }
            if slot_without_drug {
                dose_no_drug.push(well_num);
            }
            if slot_without_dose {
                drug_no_dose.push(well_num);
            }
            if well.has_drugs() && well.cell_line.is_none() {
                drug_no_cell_line.push(well_num);
            }
            if has_duplicate_drug(well) {
                duplicate_drug.push(well_num);
            }
        }

        let mut errors = Vec::new();
        if !dose_no_drug.is_empty() {
            errors.push(format!(
                "Dose but no drug specified in wells: {}",
                self.readable_wells(&dose_no_drug)
            ));
        }
        if !drug_no_dose.is_empty() {
            errors.push(format!(
                "Drug but no dose specified in wells: {}",
                self.readable_wells(&drug_no_dose)
            ));
        }
        if !drug_no_cell_line.is_empty() {
            errors.push(format!(
                "Drug but no cell line specified in wells: {}",
                self.readable_wells(&drug_no_cell_line)
            ));
        }
        if !duplicate_drug.is_empty() {
            errors.push(format!(
                "Same drug specified more than once in wells: {}",
                self.readable_wells(&duplicate_drug)
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(
                "Plate map {} failed validation with {} findings",
                self.plate_id(),
                errors.len()
            );
            Err(errors)
        }
    }
}
