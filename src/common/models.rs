use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::plates::{CellLineId, DrugId};

/// Catalog entry for a cell line, as served by the screening backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLine {
    pub id: CellLineId,
    pub name: String,
}

/// Catalog entry for a drug, as served by the screening backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drug {
    pub id: DrugId,
    pub name: String,
}

/// Lookup tables from catalog ids to display names
///
/// Plate maps store ids only. Anything that renders a plate for humans
/// (string formats, delimited exports) resolves names through this table.
#[derive(Debug, Clone, Default)]
pub struct NameMappings {
    cell_lines: HashMap<CellLineId, String>,
    drugs: HashMap<DrugId, String>,
}

impl NameMappings {
    pub fn new(cell_lines: &[CellLine], drugs: &[Drug]) -> Self {
        Self {
            cell_lines: cell_lines
                .iter()
                .map(|line| (line.id, line.name.clone()))
                .collect(),
            drugs: drugs
                .iter()
                .map(|drug| (drug.id, drug.name.clone()))
                .collect(),
        }
    }

    /// Display name for a cell line id, falling back to the bare id when the
    /// catalog has no entry for it
    pub fn cell_line_name(&self, id: CellLineId) -> String {
        self.cell_lines
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    /// Display name for a drug id, falling back to the bare id when the
    /// catalog has no entry for it
    pub fn drug_name(&self, id: DrugId) -> String {
        self.drugs
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mappings() -> NameMappings {
        NameMappings::new(
            &[CellLine {
                id: 1,
                name: "HeLa".to_string(),
            }],
            &[Drug {
                id: 5,
                name: "Paclitaxel".to_string(),
            }],
        )
    }

    #[test]
    fn test_known_ids_resolve_to_names() {
        let names = mappings();
        assert_eq!(names.cell_line_name(1), "HeLa");
        assert_eq!(names.drug_name(5), "Paclitaxel");
    }

    #[test]
    fn test_unknown_ids_fall_back_to_the_id() {
        let names = mappings();
        assert_eq!(names.cell_line_name(99), "99");
        assert_eq!(names.drug_name(42), "42");
    }
}
