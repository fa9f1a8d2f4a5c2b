//! Named export projection
//!
//! Replaces catalog ids with display names for file export. A pure
//! transform; the model itself always stores ids and never sees this shape
//! again after writing it.

use serde::Serialize;

use crate::common::models::NameMappings;
use crate::plates::PlateMap;

/// One well of the export projection, labelled and name-resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WellStringFormat {
    pub well: String,
    pub cell_line: Option<String>,
    pub drugs: Vec<Option<String>>,
    pub doses: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dip_rate: Option<f64>,
}

/// Export projection of a whole plate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateStringFormat {
    pub wells: Vec<WellStringFormat>,
}

/// Project a plate into the named export form, padded well labels included
pub fn as_string_format(plate: &PlateMap, names: &NameMappings) -> PlateStringFormat {
    let wells = plate
        .wells()
        .iter()
        .enumerate()
        .map(|(well_num, well)| WellStringFormat {
            well: plate.well_name(well_num, true),
            cell_line: well.cell_line.map(|id| names.cell_line_name(id)),
            drugs: well
                .drugs
                .iter()
                .map(|drug| drug.map(|id| names.drug_name(id)))
                .collect(),
            doses: well.doses.clone(),
            dip_rate: well.dip_rate,
        })
        .collect();
    PlateStringFormat { wells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::models::{CellLine, Drug};
    use crate::plates::{PlateId, PlateMap};

    fn names() -> NameMappings {
        NameMappings::new(
            &[CellLine {
                id: 1,
                name: "BT20".to_string(),
            }],
            &[Drug {
                id: 5,
                name: "Abemaciclib".to_string(),
            }],
        )
    }

    #[test]
    fn test_projection_resolves_names_and_pads_labels() {
        let mut plate = PlateMap::new(PlateId::from(2), 8, 12);
        plate.set_cell_line(0, Some(1));
        plate.set_drug(0, 0, Some(5));
        plate.set_dose(0, 0, Some(1e-6));
        let format = as_string_format(&plate, &names());
        assert_eq!(format.wells.len(), 96);
        let first = &format.wells[0];
        assert_eq!(first.well, "A01");
        assert_eq!(first.cell_line.as_deref(), Some("BT20"));
        assert_eq!(first.drugs, vec![Some("Abemaciclib".to_string())]);
        assert_eq!(first.doses, vec![Some(1e-6)]);
    }

    #[test]
    fn test_unknown_ids_render_as_bare_ids() {
        let mut plate = PlateMap::new(PlateId::from(2), 1, 2);
        plate.set_drug(1, 0, Some(42));
        let format = as_string_format(&plate, &names());
        assert_eq!(format.wells[1].drugs, vec![Some("42".to_string())]);
    }

    #[test]
    fn test_sparse_slots_survive_the_projection() {
        let mut plate = PlateMap::new(PlateId::from(2), 1, 1);
        plate.set_drug(0, 1, Some(5));
        let format = as_string_format(&plate, &names());
        assert_eq!(
            format.wells[0].drugs,
            vec![None, Some("Abemaciclib".to_string())]
        );
    }

    #[test]
    fn test_wire_shape_skips_a_missing_dip_rate() {
        let mut plate = PlateMap::new(PlateId::from(2), 1, 1);
        plate.set_cell_line(0, Some(1));
        let value = serde_json::to_value(as_string_format(&plate, &names())).unwrap();
        assert_eq!(value["wells"][0]["well"], "A1");
        assert_eq!(value["wells"][0]["cellLine"], "BT20");
        assert!(value["wells"][0].get("dipRate").is_none());
    }
}
