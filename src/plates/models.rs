//! Plate map grid model
//!
//! `PlateMap` owns a row-major grid of `Well` records for one physical plate
//! and exposes the only mutating API, so the unsaved-changes flag cannot
//! drift out of step with the data.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::common::errors::{PlateMapError, PlateResult};

/// Identifier of a cell line in the screening catalog
pub type CellLineId = i32;

/// Identifier of a drug in the screening catalog
pub type DrugId = i32;

/// Identifier of a plate map
///
/// Real plates carry the numeric database id; template plate maps carry a
/// name, with `"MASTER"` the conventional template. Serializes untagged, so
/// the wire form is a bare number or string exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlateId {
    Numeric(i64),
    Name(String),
}

impl PlateId {
    /// Conventional name of the template plate map
    pub const MASTER: &'static str = "MASTER";

    pub fn master() -> Self {
        PlateId::Name(Self::MASTER.to_string())
    }

    /// Whether this names the reusable template rather than a real plate
    pub fn is_master(&self) -> bool {
        matches!(self, PlateId::Name(name) if name == Self::MASTER)
    }
}

impl fmt::Display for PlateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlateId::Numeric(id) => write!(f, "{id}"),
            PlateId::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<i64> for PlateId {
    fn from(id: i64) -> Self {
        PlateId::Numeric(id)
    }
}

impl From<&str> for PlateId {
    fn from(name: &str) -> Self {
        PlateId::Name(name.to_string())
    }
}

/// Treat a wire `null` for a slot vector as the empty vector
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let slots: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(slots.unwrap_or_default())
}

/// One physical location on a plate
///
/// Drug and dose slots are index-aligned: the dose in slot `i` applies to
/// the drug in slot `i`. The two vectors may differ in length and may hold
/// `None` gaps; `PlateMap::validate` reports the mismatches rather than the
/// model forbidding them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Well {
    #[serde(default)]
    pub cell_line: Option<CellLineId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub drugs: Vec<Option<DrugId>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub doses: Vec<Option<f64>>,
    /// Server-computed result, carried through load and save but never set
    /// by any mutator here
    #[serde(default)]
    pub dip_rate: Option<f64>,
}

impl Well {
    /// Whether the well carries no assignment at all (a dip rate alone does
    /// not count, being a computed result rather than an assignment)
    pub fn is_empty(&self) -> bool {
        self.cell_line.is_none() && !self.has_drugs() && !self.has_doses()
    }

    /// Whether any drug slot is filled
    pub fn has_drugs(&self) -> bool {
        self.drugs.iter().any(Option::is_some)
    }

    /// Whether any dose slot is filled
    pub fn has_doses(&self) -> bool {
        self.doses.iter().any(Option::is_some)
    }
}

/// Assign `value` at `slot`, growing the sequence with `None` fill
fn set_slot<T>(slots: &mut Vec<Option<T>>, slot: usize, value: Option<T>) {
    if slots.len() <= slot {
        slots.resize_with(slot + 1, || None);
    }
    slots[slot] = value;
}

/// Transport form of a plate map, as exchanged with the persistence backend
///
/// Kept separate from `PlateMap` so deserialization re-checks the grid shape
/// before the model accepts it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateMapData {
    pub plate_id: PlateId,
    pub num_rows: usize,
    pub num_cols: usize,
    #[serde(default)]
    pub wells: Vec<Well>,
}

/// The full grid of wells for one physical plate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PlateMapData")]
pub struct PlateMap {
    plate_id: PlateId,
    num_rows: usize,
    num_cols: usize,
    wells: Vec<Well>,
    #[serde(skip)]
    unsaved_changes: bool,
}

impl TryFrom<PlateMapData> for PlateMap {
    type Error = PlateMapError;

    fn try_from(data: PlateMapData) -> Result<Self, Self::Error> {
        PlateMap::from_wells(data.plate_id, data.num_rows, data.num_cols, data.wells)
    }
}

impl From<&PlateMap> for PlateMapData {
    fn from(plate: &PlateMap) -> Self {
        Self {
            plate_id: plate.plate_id.clone(),
            num_rows: plate.num_rows,
            num_cols: plate.num_cols,
            wells: plate.wells.clone(),
        }
    }
}

impl PlateMap {
    /// Create an all-empty plate map with the given dimensions
    pub fn new(plate_id: PlateId, num_rows: usize, num_cols: usize) -> Self {
        Self {
            plate_id,
            num_rows,
            num_cols,
            wells: vec![Well::default(); num_rows * num_cols],
            unsaved_changes: false,
        }
    }

    /// Build a plate map from transport wells
    ///
    /// An empty `wells` vector stands for an all-empty grid; a non-empty one
    /// must hold exactly `num_rows * num_cols` records or the whole payload
    /// is rejected with `ShapeMismatch`.
    pub fn from_wells(
        plate_id: PlateId,
        num_rows: usize,
        num_cols: usize,
        wells: Vec<Well>,
    ) -> PlateResult<Self> {
        let expected = num_rows * num_cols;
        if !wells.is_empty() && wells.len() != expected {
            return Err(PlateMapError::ShapeMismatch {
                expected,
                actual: wells.len(),
            });
        }
        let wells = if wells.is_empty() {
            vec![Well::default(); expected]
        } else {
            wells
        };
        Ok(Self {
            plate_id,
            num_rows,
            num_cols,
            wells,
            unsaved_changes: false,
        })
    }

    pub fn plate_id(&self) -> &PlateId {
        &self.plate_id
    }

    /// Whether this plate map is the reusable template
    pub fn is_template(&self) -> bool {
        self.plate_id.is_master()
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Total number of wells on the plate
    pub fn well_count(&self) -> usize {
        self.num_rows * self.num_cols
    }

    pub fn wells(&self) -> &[Well] {
        &self.wells
    }

    /// Well at a 0-based row-major index; panics when the index is outside
    /// the grid
    pub fn well(&self, well_num: usize) -> &Well {
        &self.wells[well_num]
    }

    /// Whether any well was mutated since construction or the last
    /// confirmed save
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    /// Record that the current state reached the backend
    pub fn mark_saved(&mut self) {
        self.unsaved_changes = false;
    }

    /// Mutable view of the wells for sibling modules; callers must pair it
    /// with `mark_changed`
    pub(crate) fn wells_mut(&mut self) -> &mut [Well] {
        &mut self.wells
    }

    pub(crate) fn mark_changed(&mut self) {
        self.unsaved_changes = true;
    }

    /// Set a well's cell line; panics when `well_num` is outside the grid
    pub fn set_cell_line(&mut self, well_num: usize, cell_line: Option<CellLineId>) {
        self.wells[well_num].cell_line = cell_line;
        self.unsaved_changes = true;
    }

    /// Assign a drug slot, growing the sequence with `None` fill; panics
    /// when `well_num` is outside the grid
    pub fn set_drug(&mut self, well_num: usize, slot: usize, drug: Option<DrugId>) {
        set_slot(&mut self.wells[well_num].drugs, slot, drug);
        self.unsaved_changes = true;
    }

    /// Empty a well's entire drug sequence
    pub fn clear_drugs(&mut self, well_num: usize) {
        self.wells[well_num].drugs.clear();
        self.unsaved_changes = true;
    }

    /// Assign a dose slot, growing the sequence with `None` fill; panics
    /// when `well_num` is outside the grid
    pub fn set_dose(&mut self, well_num: usize, slot: usize, dose: Option<f64>) {
        set_slot(&mut self.wells[well_num].doses, slot, dose);
        self.unsaved_changes = true;
    }

    /// Empty a well's entire dose sequence
    pub fn clear_doses(&mut self, well_num: usize) {
        self.wells[well_num].doses.clear();
        self.unsaved_changes = true;
    }

    /// Reset a well's cell line, drugs and doses; the server-computed dip
    /// rate stays in place
    pub fn clear_well(&mut self, well_num: usize) {
        let well = &mut self.wells[well_num];
        well.cell_line = None;
        well.drugs.clear();
        well.doses.clear();
        self.unsaved_changes = true;
    }

    /// Distinct non-empty values of one well field, in first-seen well order
    ///
    /// Distinctness is by `PartialEq`, so vector-valued fields compare
    /// element-wise rather than by identity.
    pub fn used_entries<T, F>(&self, field: F) -> Vec<T>
    where
        T: PartialEq,
        F: Fn(&Well) -> Option<T>,
    {
        let mut entries = Vec::new();
        for well in &self.wells {
            if let Some(value) = field(well) {
                if !entries.contains(&value) {
                    entries.push(value);
                }
            }
        }
        entries
    }

    pub fn used_cell_lines(&self) -> Vec<CellLineId> {
        self.used_entries(|well| well.cell_line)
    }

    /// Distinct drug-slot vectors in use, skipping empty and all-`None` ones
    pub fn used_drugs(&self) -> Vec<Vec<Option<DrugId>>> {
        self.used_entries(|well| well.has_drugs().then(|| well.drugs.clone()))
    }

    /// Distinct dose-slot vectors in use, skipping empty and all-`None` ones
    pub fn used_doses(&self) -> Vec<Vec<Option<f64>>> {
        self.used_entries(|well| well.has_doses().then(|| well.doses.clone()))
    }

    /// Largest drug/dose slot count of any well, sizing the slot inputs a
    /// collaborator UI should render
    pub fn max_drugs_doses_used(&self) -> usize {
        self.wells
            .iter()
            .map(|well| well.drugs.len().max(well.doses.len()))
            .max()
            .unwrap_or(0)
    }
}
