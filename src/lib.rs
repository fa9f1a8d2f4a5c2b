//! Plate map grid model for high-throughput screening experiments
//!
//! The core structure is [`PlateMap`]: a row-major grid of [`Well`]
//! records holding cell line, drug and dose assignments for one physical
//! plate, with coordinate math, selection movement, usage aggregation,
//! structural validation and transport serialization. Around it sit the
//! named and delimited file exports and a small HTTP client for the
//! persistence backend.

pub mod common;
pub mod export;
pub mod external;
pub mod plates;

pub use common::doses::{format_dose, parse_dose};
pub use common::errors::{PlateMapError, PlateResult};
pub use common::models::{CellLine, Drug, NameMappings};
pub use external::PlateApiClient;
pub use plates::{
    CellLineId, DrugId, PlateId, PlateMap, PlateMapData, StepDirection, TemplateView, Well,
};
