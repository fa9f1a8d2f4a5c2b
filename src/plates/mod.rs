pub mod coordinates;
pub mod models;
pub mod selection;
pub mod templates;
pub mod validation;

pub use models::{CellLineId, DrugId, PlateId, PlateMap, PlateMapData, Well};
pub use selection::StepDirection;
pub use templates::TemplateView;
