pub mod doses;
pub mod errors;
pub mod models;
