pub mod dataset;
pub mod selection;
