pub mod chart;
pub mod holding;
pub mod monthly_data;
pub mod settings;
pub mod summary;
pub mod transaction;
