// Module exports for models

pub mod lecture;
pub mod schedule;
pub mod settings;
pub mod table;
pub mod time_grid;
