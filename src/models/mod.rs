// Module exports for models

pub mod coach;
pub mod grid;
pub mod settings;
pub mod slot;
