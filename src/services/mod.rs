// Service module exports

pub mod coach;
pub mod database;
pub mod settings;
pub mod slot;
pub mod store;
pub mod worker;
