// Service module exports

pub mod database;
pub mod flight;
pub mod schedule;
pub mod settings;
