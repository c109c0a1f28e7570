// Library exports for the RidePro CLI
// This allows testing of internal modules

pub mod api;
pub mod commands;
pub mod config;
pub mod models;
pub mod session;
pub mod ui;
pub mod zones;
