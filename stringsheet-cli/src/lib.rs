//! CLI library for testing purposes

pub mod config;
pub mod debug;
pub mod generate;
pub mod sheet_input;
pub mod to_sheet;

pub use config::Config;
