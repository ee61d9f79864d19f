// src/config/mod.rs

//! Configuration loading and validation for helper binary supervision.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, discover_config_path, load_and_validate, load_from_path};
pub use model::{BinariesConfig, ConfigFile, RawBinariesSection, RawConfigFile};
