// src/config/mod.rs

//! Configuration loading and validation for workpool.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate pool limits and parse durations (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{
    parse_duration, ConfigFile, DisplaySection, DisplaySettings, PoolSection, PoolSettings,
    RawConfigFile, SchedulerSection, SchedulerSettings, DEFAULT_MAX_WORKERS,
};
