// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

/// Raised when a worker is added to a pool that is already at its cap.
///
/// This is the only domain-level failure; every other abnormal input
/// (removing from an all-busy pool, enqueueing zero tasks) is a no-op.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("max {max_workers} workers supported")]
pub struct CapacityError {
    pub max_workers: usize,
}

#[derive(Error, Debug)]
pub enum WorkpoolError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Capacity error: {0}")]
    Capacity(#[from] CapacityError),

    #[error("pool runtime is not running")]
    RuntimeStopped,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WorkpoolError>;
