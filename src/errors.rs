// src/errors.rs

//! Crate-wide error types and helpers.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while supervising helper binaries.
///
/// Construction-time problems (`Config`) are fatal: the supervisor cannot be
/// used at all. The per-binary variants (`PayloadNotFound`, `BinaryNotFound`,
/// `Extraction`, `Launch`) are recoverable: startup skips the affected binary
/// and continues with the next one. Only `NoBinariesStarted` escapes the
/// startup loop as a whole.
#[derive(Error, Debug)]
pub enum BinherdError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("embedded payload has no entry for binary '{0}'")]
    PayloadNotFound(String),

    #[error("binary '{name}' not found at {path}")]
    BinaryNotFound { name: String, path: PathBuf },

    #[error("failed to extract binary '{name}': {source}")]
    Extraction {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch binary '{name}': {source}")]
    Launch {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start any of the {attempted} configured binaries")]
    NoBinariesStarted { attempted: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, BinherdError>;
