//! Core error types for cipherrank-core.
//!
//! The cycle clock, reveal gate and presentation transform are total and never
//! fail. Errors only arise at the edges: loading configuration, constructing
//! durations or leaderboards from untrusted input, and configuring the driver.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cipherrank-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Home/config directory could not be resolved or created
    #[error("Configuration directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A duration field exceeds its modulus
    #[error("{field} must be below {limit}, got {value}")]
    FieldOutOfRange {
        field: &'static str,
        value: u64,
        limit: u64,
    },

    /// Rank must be a positive integer
    #[error("Rank must be positive, got {0}")]
    InvalidRank(u32),

    /// Ranks must be unique and listed in ascending order
    #[error("Rank {rank} is out of order (previous rank {previous})")]
    RankOrder { previous: u32, rank: u32 },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
