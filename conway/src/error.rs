// error.rs - Error types for the grid engine and its configuration

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`crate::GridEngine`] and [`crate::Grid`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifeError {
    #[error("invalid grid dimensions {width}x{height}: each side must be in 1..={max}")]
    InvalidDimensions { width: u32, height: u32, max: u32 },

    #[error("cell ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfBounds {
        row: i32,
        col: i32,
        width: u32,
        height: u32,
    },
}

pub type Result<T, E = LifeError> = std::result::Result<T, E>;

/// Errors raised while loading or applying a [`crate::LifeConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error(transparent)]
    Engine(#[from] LifeError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown edge policy `{0}` (expected `clamped` or `wrapped`)")]
pub struct ParseEdgePolicyError(pub String);
