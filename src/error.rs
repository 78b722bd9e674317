use std::path::PathBuf;
use thiserror::Error;

/// Core library errors
#[derive(Error, Debug)]
pub enum ReclaimError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No WSL distributions registered on this host")]
    NoDistributions,

    #[error("No distribution named '{0}' is registered")]
    UnknownDistribution(String),

    #[error("Storage path for distribution '{name}' does not exist: {path}")]
    StoragePathMissing { name: String, path: PathBuf },

    #[error("Disk image not found: {0}")]
    DiskImageMissing(PathBuf),

    #[error("Administrator elevation is required to compact the disk image")]
    ElevationRequired,

    #[error("Failed to invoke '{tool}': {source}")]
    ToolUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{tool}' exited with status {status}")]
    ToolFailed { tool: String, status: i32 },
}

impl ReclaimError {
    /// True for errors that abort the flow before any work is attempted.
    pub fn is_fatal_precondition(&self) -> bool {
        matches!(
            self,
            Self::NoDistributions
                | Self::UnknownDistribution(_)
                | Self::StoragePathMissing { .. }
                | Self::DiskImageMissing(_)
                | Self::ElevationRequired
        )
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ReclaimError>;
