//! wsl-reclaim - Reclaim disk space from WSL2 distribution disk images
//!
//! This crate provides functionality for:
//! - Enumerating registered WSL distributions
//! - Analyzing guest disk usage with a parallel, threshold-filtered scan
//! - Trimming the guest filesystem and compacting the backing vhdx image

pub mod analyze;
pub mod cli;
pub mod commands;
pub mod compact;
pub mod config;
pub mod distro;
pub mod error;
pub mod prompt;
pub mod trim;

// Re-export commonly used types
pub use config::Config;
pub use error::{ReclaimError, Result};
