//! Filesystem trim before compaction.
//!
//! Trimming marks unused blocks as free inside the guest filesystem so the
//! subsequent compaction can actually drop them from the backing image.

use std::process::Command;

use crate::error::{ReclaimError, Result};

/// Run `fstrim` on the root filesystem of a distribution.
///
/// Failure here is not fatal to the overall flow; the caller logs a warning
/// and proceeds to compaction.
pub fn run_trim(distro: &str) -> Result<()> {
    tracing::info!(distro, "trimming root filesystem");

    let status = Command::new("wsl.exe")
        .args(["-d", distro, "-u", "root", "--", "fstrim", "-v", "/"])
        .status()
        .map_err(|e| ReclaimError::ToolUnavailable {
            tool: "fstrim".to_string(),
            source: e,
        })?;

    if !status.success() {
        return Err(ReclaimError::ToolFailed {
            tool: "fstrim".to_string(),
            status: status.code().unwrap_or(-1),
        });
    }

    Ok(())
}
