//! WSL distribution discovery.
//!
//! Registered distributions live under the Lxss registry key of the current
//! Windows user. The key is read through `reg.exe` interop, so this works
//! from inside any running distribution.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{ReclaimError, Result};

const LXSS_KEY: &str = r"HKCU\Software\Microsoft\Windows\CurrentVersion\Lxss";

/// The backing file name of a WSL2 distribution's root filesystem.
pub const DISK_IMAGE_NAME: &str = "ext4.vhdx";

/// A registered WSL distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub name: String,
    /// Windows path of the distribution's storage directory.
    pub base_path: String,
}

impl Distribution {
    /// Windows path of the backing disk image.
    pub fn disk_image_path(&self) -> String {
        format!("{}\\{}", self.base_path.trim_end_matches('\\'), DISK_IMAGE_NAME)
    }
}

/// Enumerate registered distributions from the registry.
pub fn enumerate() -> Result<Vec<Distribution>> {
    let output = Command::new("reg.exe")
        .args(["query", LXSS_KEY, "/s"])
        .output()
        .map_err(|e| ReclaimError::ToolUnavailable {
            tool: "reg.exe".to_string(),
            source: e,
        })?;

    if !output.status.success() {
        return Err(ReclaimError::NoDistributions);
    }

    let distros = parse_reg_output(&String::from_utf8_lossy(&output.stdout));
    if distros.is_empty() {
        return Err(ReclaimError::NoDistributions);
    }

    tracing::debug!(count = distros.len(), "enumerated distributions");
    Ok(distros)
}

/// Parse `reg.exe query /s` output into distributions.
///
/// Each subkey block contributes one distribution once both its
/// `DistributionName` and `BasePath` values have been seen. Blocks missing
/// either value (e.g. the Lxss root key itself) are ignored.
pub fn parse_reg_output(output: &str) -> Vec<Distribution> {
    let mut distros = Vec::new();
    let mut name: Option<String> = None;
    let mut base_path: Option<String> = None;

    let mut flush = |name: &mut Option<String>, base_path: &mut Option<String>| {
        if let (Some(n), Some(p)) = (name.take(), base_path.take()) {
            distros.push(Distribution {
                name: n,
                base_path: p,
            });
        }
    };

    for line in output.lines() {
        if line.starts_with("HKEY_") {
            flush(&mut name, &mut base_path);
        } else if let Some(value) = reg_sz_value(line, "DistributionName") {
            name = Some(value);
        } else if let Some(value) = reg_sz_value(line, "BasePath") {
            // BasePath is sometimes stored in extended-length form
            base_path = Some(value.trim_start_matches(r"\\?\").to_string());
        }
    }
    flush(&mut name, &mut base_path);

    distros
}

/// Extract the data of a `REG_SZ` value line, e.g.
/// `    DistributionName    REG_SZ    Ubuntu`.
fn reg_sz_value(line: &str, value_name: &str) -> Option<String> {
    let trimmed = line.trim_start();
    let rest = trimmed.strip_prefix(value_name)?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix("REG_SZ")?;
    let data = rest.trim();
    (!data.is_empty()).then(|| data.to_string())
}

/// Name of the distribution this process is running in, if any.
pub fn current_distro() -> Option<String> {
    std::env::var("WSL_DISTRO_NAME").ok().filter(|s| !s.is_empty())
}

/// Resolve a Windows path to its mount point inside WSL via `wslpath`.
pub fn to_unix_path(windows_path: &str) -> Result<PathBuf> {
    let out = wslpath("-u", windows_path)?;
    Ok(PathBuf::from(out))
}

/// Resolve a WSL path to its Windows form via `wslpath`.
pub fn to_windows_path(unix_path: &std::path::Path) -> Result<String> {
    wslpath("-w", &unix_path.display().to_string())
}

fn wslpath(flag: &str, path: &str) -> Result<String> {
    let output = Command::new("wslpath")
        .args([flag, path])
        .output()
        .map_err(|e| ReclaimError::ToolUnavailable {
            tool: "wslpath".to_string(),
            source: e,
        })?;

    if !output.status.success() {
        return Err(ReclaimError::ToolFailed {
            tool: "wslpath".to_string(),
            status: output.status.code().unwrap_or(-1),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
