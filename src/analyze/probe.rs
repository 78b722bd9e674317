//! Disk usage measurement.
//!
//! The analysis never walks the filesystem itself; it asks a [`UsageProbe`]
//! for one level of per-directory usage in KB. The production probe shells
//! out to `du`, tests substitute an in-memory fake.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{ReclaimError, Result};

/// Disk usage of a single path, as reported by the probe.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SizeEntry {
    /// Usage in KB (`du -k` units).
    pub size_kb: u64,
    /// The measured path.
    pub path: PathBuf,
}

impl SizeEntry {
    pub fn new(size_kb: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            size_kb,
            path: path.into(),
        }
    }
}

/// Capability that measures a directory and its immediate children.
///
/// Implementations report the directory itself plus each immediate child, in
/// whatever order the underlying tool produces. Children the tool could not
/// read are simply absent from the result.
pub trait UsageProbe: Send + Sync {
    fn usage(&self, dir: &Path, excludes: &[PathBuf]) -> Result<Vec<SizeEntry>>;
}

/// Probe backed by `du -k -d 1`.
///
/// With a distribution name set, the command is run through WSL interop
/// (`wsl.exe -d <name> -u root -- du ...`) so another distribution's root can
/// be measured; otherwise `du` runs directly on the current filesystem.
#[derive(Debug, Clone, Default)]
pub struct DuProbe {
    distro: Option<String>,
}

impl DuProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_distro(name: impl Into<String>) -> Self {
        Self {
            distro: Some(name.into()),
        }
    }

    fn command(&self, dir: &Path, excludes: &[PathBuf]) -> Command {
        let mut cmd = match &self.distro {
            Some(name) => {
                let mut cmd = Command::new("wsl.exe");
                cmd.args(["-d", name, "-u", "root", "--", "du"]);
                cmd
            }
            None => Command::new("du"),
        };
        cmd.args(["-k", "-d", "1"]);
        for exclude in excludes {
            cmd.arg(format!("--exclude={}", exclude.display()));
        }
        cmd.arg(dir);
        cmd
    }
}

impl UsageProbe for DuProbe {
    fn usage(&self, dir: &Path, excludes: &[PathBuf]) -> Result<Vec<SizeEntry>> {
        let output = self
            .command(dir, excludes)
            .output()
            .map_err(|e| ReclaimError::ToolUnavailable {
                tool: "du".to_string(),
                source: e,
            })?;

        // du exits nonzero when it hits unreadable subtrees but still prints
        // everything it could measure; the partial output is what we want.
        if !output.status.success() {
            tracing::debug!(
                dir = %dir.display(),
                status = ?output.status.code(),
                "du reported errors, using partial output"
            );
        }

        Ok(parse_du_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse `du -k` output lines of the form `SIZE\tPATH`.
///
/// Malformed lines are skipped rather than treated as errors.
pub fn parse_du_output(output: &str) -> Vec<SizeEntry> {
    output
        .lines()
        .filter_map(|line| {
            let (size, path) = line.split_once('\t')?;
            let size_kb = size.trim().parse::<u64>().ok()?;
            if path.is_empty() {
                return None;
            }
            Some(SizeEntry::new(size_kb, path))
        })
        .collect()
}
