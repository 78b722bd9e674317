//! Disk image compaction through diskpart.
//!
//! Compaction is the one destructive, non-interruptible step: SIGINT is
//! ignored for its duration so a stray Ctrl-C cannot detach the vdisk midway.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

use indicatif::{ProgressBar, ProgressStyle};
use nix::sys::signal::{self, SigHandler, Signal};

use crate::error::{ReclaimError, Result};

/// Check whether the Windows side of the session is elevated.
///
/// diskpart refuses to attach a vdisk without administrator rights, so this
/// is verified up front instead of failing halfway through.
pub fn is_elevated() -> Result<bool> {
    let output = Command::new("powershell.exe")
        .args([
            "-NoProfile",
            "-Command",
            "([Security.Principal.WindowsPrincipal][Security.Principal.WindowsIdentity]::GetCurrent()).IsInRole([Security.Principal.WindowsBuiltInRole]::Administrator)",
        ])
        .output()
        .map_err(|e| ReclaimError::ToolUnavailable {
            tool: "powershell.exe".to_string(),
            source: e,
        })?;

    Ok(String::from_utf8_lossy(&output.stdout).trim().eq_ignore_ascii_case("true"))
}

/// Stop all running distributions so the disk image is no longer held open.
pub fn shutdown_wsl() -> Result<()> {
    tracing::info!("shutting down WSL");

    let status = Command::new("wsl.exe")
        .arg("--shutdown")
        .status()
        .map_err(|e| ReclaimError::ToolUnavailable {
            tool: "wsl.exe".to_string(),
            source: e,
        })?;

    if !status.success() {
        return Err(ReclaimError::ToolFailed {
            tool: "wsl.exe".to_string(),
            status: status.code().unwrap_or(-1),
        });
    }
    Ok(())
}

/// Ignores SIGINT while alive, restoring the previous disposition on drop.
pub struct SigintGuard {
    previous: SigHandler,
}

impl SigintGuard {
    pub fn install() -> Result<Self> {
        // Safety: replaces the process-wide SIGINT disposition; the previous
        // handler is restored when the guard drops.
        let previous = unsafe { signal::signal(Signal::SIGINT, SigHandler::SigIgn) }
            .map_err(|e| ReclaimError::Io {
                path: "SIGINT".into(),
                source: std::io::Error::other(e),
            })?;
        Ok(Self { previous })
    }
}

impl Drop for SigintGuard {
    fn drop(&mut self) {
        let _ = unsafe { signal::signal(Signal::SIGINT, self.previous) };
    }
}

/// Deduplicates diskpart progress output.
///
/// diskpart re-prints the same percent value many times; the last-seen value
/// is threaded through this fold explicitly so only changes are surfaced.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    last: Option<u8>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one output line; returns the percent value only when it changed.
    pub fn observe(&mut self, line: &str) -> Option<u8> {
        let percent = parse_percent(line)?;
        if self.last == Some(percent) {
            return None;
        }
        self.last = Some(percent);
        Some(percent)
    }
}

/// Extract the percent value from a diskpart progress line such as
/// `  76 percent completed`.
fn parse_percent(line: &str) -> Option<u8> {
    let mut tokens = line.split_whitespace();
    let value = tokens.next()?.parse::<u8>().ok()?;
    (tokens.next() == Some("percent")).then_some(value)
}

/// Compact the disk image at the given Windows path.
///
/// Drives `diskpart /s` with a generated script and renders its progress
/// output on a bar. SIGINT is suppressed for the whole operation.
pub fn compact(image_windows_path: &str) -> Result<()> {
    let script = diskpart_script(image_windows_path);
    let script_path = write_script(&script)?;
    let script_windows_path = crate::distro::to_windows_path(&script_path)?;

    tracing::info!(image = image_windows_path, "compacting disk image");

    let _guard = SigintGuard::install()?;

    let mut child = Command::new("diskpart.exe")
        .args(["/s", &script_windows_path])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ReclaimError::ToolUnavailable {
            tool: "diskpart.exe".to_string(),
            source: e,
        })?;

    let bar = progress_bar();
    let mut tracker = ProgressTracker::new();
    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).lines() {
            let Ok(line) = line else { break };
            if let Some(percent) = tracker.observe(&line) {
                bar.set_position(u64::from(percent));
            }
        }
    }

    let status = child.wait().map_err(|e| ReclaimError::Io {
        path: script_path.clone(),
        source: e,
    })?;
    bar.finish_and_clear();
    let _ = fs::remove_file(&script_path);

    if !status.success() {
        return Err(ReclaimError::ToolFailed {
            tool: "diskpart.exe".to_string(),
            status: status.code().unwrap_or(-1),
        });
    }
    Ok(())
}

fn diskpart_script(image_windows_path: &str) -> String {
    format!(
        "select vdisk file=\"{}\"\nattach vdisk readonly\ncompact vdisk\ndetach vdisk\nexit\n",
        image_windows_path
    )
}

fn write_script(script: &str) -> Result<std::path::PathBuf> {
    let path = std::env::temp_dir().join("wsl-reclaim-diskpart.txt");
    let mut file = fs::File::create(&path).map_err(|e| ReclaimError::Io {
        path: path.clone(),
        source: e,
    })?;
    file.write_all(script.as_bytes()).map_err(|e| ReclaimError::Io {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("Compacting {bar:40} {pos}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}
