//! Single-level directory scanning.

use std::path::{Path, PathBuf};

use super::probe::{SizeEntry, UsageProbe};

/// Scan one directory and return its immediate children, largest first.
///
/// The directory's own total (which `du` reports alongside the children) is
/// removed, as are excluded paths and their descendants and anything below
/// `threshold_kb`. A probe failure is absorbed into an empty result; partial
/// results from the probe are used as-is, so an unreadable child is simply
/// missing rather than fatal.
pub fn scan_children(
    probe: &dyn UsageProbe,
    dir: &Path,
    excludes: &[PathBuf],
    threshold_kb: u64,
) -> Vec<SizeEntry> {
    let entries = match probe.usage(dir, excludes) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "usage probe failed, skipping");
            return Vec::new();
        }
    };

    let mut children: Vec<SizeEntry> = entries
        .into_iter()
        .filter(|entry| entry.path != dir)
        .filter(|entry| !entry.path.as_os_str().is_empty())
        .filter(|entry| !is_excluded(&entry.path, excludes))
        .filter(|entry| entry.size_kb >= threshold_kb)
        .collect();

    // Stable sort keeps probe order for equal sizes.
    children.sort_by(|a, b| b.size_kb.cmp(&a.size_kb));
    children
}

/// True when `path` is one of the excluded paths or nested under one.
fn is_excluded(path: &Path, excludes: &[PathBuf]) -> bool {
    excludes.iter().any(|ex| path.starts_with(ex))
}
