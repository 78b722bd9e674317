//! Parallel fan-out over top-level directories with a deterministic merge.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use super::explore::{explore, ReportLine};
use super::options::AnalyzeOptions;
use super::probe::UsageProbe;
use super::scan::scan_children;

/// Analyze disk usage under `root` and return the full report.
///
/// The root is scanned once to find the top-level heavy directories, then one
/// thread per entry produces that branch's report independently. The
/// branching factor is already capped by the threshold filter, so plain
/// threads are used rather than a pool. Workers share nothing: each one sends
/// its finished line block tagged with a hash of its path, and the merge
/// replays the top-level descending-size order after all workers have joined,
/// so the report order never depends on completion order.
pub fn analyze(probe: &dyn UsageProbe, root: &Path, options: &AnalyzeOptions) -> Vec<ReportLine> {
    let top = scan_children(probe, root, &options.excludes, options.threshold_kb);
    if top.is_empty() {
        return Vec::new();
    }

    tracing::debug!(root = %root.display(), entries = top.len(), "fanning out scan workers");

    let (tx, rx) = mpsc::channel();
    thread::scope(|scope| {
        for entry in &top {
            let tx = tx.clone();
            scope.spawn(move || {
                let mut lines = vec![ReportLine::top_level(entry.size_kb, &entry.path)];
                lines.extend(explore(probe, &entry.path, 1, options));
                // Receiver outlives the scope; a send failure here would mean
                // the receiver was dropped, which cannot happen.
                let _ = tx.send((path_key(&entry.path), lines));
            });
        }
    });
    drop(tx);

    // The scope joined every worker, so the channel already holds all slots.
    let mut slots: HashMap<u64, Vec<ReportLine>> = rx.into_iter().collect();

    top.iter()
        .flat_map(|entry| slots.remove(&path_key(&entry.path)).unwrap_or_default())
        .collect()
}

/// Stable key for a worker's output slot. Raw paths can contain characters
/// unsafe as intermediate identifiers; a 64-bit hash of the path string is
/// collision-safe at this branching factor.
fn path_key(path: &Path) -> u64 {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    hasher.finish()
}
