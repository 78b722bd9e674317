//! Disk usage analysis: threshold-filtered, depth-bounded directory scanning
//! with parallel fan-out over top-level heavy directories.

mod aggregate;
mod explore;
mod format;
mod options;
mod packages;
mod probe;
mod scan;

pub use aggregate::analyze;
pub use explore::ReportLine;
pub use format::{format_kb, is_large};
pub use options::{AnalyzeOptions, DEFAULT_EXCLUDES, DEFAULT_THRESHOLD_KB, MAX_REPORT_DEPTH};
pub use packages::{
    detect_capability, print_report, report, DpkgQuery, PackageQuery, PackageReport, PackageSize,
    TOP_PACKAGES,
};
pub use probe::{DuProbe, SizeEntry, UsageProbe};
pub use scan::scan_children;

/// Render report lines for terminal output. Gigabyte-range entries are
/// emphasized with ANSI bold when `color` is set.
pub fn render_report(lines: &[ReportLine], color: bool) -> String {
    let mut out = String::new();
    for line in lines {
        let size = if line.large && color {
            format!("\x1b[1m{:>8}\x1b[0m", line.size)
        } else {
            format!("{:>8}", line.size)
        };
        out.push_str(&format!("{}  {}{}\n", size, line.prefix, line.path));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_render_report_plain() {
        let lines = vec![
            ReportLine::top_level(2_000_000, Path::new("/usr")),
            ReportLine::top_level(150_000, Path::new("/var")),
        ];

        let out = render_report(&lines, false);
        assert_eq!(out, "    1.9G  /usr\n    146M  /var\n");
    }

    #[test]
    fn test_render_report_highlights_large_entries() {
        let lines = vec![ReportLine::top_level(2_000_000, Path::new("/usr"))];

        let out = render_report(&lines, true);
        assert!(out.contains("\x1b[1m"));

        let plain = render_report(&lines, false);
        assert!(!plain.contains("\x1b["));
    }
}
