use std::path::PathBuf;

/// Default minimum directory size, in KB (128 MB).
pub const DEFAULT_THRESHOLD_KB: u64 = 128 * 1024;

/// Maximum levels reported below the scan root.
pub const MAX_REPORT_DEPTH: usize = 3;

/// Paths never descended into during analysis. `/mnt` holds Windows drive
/// mounts; the rest are virtual filesystems with meaningless sizes.
pub const DEFAULT_EXCLUDES: &[&str] = &["/mnt", "/proc", "/sys", "/dev", "/run"];

/// Configuration options for the disk usage analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Minimum size in KB for a directory to appear in the report.
    pub threshold_kb: u64,

    /// Maximum report depth below the scan root.
    pub max_depth: usize,

    /// Paths excluded from measurement and reporting.
    pub excludes: Vec<PathBuf>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            threshold_kb: DEFAULT_THRESHOLD_KB,
            max_depth: MAX_REPORT_DEPTH,
            excludes: DEFAULT_EXCLUDES.iter().map(PathBuf::from).collect(),
        }
    }
}

impl AnalyzeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the threshold from a value in MB.
    pub fn with_threshold_mb(mut self, mb: u64) -> Self {
        self.threshold_kb = mb * 1024;
        self
    }

    /// Set the threshold directly in KB.
    pub fn with_threshold_kb(mut self, kb: u64) -> Self {
        self.threshold_kb = kb;
        self
    }

    /// Set the maximum report depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Replace the exclusion list.
    pub fn with_excludes(mut self, excludes: Vec<PathBuf>) -> Self {
        self.excludes = excludes;
        self
    }
}
