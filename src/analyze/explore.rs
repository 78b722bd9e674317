//! Depth-bounded recursive exploration producing report lines.

use std::path::Path;

use super::format::{format_kb, is_large};
use super::options::AnalyzeOptions;
use super::probe::UsageProbe;
use super::scan::scan_children;

const INDENT: &str = "  ";
const TEE: &str = "├── ";
const CORNER: &str = "└── ";

/// One rendered line of the analysis report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ReportLine {
    /// Size formatted per [`format_kb`].
    pub size: String,
    /// Tree-drawing prefix encoding depth and last-sibling status. Empty for
    /// top-level entries.
    pub prefix: String,
    /// The entry's path.
    pub path: String,
    /// Gigabyte-range entries are highlighted when rendered.
    pub large: bool,
}

impl ReportLine {
    /// Top-level line: bare size and path, no prefix.
    pub fn top_level(size_kb: u64, path: &Path) -> Self {
        Self {
            size: format_kb(size_kb),
            prefix: String::new(),
            path: path.display().to_string(),
            large: is_large(size_kb),
        }
    }

    fn nested(size_kb: u64, path: &Path, depth: usize, is_last: bool) -> Self {
        let glyph = if is_last { CORNER } else { TEE };
        Self {
            size: format_kb(size_kb),
            prefix: format!("{}{}", INDENT.repeat(depth - 1), glyph),
            path: path.display().to_string(),
            large: is_large(size_kb),
        }
    }
}

/// Explore `dir` at `depth` (1-based below the scan root), appending one line
/// per eligible child and recursing while the depth budget allows.
///
/// With the default maximum depth of 3 the recursion guard is
/// `depth < max_depth - 1`, so children are listed at depths 1 and 2 and the
/// report never reaches past three levels below the root. A directory with no
/// eligible children terminates naturally.
pub fn explore(probe: &dyn UsageProbe, dir: &Path, depth: usize, options: &AnalyzeOptions) -> Vec<ReportLine> {
    let children = scan_children(probe, dir, &options.excludes, options.threshold_kb);

    let mut lines = Vec::new();
    let last = children.len().saturating_sub(1);
    for (i, child) in children.iter().enumerate() {
        lines.push(ReportLine::nested(child.size_kb, &child.path, depth, i == last));
        if depth < options.max_depth - 1 {
            lines.extend(explore(probe, &child.path, depth + 1, options));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::super::probe::SizeEntry;

    /// In-memory probe: maps a directory to its `du -k -d 1` style listing.
    struct MapProbe(HashMap<PathBuf, Vec<SizeEntry>>);

    impl MapProbe {
        fn new(listings: &[(&str, &[(u64, &str)])]) -> Self {
            let mut map = HashMap::new();
            for (dir, entries) in listings {
                map.insert(
                    PathBuf::from(dir),
                    entries
                        .iter()
                        .map(|(kb, p)| SizeEntry::new(*kb, *p))
                        .collect(),
                );
            }
            Self(map)
        }
    }

    impl UsageProbe for MapProbe {
        fn usage(&self, dir: &Path, _excludes: &[PathBuf]) -> Result<Vec<SizeEntry>> {
            Ok(self.0.get(dir).cloned().unwrap_or_default())
        }
    }

    fn deep_probe() -> MapProbe {
        MapProbe::new(&[
            ("/a", &[(4000, "/a"), (3000, "/a/b")]),
            ("/a/b", &[(3000, "/a/b"), (2000, "/a/b/c")]),
            ("/a/b/c", &[(2000, "/a/b/c"), (1000, "/a/b/c/d")]),
            ("/a/b/c/d", &[(1000, "/a/b/c/d"), (900, "/a/b/c/d/e")]),
        ])
    }

    #[test]
    fn test_explore_respects_depth_bound() {
        let probe = deep_probe();
        let options = AnalyzeOptions::new().with_threshold_kb(0).with_max_depth(3);

        let lines = explore(&probe, Path::new("/a"), 1, &options);
        let paths: Vec<&str> = lines.iter().map(|l| l.path.as_str()).collect();

        // depth 1 lists /a/b, depth 2 lists /a/b/c, and the guard stops there
        assert_eq!(paths, vec!["/a/b", "/a/b/c"]);
    }

    #[test]
    fn test_explore_prefix_encodes_depth() {
        let probe = deep_probe();
        let options = AnalyzeOptions::new().with_threshold_kb(0).with_max_depth(3);

        let lines = explore(&probe, Path::new("/a"), 1, &options);

        assert_eq!(lines[0].prefix, "└── ");
        assert_eq!(lines[1].prefix, "  └── ");
    }

    #[test]
    fn test_explore_marks_last_sibling_with_corner() {
        let probe = MapProbe::new(&[(
            "/r",
            &[(300, "/r/x"), (200, "/r/y"), (100, "/r/z")],
        )]);
        let options = AnalyzeOptions::new().with_threshold_kb(0).with_max_depth(2);

        let lines = explore(&probe, Path::new("/r"), 1, &options);

        assert_eq!(lines[0].prefix, "├── ");
        assert_eq!(lines[1].prefix, "├── ");
        assert_eq!(lines[2].prefix, "└── ");
    }

    #[test]
    fn test_explore_empty_directory_is_base_case() {
        let probe = MapProbe::new(&[]);
        let options = AnalyzeOptions::new().with_threshold_kb(0);

        let lines = explore(&probe, Path::new("/empty"), 1, &options);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_explore_sub_reports_follow_parent_line() {
        let probe = MapProbe::new(&[
            ("/r", &[(500, "/r/big"), (400, "/r/other")]),
            ("/r/big", &[(300, "/r/big/inner")]),
            ("/r/other", &[]),
        ]);
        let options = AnalyzeOptions::new().with_threshold_kb(0).with_max_depth(3);

        let lines = explore(&probe, Path::new("/r"), 1, &options);
        let paths: Vec<&str> = lines.iter().map(|l| l.path.as_str()).collect();

        assert_eq!(paths, vec!["/r/big", "/r/big/inner", "/r/other"]);
    }

    #[test]
    fn test_top_level_line_has_no_prefix() {
        let line = ReportLine::top_level(2_000_000, Path::new("/usr"));
        assert_eq!(line.prefix, "");
        assert_eq!(line.size, "1.9G");
        assert!(line.large);
    }
}
