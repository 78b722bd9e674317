//! Installed-package size report.
//!
//! The package database is a platform-conditional capability: a distribution
//! without dpkg simply gets a skipped report, never an error.

use std::process::Command;

use crate::error::{ReclaimError, Result};

/// Number of packages kept in the report.
pub const TOP_PACKAGES: usize = 16;

/// Installed size of one package.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PackageSize {
    pub name: String,
    /// Installed size in MB, rounded to two decimals.
    pub size_mb: f64,
}

/// Capability that lists installed packages with their sizes in KB.
pub trait PackageQuery {
    fn installed_sizes(&self) -> Result<Vec<(u64, String)>>;
}

/// Package query backed by `dpkg-query`.
#[derive(Debug, Clone, Default)]
pub struct DpkgQuery;

impl DpkgQuery {
    /// Detect whether the dpkg database is available on this system.
    pub fn detect() -> Option<Self> {
        let found = Command::new("dpkg-query")
            .arg("--version")
            .output()
            .is_ok_and(|out| out.status.success());
        found.then_some(Self)
    }
}

impl PackageQuery for DpkgQuery {
    fn installed_sizes(&self) -> Result<Vec<(u64, String)>> {
        let output = Command::new("dpkg-query")
            .args(["-W", "-f", "${Installed-Size}\\t${Package}\\n"])
            .output()
            .map_err(|e| ReclaimError::ToolUnavailable {
                tool: "dpkg-query".to_string(),
                source: e,
            })?;

        Ok(parse_dpkg_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse `dpkg-query -W` output lines of the form `SIZE\tNAME`.
/// Packages without a recorded size are skipped.
fn parse_dpkg_output(output: &str) -> Vec<(u64, String)> {
    output
        .lines()
        .filter_map(|line| {
            let (size, name) = line.split_once('\t')?;
            let size_kb = size.trim().parse::<u64>().ok()?;
            if name.is_empty() {
                return None;
            }
            Some((size_kb, name.to_string()))
        })
        .collect()
}

/// Result of the package size report.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum PackageReport {
    /// No package database capability on this system.
    Skipped,
    /// The largest packages, sorted ascending by size.
    Packages(Vec<PackageSize>),
}

impl PackageReport {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    pub fn packages(&self) -> &[PackageSize] {
        match self {
            Self::Skipped => &[],
            Self::Packages(p) => p,
        }
    }
}

/// Build the report from an optional capability.
///
/// Sizes are converted from KB to MB with two-decimal rounding, sorted
/// ascending, and the final `top_n` (the largest) are kept. A present but
/// failing capability degrades to an empty package list.
pub fn report(query: Option<&dyn PackageQuery>, top_n: usize) -> PackageReport {
    let Some(query) = query else {
        return PackageReport::Skipped;
    };

    let mut sizes = match query.installed_sizes() {
        Ok(sizes) => sizes,
        Err(e) => {
            tracing::warn!(error = %e, "package query failed");
            return PackageReport::Packages(Vec::new());
        }
    };

    sizes.sort_by_key(|(kb, _)| *kb);
    let start = sizes.len().saturating_sub(top_n);
    let packages = sizes[start..]
        .iter()
        .map(|(kb, name)| PackageSize {
            name: name.clone(),
            size_mb: kb_to_mb(*kb),
        })
        .collect();

    PackageReport::Packages(packages)
}

fn kb_to_mb(kb: u64) -> f64 {
    (kb as f64 / 1024.0 * 100.0).round() / 100.0
}

/// Print the report one `name, size` pair per line.
pub fn print_report(report: &PackageReport) {
    match report {
        PackageReport::Skipped => {
            println!("Package database not available on this system, skipping.");
        }
        PackageReport::Packages(packages) => {
            for pkg in packages {
                println!("{}, {:.2} MB", pkg.name, pkg.size_mb);
            }
        }
    }
}

/// Detected dpkg capability as a trait object, if present.
pub fn detect_capability() -> Option<Box<dyn PackageQuery>> {
    DpkgQuery::detect().map(|q| Box::new(q) as Box<dyn PackageQuery>)
}
