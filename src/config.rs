use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analyze::{DEFAULT_EXCLUDES, MAX_REPORT_DEPTH, TOP_PACKAGES};
use crate::error::{ConfigError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analyze: AnalyzeConfig,
    pub packages: PackagesConfig,
    pub compact: CompactConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// Minimum directory size in MB to appear in the report
    pub threshold_mb: u64,
    /// Threshold in MB used for the root filesystem scan
    pub root_threshold_mb: u64,
    /// Maximum report depth below the scan root
    pub max_depth: usize,
    /// Paths excluded from analysis
    pub exclude_paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagesConfig {
    /// Number of packages shown in the size report
    pub top_n: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactConfig {
    /// Offer the fstrim step before compaction
    pub trim_first: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analyze: AnalyzeConfig::default(),
            packages: PackagesConfig::default(),
            compact: CompactConfig::default(),
        }
    }
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            threshold_mb: 128,
            root_threshold_mb: 255,
            max_depth: MAX_REPORT_DEPTH,
            exclude_paths: DEFAULT_EXCLUDES.iter().map(PathBuf::from).collect(),
        }
    }
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self { top_n: TOP_PACKAGES }
    }
}

impl Default for CompactConfig {
    fn default() -> Self {
        Self { trim_first: true }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicitly given path must exist; the default location
    /// (`~/.config/wsl-reclaim/config.toml`) falls back to defaults when no
    /// file is present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("wsl-reclaim").join("config.toml"))
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.analyze.threshold_mb == 0 || self.analyze.root_threshold_mb == 0 {
            return Err(ConfigError::Invalid(
                "analysis threshold must be positive".to_string(),
            ));
        }
        if self.analyze.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.analyze.threshold_mb, 128);
        assert_eq!(config.analyze.root_threshold_mb, 255);
        assert_eq!(config.packages.top_n, 16);
    }

    #[test]
    fn config_serializes_to_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[analyze]"));
        assert!(toml_str.contains("[packages]"));
    }

    #[test]
    fn load_explicit_missing_path_fails() {
        let result = Config::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[analyze]\nthreshold_mb = 64").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.analyze.threshold_mb, 64);
        // unspecified fields keep defaults
        assert_eq!(config.analyze.root_threshold_mb, 255);
    }

    #[test]
    fn load_rejects_zero_threshold() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[analyze]\nthreshold_mb = 0").unwrap();

        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn load_rejects_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not [valid toml").unwrap();

        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn default_excludes_cover_virtual_filesystems() {
        let config = AnalyzeConfig::default();
        for path in ["/mnt", "/proc", "/sys", "/dev", "/run"] {
            assert!(config.exclude_paths.contains(&PathBuf::from(path)));
        }
    }
}
