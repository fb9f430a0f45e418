//! Scan options and config file loading.

use crate::ScanError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the user config directory.
pub const CONFIG_FILE_NAME: &str = "buildtags.yaml";

/// Options controlling discovery and extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// File extensions (without the dot) that qualify a file for scanning
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Number of bytes read from the start of each file
    #[serde(default = "default_prefix_size")]
    pub prefix_size: usize,

    /// Whether to follow symlinks while walking
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Honor .gitignore / .ignore files while walking
    #[serde(default)]
    pub respect_gitignore: bool,

    /// Worker threads for extraction (1 = sequential)
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

fn default_extensions() -> Vec<String> {
    vec!["go".to_string()]
}

fn default_prefix_size() -> usize {
    512
}

fn default_jobs() -> usize {
    1
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            prefix_size: default_prefix_size(),
            follow_symlinks: false,
            respect_gitignore: false,
            jobs: default_jobs(),
        }
    }
}

impl ScanOptions {
    /// Load options from the user config directory, falling back to defaults
    pub fn load() -> Self {
        let Some(config_path) = default_config_path() else {
            return Self::default();
        };

        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(options) => return options,
                Err(e) => {
                    tracing::warn!("Failed to load config file: {}", e);
                }
            }
        }

        Self::default()
    }

    /// Load options from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ScanError> {
        let content = std::fs::read_to_string(path).map_err(|e| ScanError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| ScanError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Whether a file name carries one of the allowed extensions
    pub fn matches_extension(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| {
            file_name.len() > ext.len()
                && file_name.ends_with(ext.as_str())
                && file_name.as_bytes()[file_name.len() - ext.len() - 1] == b'.'
        })
    }

    /// Worker count, never below one
    pub fn effective_jobs(&self) -> usize {
        self.jobs.max(1)
    }
}

/// `<config dir>/buildtags/buildtags.yaml`, if a config dir exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("buildtags").join(CONFIG_FILE_NAME))
}
