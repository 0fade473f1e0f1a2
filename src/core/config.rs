//! User configuration
//!
//! Read from `config.yaml` in the platform config directory (for example
//! `~/.config/planarity/config.yaml`) or from an explicit path. Every key is
//! optional; command-line flags override what the file sets.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::ConfigError;
use crate::core::workflow::FitOptions;

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE: &str = "config.yaml";

/// Default number of decimals in the text report
pub const DEFAULT_PRECISION: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub remove_z_offset: bool,
    pub use_reference_plane: bool,
    pub show_diff_plane: bool,
    pub show_ref_plane: bool,

    /// Reference point file used when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<PathBuf>,

    /// Per-axis scale factors
    pub scale: [f64; 3],

    /// Decimals shown in the text report
    pub precision: usize,

    /// Render the terminal plot after the report
    pub plot: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remove_z_offset: false,
            use_reference_plane: false,
            show_diff_plane: false,
            show_ref_plane: false,
            reference: None,
            scale: [1.0, 1.0, 1.0],
            precision: DEFAULT_PRECISION,
            plot: false,
        }
    }
}

impl Config {
    /// Path of the user configuration file, if a home directory is known
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "planarity").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Load configuration from a specific file
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content, path)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    fn from_yaml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        // An empty file deserializes as null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(content).map_err(|e| ConfigError::Yaml {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Fit options as configured, before command-line overrides
    pub fn fit_options(&self) -> FitOptions {
        FitOptions {
            remove_z_offset: self.remove_z_offset,
            use_reference_plane: self.use_reference_plane,
            show_diff_plane: self.show_diff_plane,
            show_ref_plane: self.show_ref_plane,
            scale: self.scale,
        }
    }
}
