//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};
use miette::Diagnostic;
use thiserror::Error;
use tracing::debug;

use crate::core::manufacturer::DEFAULT_MANUFACTURER;
use crate::core::project::{Project, MANUFACTURERS_FILE, PARTS_DIR};

/// mkbom configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Manufacturer table path
    pub manufacturers: Option<PathBuf>,

    /// Directories of part documents
    pub directories: Option<Vec<PathBuf>>,

    /// Manufacturer assumed for parts without one
    pub default_manufacturer: Option<String>,

    /// Default report format
    pub format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(project: &Project) -> Result<Self, ConfigError> {
        Self::load_from(Self::global_config_path().as_deref(), &project.config_path())
    }

    /// Load the global and project layers from explicit paths, then apply
    /// the environment
    pub fn load_from(global: Option<&Path>, project: &Path) -> Result<Self, ConfigError> {
        // 1. Built-in defaults (already in Default impl)
        let mut config = Config::default();

        // 2. Global user config (~/.config/mkbom/config.yaml)
        if let Some(global_path) = global {
            if global_path.is_file() {
                config.merge(Self::read(global_path)?);
            }
        }

        // 3. Project config (mkbom.yaml)
        if project.is_file() {
            config.merge(Self::read(project)?);
        }

        // 4. Environment variables
        if let Ok(path) = std::env::var("MKBOM_MANUFACTURERS") {
            config.manufacturers = Some(PathBuf::from(path));
        }
        if let Ok(mfg) = std::env::var("MKBOM_DEFAULT_MFG") {
            config.default_manufacturer = Some(mfg);
        }

        Ok(config)
    }

    fn read(path: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "reading config layer");

        // An empty or comment-only file is a valid, empty layer
        if contents.lines().all(|l| l.trim().is_empty() || l.trim_start().starts_with('#')) {
            return Ok(Config::default());
        }

        serde_yml::from_str(&contents).map_err(|e| ConfigError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mkbom")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.manufacturers.is_some() {
            self.manufacturers = other.manufacturers;
        }
        if other.directories.is_some() {
            self.directories = other.directories;
        }
        if other.default_manufacturer.is_some() {
            self.default_manufacturer = other.default_manufacturer;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
    }

    /// Manufacturer table location, resolved against the project root
    pub fn manufacturers_path(&self, project: &Project) -> PathBuf {
        let path = self
            .manufacturers
            .clone()
            .unwrap_or_else(|| PathBuf::from(MANUFACTURERS_FILE));
        project.resolve(&path)
    }

    /// Part directories, resolved against the project root
    pub fn part_directories(&self, project: &Project) -> Vec<PathBuf> {
        match &self.directories {
            Some(dirs) if !dirs.is_empty() => dirs.iter().map(|d| project.resolve(d)).collect(),
            _ => vec![project.resolve(Path::new(PARTS_DIR))],
        }
    }

    pub fn default_manufacturer(&self) -> &str {
        self.default_manufacturer
            .as_deref()
            .unwrap_or(DEFAULT_MANUFACTURER)
    }
}

/// A configuration layer that could not be read or parsed
#[derive(Debug, Error, Diagnostic)]
#[error("invalid configuration in {path:?}: {message}")]
#[diagnostic(code(mkbom::config::invalid))]
pub struct ConfigError {
    pub path: PathBuf,
    pub message: String,
}
