//! Project discovery and structure

use std::path::{Path, PathBuf};
use miette::Diagnostic;
use thiserror::Error;

/// Project configuration file, relative to the project root
pub const CONFIG_FILE: &str = "mkbom.yaml";

/// Default manufacturer table, relative to the project root
pub const MANUFACTURERS_FILE: &str = "manufacturers.json";

/// Default part directory, relative to the project root
pub const PARTS_DIR: &str = "parts";

/// A directory holding a manufacturer table and part documents
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Find project root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current = std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find project root by walking up from the given directory, stopping at
    /// the first directory with a config file or a manufacturer table
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            if Self::is_root(&current) {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Use an explicit root directory without searching
    pub fn at(root: &Path) -> Result<Self, ProjectError> {
        if !root.is_dir() {
            return Err(ProjectError::NotADirectory(root.to_path_buf()));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn is_root(dir: &Path) -> bool {
        dir.join(CONFIG_FILE).is_file() || dir.join(MANUFACTURERS_FILE).is_file()
    }

    /// Create a new project skeleton at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if root.join(CONFIG_FILE).exists() {
            return Err(ProjectError::AlreadyExists(root));
        }

        Self::write_skeleton(&root)?;
        Ok(Self { root })
    }

    /// Write the skeleton even if a project already exists; existing part
    /// documents are left alone
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self::write_skeleton(&root)?;
        Ok(Self { root })
    }

    fn write_skeleton(root: &Path) -> Result<(), ProjectError> {
        std::fs::create_dir_all(root.join(PARTS_DIR))
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        std::fs::write(root.join(CONFIG_FILE), Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        let manufacturers = root.join(MANUFACTURERS_FILE);
        if !manufacturers.exists() {
            std::fs::write(&manufacturers, Self::default_manufacturers())
                .map_err(|e| ProjectError::IoError(e.to_string()))?;
        }

        Ok(())
    }

    fn default_config() -> &'static str {
        r#"# mkbom project configuration

# Manufacturer table, relative to this file
# manufacturers: manufacturers.json

# Directories of part documents, relative to this file
directories:
  - parts

# Manufacturer assumed for parts without an `mfg` property
# default_manufacturer: joyent

# Report format (wiki, json)
# format: wiki
"#
    }

    fn default_manufacturers() -> &'static str {
        "{\n  \"joyent\": { \"name\": \"Joyent\" }\n}\n"
    }

    /// Get the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the project configuration file
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Resolve a configured path against the project root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Errors that can occur during project operations
#[derive(Debug, Error, Diagnostic)]
pub enum ProjectError {
    #[error("no mkbom project found (searched from {searched_from:?}). Run 'mkbom init' or pass --root.")]
    #[diagnostic(code(mkbom::project::not_found))]
    NotFound { searched_from: PathBuf },

    #[error("project root {0:?} is not a directory")]
    #[diagnostic(code(mkbom::project::not_a_directory))]
    NotADirectory(PathBuf),

    #[error("mkbom project already exists at {0:?}")]
    #[diagnostic(code(mkbom::project::already_exists))]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    #[diagnostic(code(mkbom::project::io))]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_project_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        assert!(project.config_path().is_file());
        assert!(project.root().join(MANUFACTURERS_FILE).is_file());
        assert!(project.root().join(PARTS_DIR).is_dir());
    }

    #[test]
    fn test_project_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let err = Project::init(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::AlreadyExists(_)));
    }

    #[test]
    fn test_init_force_keeps_manufacturer_table() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();
        std::fs::write(tmp.path().join(MANUFACTURERS_FILE), "{}").unwrap();

        Project::init_force(tmp.path()).unwrap();
        let table = std::fs::read_to_string(tmp.path().join(MANUFACTURERS_FILE)).unwrap();
        assert_eq!(table, "{}");
    }

    #[test]
    fn test_project_discover_from_nested_dir() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join(MANUFACTURERS_FILE), "{}").unwrap();

        let subdir = tmp.path().join("parts/600");
        std::fs::create_dir_all(&subdir).unwrap();

        let project = Project::discover_from(&subdir).unwrap();
        assert_eq!(
            project.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_project_discover_fails_without_markers() {
        let tmp = tempdir().unwrap();
        let err = Project::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let tmp = tempdir().unwrap();
        let project = Project::at(tmp.path()).unwrap();
        assert_eq!(project.resolve(Path::new("parts")), tmp.path().join("parts"));
        assert_eq!(project.resolve(Path::new("/abs/parts")), PathBuf::from("/abs/parts"));
    }
}
