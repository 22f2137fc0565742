//! Shared utilities for CLI commands

use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::{GlobalOpts, ReportFormat};
use crate::core::bom::Bom;
use crate::core::config::Config;
use crate::core::graph::PartId;
use crate::core::project::Project;

/// Project and effective configuration for one invocation
pub struct Workspace {
    pub project: Project,
    pub config: Config,
}

impl Workspace {
    /// Discover the project and merge config layers with command-line flags
    pub fn open(global: &GlobalOpts) -> Result<Self> {
        let project = match &global.root {
            Some(root) => Project::at(root),
            None => Project::discover(),
        }?;

        let mut config = Config::load(&project)?;
        config.merge(overrides(global)?);
        debug!(root = %project.root().display(), ?config, "effective configuration");

        Ok(Self { project, config })
    }

    /// Load, resolve and validate the catalogue
    pub fn load_bom(&self) -> Result<Bom> {
        let bom = Bom::load(
            &self.config.manufacturers_path(&self.project),
            &self.config.part_directories(&self.project),
            self.config.default_manufacturer(),
        )?;
        Ok(bom)
    }

    /// Report format from config, if one is set and valid
    pub fn configured_format(&self) -> Result<Option<ReportFormat>> {
        match &self.config.format {
            None => Ok(None),
            Some(name) => {
                use clap::ValueEnum;
                ReportFormat::from_str(name, true)
                    .map(Some)
                    .map_err(|_| miette::miette!("unknown report format in config: {}", name))
            }
        }
    }
}

/// Config layer built from command-line flags; relative paths are taken
/// from the working directory
fn overrides(global: &GlobalOpts) -> Result<Config> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    let absolute = |p: &Path| -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            cwd.join(p)
        }
    };

    Ok(Config {
        manufacturers: global.manufacturers.as_deref().map(absolute),
        directories: if global.dirs.is_empty() {
            None
        } else {
            Some(global.dirs.iter().map(|d| absolute(d)).collect())
        },
        default_manufacturer: global.default_mfg.clone(),
        format: None,
    })
}

/// Resolve a part number given on the command line
///
/// Accepts an exact part number or a full `PN-ROLL` number of a rolled part.
pub fn resolve_part_arg(bom: &Bom, arg: &str) -> Result<PartId> {
    if let Some(id) = bom.graph.lookup(arg) {
        return Ok(id);
    }

    bom.graph
        .ids()
        .find(|&id| bom.graph.part(id).full_part_number() == arg)
        .ok_or_else(|| crate::core::BomError::UnknownPart(arg.to_string()).into())
}
