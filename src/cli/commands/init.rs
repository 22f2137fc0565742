//! `mkbom init` command - Create a project skeleton

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::project::{Project, ProjectError, MANUFACTURERS_FILE, PARTS_DIR};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Rewrite mkbom.yaml even if it already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
    }

    let project = if args.force {
        Project::init_force(&path)
    } else {
        Project::init(&path)
    };

    match project {
        Ok(project) => {
            println!(
                "{} Initialized mkbom project at {}",
                style("✓").green(),
                style(project.root().display()).cyan()
            );
            println!();
            println!("  {}  manufacturer table", style(MANUFACTURERS_FILE).bold());
            println!("  {}/  one JSON document per part", style(PARTS_DIR).bold());
            Ok(())
        }
        Err(ProjectError::AlreadyExists(root)) => {
            println!(
                "{} Project already exists at {} (use --force to rewrite mkbom.yaml)",
                style("!").yellow(),
                style(root.display()).cyan()
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
