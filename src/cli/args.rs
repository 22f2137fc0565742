//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    check::CheckArgs, completions::CompletionsArgs, init::InitArgs, report::ReportArgs,
    tree::TreeArgs, where_used::WhereUsedArgs,
};

#[derive(Parser)]
#[command(name = "mkbom")]
#[command(author, version, about = "Bill-of-materials report generator")]
#[command(long_about = "Resolves a catalogue of JSON part documents into a dependency graph and renders a cross-referenced bill-of-materials report.")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run (default: report)
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct GlobalOpts {
    /// Project root (default: auto-detect by finding mkbom.yaml or manufacturers.json)
    #[arg(long, global = true, env = "MKBOM_ROOT")]
    pub root: Option<PathBuf>,

    /// Manufacturer table (overrides config)
    #[arg(long, global = true)]
    pub manufacturers: Option<PathBuf>,

    /// Part document directory; repeat for several (overrides config)
    #[arg(long = "dir", short = 'd', global = true)]
    pub dirs: Vec<PathBuf>,

    /// Manufacturer assumed for parts without one (overrides config)
    #[arg(long, global = true)]
    pub default_mfg: Option<String>,

    /// Only log errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create mkbom.yaml, a manufacturer table and a parts directory
    Init(InitArgs),

    /// Generate the full bill-of-materials report
    Report(ReportArgs),

    /// Load and validate the catalogue without writing a report
    Check(CheckArgs),

    /// Show the indented bill of materials of one part
    Tree(TreeArgs),

    /// Find the assemblies that consume a part
    WhereUsed(WhereUsedArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Wiki markup with `||` tables and HTML anchors
    #[default]
    Wiki,
    /// Resolved graph as JSON
    Json,
}
