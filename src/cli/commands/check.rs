//! `mkbom check` command - Validate the catalogue without rendering

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;

use super::utils::Workspace;

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Also list the top-level systems
    #[arg(long)]
    pub top_level: bool,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = Workspace::open(global)?;
    let bom = workspace.load_bom()?;
    let graph = &bom.graph;
    let top_level = graph.top_level();

    if !global.quiet {
        println!(
            "{} {} parts, {} constituent edges, {} top-level systems",
            style("✓").green(),
            style(graph.len()).cyan(),
            style(graph.edge_count()).cyan(),
            style(top_level.len()).cyan()
        );
    }

    if args.top_level {
        for id in top_level {
            let part = graph.part(id);
            println!("{}\t{}", part.full_part_number(), part.display_name());
        }
    }

    Ok(())
}
