//! `mkbom where-used` command - Find the assemblies that consume a part

use console::style;
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::bom::Bom;
use crate::core::graph::PartId;

use super::utils::{resolve_part_arg, Workspace};

#[derive(clap::Args, Debug)]
pub struct WhereUsedArgs {
    /// Part number (or full PN-ROLL number) to search for
    pub part: String,

    /// Show only direct references (not transitive)
    #[arg(long)]
    pub direct_only: bool,
}

/// One consuming part with the quantity it uses directly (if any)
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Usage {
    pub part: PartId,
    pub direct_quantity: Option<u32>,
}

pub fn run(args: WhereUsedArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = Workspace::open(global)?;
    let bom = workspace.load_bom()?;
    let target = resolve_part_arg(&bom, &args.part)?;

    println!(
        "{} {}",
        style("Searching for references to:").bold(),
        style(bom.graph.part(target).full_part_number()).cyan()
    );

    let usages = find_usages(&bom, target, args.direct_only);
    if usages.is_empty() {
        println!("{}", style("No references found (top-level system).").yellow());
        return Ok(());
    }

    println!();
    println!("{:<16} {:<10} {}", style("PART").bold(), style("QTY").bold(), style("DESCRIPTION").bold());
    println!("{}", "-".repeat(60));
    for usage in &usages {
        let part = bom.graph.part(usage.part);
        let qty = usage
            .direct_quantity
            .map_or_else(|| "(indirect)".to_string(), |q| q.to_string());
        println!(
            "{:<16} {:<10} {}",
            style(part.full_part_number()).cyan(),
            qty,
            part.display_name()
        );
    }
    println!();
    println!("{} reference(s) found.", style(usages.len()).cyan());

    Ok(())
}

pub(crate) fn find_usages(bom: &Bom, target: PartId, direct_only: bool) -> Vec<Usage> {
    let graph = &bom.graph;
    let consumers: Vec<PartId> = if direct_only {
        let mut direct = graph.dependents(target).to_vec();
        direct.dedup();
        direct
    } else {
        graph.transitive_dependents(target)
    };

    consumers
        .into_iter()
        .map(|part| {
            let direct: Vec<u32> = graph
                .dependencies(part)
                .iter()
                .filter(|e| e.target == target)
                .map(|e| e.quantity)
                .collect();
            Usage {
                part,
                direct_quantity: if direct.is_empty() {
                    None
                } else {
                    Some(direct.iter().sum())
                },
            }
        })
        .collect()
}
