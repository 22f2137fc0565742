//! `mkbom tree` command - Indented bill of materials for one part

use console::style;
use miette::Result;

use crate::cli::helpers::truncate_str;
use crate::cli::GlobalOpts;
use crate::core::bom::Bom;
use crate::core::graph::PartId;

use super::report::write_output;
use super::utils::{resolve_part_arg, Workspace};

#[derive(clap::Args, Debug)]
pub struct TreeArgs {
    /// Part number (or full PN-ROLL number) to expand
    pub part: String,

    /// Maximum depth to expand (default: unlimited)
    #[arg(long)]
    pub depth: Option<usize>,

    /// Multiply quantities down the tree to show totals per top-level unit
    #[arg(long)]
    pub rollup: bool,
}

pub fn run(args: TreeArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = Workspace::open(global)?;
    let bom = workspace.load_bom()?;
    let root = resolve_part_arg(&bom, &args.part)?;

    let part = bom.graph.part(root);
    let mut output = format!(
        "{}: {}\n",
        style(part.full_part_number()).cyan(),
        part.display_name()
    );
    render_tree(&bom, root, &args, &mut output);

    write_output(&output, None)
}

pub(crate) fn render_tree(bom: &Bom, root: PartId, args: &TreeArgs, output: &mut String) {
    print_items(bom, root, args, 0, 1, &mut Vec::new(), output);
}

fn print_items(
    bom: &Bom,
    id: PartId,
    args: &TreeArgs,
    depth: usize,
    multiplier: u32,
    last_flags: &mut Vec<bool>,
    output: &mut String,
) {
    if args.depth.is_some_and(|max| depth >= max) {
        return;
    }

    let edges = bom.graph.dependencies(id);
    for (i, edge) in edges.iter().enumerate() {
        let is_last = i == edges.len() - 1;
        let prefix: String = last_flags
            .iter()
            .map(|&last| if last { "   " } else { "│  " })
            .collect();
        let branch = if is_last { "└─ " } else { "├─ " };

        let child = bom.graph.part(edge.target);
        let quantity = if args.rollup {
            edge.quantity.saturating_mul(multiplier)
        } else {
            edge.quantity
        };

        output.push_str(&format!(
            "{}{}{}: {} (qty: {})\n",
            prefix,
            branch,
            child.full_part_number(),
            truncate_str(&child.display_name(), 40),
            quantity
        ));

        last_flags.push(is_last);
        print_items(bom, edge.target, args, depth + 1, quantity, last_flags, output);
        last_flags.pop();
    }
}
