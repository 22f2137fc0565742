//! Dependents on Each Part - reverse dependency listing, transitively

use crate::cli::helpers::{part_link, root_part_link};
use crate::core::bom::Bom;
use crate::core::error::BomError;
use crate::core::graph::PartId;

pub(super) fn render(bom: &Bom, output: &mut String) -> Result<(), BomError> {
    output.push_str("# Dependents on Each Part\n");

    for id in bom.graph.ids() {
        output.push_str(&format!(
            "### Dependents on {}\n",
            part_link(bom.graph.part(id))
        ));
        dump_dependents(bom, id, output)?;
        output.push('\n');
    }

    Ok(())
}

/// Depth-first: each dependent followed by its own dependents. A part
/// reached along several paths is listed once per path.
fn dump_dependents(bom: &Bom, id: PartId, output: &mut String) -> Result<(), BomError> {
    for &dependent in bom.graph.dependents(id) {
        output.push_str(&format!("* {}\n", root_part_link(bom.graph.part(dependent))?));
        dump_dependents(bom, dependent, output)?;
    }
    Ok(())
}
