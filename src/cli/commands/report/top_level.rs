//! Top-Level Systems - one indented BOM table per part nothing consumes

use tracing::warn;

use crate::cli::helpers::{display_description, display_mfg_pn, part_link};
use crate::core::bom::Bom;
use crate::core::error::BomError;
use crate::core::graph::PartId;

/// Quantity columns in the tree table; edges deeper than this have no
/// quantity column
const TREE_COLUMNS: usize = 6;

const TABLE_HEADER: &str = "|| **Qty** || || || || || || **Part Number** || **Manufacturer** \
                            || **Mfg. Part Number** || **Description** ||\n";

pub(super) fn render(bom: &Bom, output: &mut String) -> Result<(), BomError> {
    output.push_str("# Top-Level Systems\n");

    for id in bom.graph.top_level() {
        let part = bom.graph.part(id);
        output.push_str(&format!("### {}\n", part.display_name()));
        output.push_str(&format!("**Description**: {}\n\n", display_description(part)));
        output.push_str(TABLE_HEADER);
        dump_tree(bom, id, 0, output)?;
    }

    Ok(())
}

fn dump_tree(bom: &Bom, id: PartId, level: usize, output: &mut String) -> Result<(), BomError> {
    if level >= TREE_COLUMNS && !bom.graph.dependencies(id).is_empty() {
        warn!(
            part = %bom.graph.part(id).part_number,
            level,
            "assembly nested deeper than the quantity columns; quantities omitted"
        );
    }

    for edge in bom.graph.dependencies(id) {
        let child = bom.graph.part(edge.target);
        let mut row = String::new();

        for column in 0..TREE_COLUMNS {
            if column == level {
                row.push_str(&format!("|| {} ", edge.quantity));
            } else {
                row.push_str("|| ");
            }
        }

        row.push_str(&format!(
            "|| {} || {} || {} || {} ||\n",
            part_link(child),
            bom.manufacturer_of(child)?.name,
            display_mfg_pn(child),
            display_description(child)
        ));
        output.push_str(&row);

        dump_tree(bom, edge.target, level + 1, output)?;
    }

    Ok(())
}
