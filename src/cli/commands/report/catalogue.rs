//! Individual Parts Catalogue - one anchored entry per part

use crate::cli::helpers::{
    display_dash_roll, display_description, display_mfg_pn, display_references, display_revision,
    part_link, root_part_link,
};
use crate::core::bom::Bom;
use crate::core::error::BomError;

pub(super) fn render(bom: &Bom, output: &mut String) -> Result<(), BomError> {
    output.push_str("# Individual Parts Catalogue\n");

    for id in bom.graph.ids() {
        let part = bom.graph.part(id);

        output.push_str(&format!("### {}\n", part.full_part_number()));
        output.push_str(&format!("* **Part Number**: {}\n", root_part_link(part)?));
        output.push_str(&format!("* **Dashroll**: {}\n", display_dash_roll(part)));
        output.push_str(&format!("* **Revision**: {}\n", display_revision(part)));
        output.push_str(&format!("* **Manufacturer**: {}\n", bom.manufacturer_of(part)?.name));
        output.push_str(&format!("* **Manufacturer Part Number**: {}\n", display_mfg_pn(part)));
        output.push_str(&format!("* **Description**: {}\n", display_description(part)));
        if part.references.is_some() {
            output.push_str(&format!("* **Reference**: {}\n", display_references(part)));
        }
        if let Some(alias) = &part.alias {
            output.push_str(&format!("* **Short Description**: {}\n", alias));
        }

        let edges = bom.graph.dependencies(id);
        if !edges.is_empty() {
            output.push_str("* **First-Level Contents**:\n");
            for edge in edges {
                output.push_str(&format!(
                    "\t* qty {} {}\n",
                    edge.quantity,
                    part_link(bom.graph.part(edge.target))
                ));
            }
        }

        output.push('\n');
    }

    Ok(())
}
