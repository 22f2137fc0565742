//! Tabular Parts Listing - one row per part in part-number order

use crate::cli::helpers::{
    display_dash_roll, display_description, display_mfg_pn, display_references, display_revision,
    root_part_link,
};
use crate::core::bom::Bom;
use crate::core::error::BomError;

const TABLE_HEADER: &str = "|| **Part Number** || **Current Dashroll** || **Rev** || **Manufacturer** \
                            || **Mfg. Part Number** || **Reference** || **Description** ||\n";

pub(super) fn render(bom: &Bom, output: &mut String) -> Result<(), BomError> {
    output.push_str("# Tabular Parts Listing\n");
    output.push_str(TABLE_HEADER);

    for part in bom.graph.parts() {
        output.push_str(&format!(
            "|| {} || {} || {} || {} || {} || {} || {} ||\n",
            root_part_link(part)?,
            display_dash_roll(part),
            display_revision(part),
            bom.manufacturer_of(part)?.name,
            display_mfg_pn(part),
            display_references(part),
            display_description(part)
        ));
    }

    Ok(())
}
