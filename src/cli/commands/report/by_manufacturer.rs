//! Parts by Manufacturer - grouped in manufacturer-table order

use crate::cli::helpers::part_link;
use crate::core::bom::Bom;

pub(super) fn render(bom: &Bom, output: &mut String) {
    output.push_str("# Parts by Manufacturer\n");

    for (mfg_id, manufacturer) in bom.manufacturers.iter() {
        output.push_str(&format!("### {}\n", manufacturer.name));

        for part in bom.graph.parts() {
            if bom.manufacturer_id(part) == mfg_id {
                output.push_str(&format!("* {}\n", part_link(part)));
            }
        }

        output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::sample_bom;
    use super::*;

    #[test]
    fn test_grouping_uses_default_manufacturer() {
        let mut output = String::new();
        render(&sample_bom(), &mut output);

        assert_eq!(
            output,
            "# Parts by Manufacturer\n\
             ### Joyent\n\
             * <a href=\"#270-0001\">270-0001</a>\n\
             * <a href=\"#600-0001-2\">600-0001-2</a>\n\
             * <a href=\"#600-0010-1\">600-0010-1</a>\n\
             \n\
             ### Intel\n\
             * <a href=\"#410-0002\">410-0002</a>\n\
             \n\
             ### Nidec\n\
             * <a href=\"#410-0003\">410-0003</a>\n\
             \n"
        );
    }
}
