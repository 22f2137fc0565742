//! Resolved bill of materials - the validated input to every report

use std::path::{Path, PathBuf};

use crate::core::catalog::Catalog;
use crate::core::error::BomError;
use crate::core::graph::BomGraph;
use crate::core::loader;
use crate::core::manufacturer::{Manufacturer, ManufacturerTable};
use crate::core::part::{root_part_number, Part};

/// Manufacturer table plus the resolved, acyclic dependency graph
#[derive(Debug)]
pub struct Bom {
    pub manufacturers: ManufacturerTable,
    pub graph: BomGraph,
    default_manufacturer: String,
}

impl Bom {
    /// Run the whole pipeline: load, resolve, check cycles, then part numbers
    /// and manufacturers
    pub fn load(
        manufacturers: &Path,
        directories: &[PathBuf],
        default_manufacturer: &str,
    ) -> Result<Self, BomError> {
        let table = loader::load_manufacturers(manufacturers)?;
        let catalog = loader::load_parts(directories)?;
        Self::new(table, catalog, default_manufacturer)
    }

    pub fn new(
        manufacturers: ManufacturerTable,
        catalog: Catalog,
        default_manufacturer: &str,
    ) -> Result<Self, BomError> {
        let graph = BomGraph::build(catalog)?;

        for part in graph.parts() {
            let full = part.full_part_number();
            if root_part_number(&full).is_none() {
                return Err(BomError::UnparseablePartNumber(full));
            }

            let id = part.manufacturer_id(default_manufacturer);
            if !manufacturers.contains(id) {
                return Err(BomError::UnknownManufacturer {
                    part: part.part_number.clone(),
                    manufacturer: id.to_string(),
                });
            }
        }

        Ok(Self {
            manufacturers,
            graph,
            default_manufacturer: default_manufacturer.to_string(),
        })
    }

    /// Manufacturer identifier of a part, after applying the default
    pub fn manufacturer_id<'a>(&'a self, part: &'a Part) -> &'a str {
        part.manufacturer_id(&self.default_manufacturer)
    }

    pub fn manufacturer_of(&self, part: &Part) -> Result<&Manufacturer, BomError> {
        let id = self.manufacturer_id(part);
        self.manufacturers
            .get(id)
            .ok_or_else(|| BomError::UnknownManufacturer {
                part: part.part_number.clone(),
                manufacturer: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manufacturer::Manufacturer;

    fn table() -> ManufacturerTable {
        [
            ("joyent".to_string(), Manufacturer::new("Joyent")),
            ("intel".to_string(), Manufacturer::new("Intel")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_unknown_manufacturer_rejected() {
        let mut part = Part::new("A-100");
        part.manufacturer = Some("acme".to_string());
        let catalog = Catalog::from_parts([part]).unwrap();

        let err = Bom::new(table(), catalog, "joyent").unwrap_err();
        assert!(matches!(
            err,
            BomError::UnknownManufacturer { ref manufacturer, .. } if manufacturer == "acme"
        ));
    }

    #[test]
    fn test_default_manufacturer_applies() {
        let catalog = Catalog::from_parts([Part::new("A-100")]).unwrap();
        let bom = Bom::new(table(), catalog, "joyent").unwrap();

        let part = bom.graph.part(bom.graph.lookup("A-100").unwrap());
        assert_eq!(bom.manufacturer_of(part).unwrap().name, "Joyent");
        assert_eq!(bom.manufacturer_id(part), "joyent");
    }

    #[test]
    fn test_unparseable_part_number_rejected() {
        let catalog = Catalog::from_parts([Part::new("CHASSIS")]).unwrap();

        let err = Bom::new(table(), catalog, "joyent").unwrap_err();
        assert!(matches!(err, BomError::UnparseablePartNumber(ref pn) if pn == "CHASSIS"));
    }

    #[test]
    fn test_default_manufacturer_must_exist() {
        let catalog = Catalog::from_parts([Part::new("A-100")]).unwrap();
        assert!(Bom::new(table(), catalog, "nobody").is_err());
    }
}
