//! Catalog - loaded parts keyed by part number

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::core::error::BomError;
use crate::core::part::Part;

/// Parts keyed by part number, iterated in sorted part-number order
#[derive(Debug, Default)]
pub struct Catalog {
    parts: BTreeMap<String, Part>,
    sources: HashMap<String, PathBuf>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from in-memory parts, using each part's id as its source
    #[cfg(test)]
    pub(crate) fn from_parts(parts: impl IntoIterator<Item = Part>) -> Result<Self, BomError> {
        let mut catalog = Self::new();
        for part in parts {
            let source = PathBuf::from(format!("{}.json", part.id));
            catalog.insert(part, source)?;
        }
        Ok(catalog)
    }

    /// Add a part, rejecting a part number that is already present
    pub fn insert(&mut self, part: Part, source: PathBuf) -> Result<(), BomError> {
        if let Some(first) = self.sources.get(&part.part_number) {
            return Err(BomError::DuplicatePart {
                part_number: part.part_number,
                path: source,
                first: first.clone(),
            });
        }

        self.sources.insert(part.part_number.clone(), source);
        self.parts.insert(part.part_number.clone(), part);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Consume the catalog, yielding parts in sorted part-number order
    pub fn into_parts(self) -> Vec<Part> {
        self.parts.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_part_rejected() {
        let mut catalog = Catalog::new();
        catalog
            .insert(Part::new("A-100"), PathBuf::from("parts/a.json"))
            .unwrap();

        let err = catalog
            .insert(Part::new("A-100"), PathBuf::from("parts/a-copy.json"))
            .unwrap_err();

        match err {
            BomError::DuplicatePart {
                part_number,
                path,
                first,
            } => {
                assert_eq!(part_number, "A-100");
                assert_eq!(path, PathBuf::from("parts/a-copy.json"));
                assert_eq!(first, PathBuf::from("parts/a.json"));
            }
            other => panic!("expected DuplicatePart, got {:?}", other),
        }
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_iteration_is_sorted() {
        let catalog =
            Catalog::from_parts([Part::new("C-300"), Part::new("A-100"), Part::new("B-200")])
                .unwrap();

        let pns: Vec<_> = catalog.into_parts().into_iter().map(|p| p.part_number).collect();
        assert_eq!(pns, ["A-100", "B-200", "C-300"]);
    }
}
