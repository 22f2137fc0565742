//! Manufacturer table - display records keyed by manufacturer identifier

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Manufacturer identifier assumed for parts that do not name one
pub const DEFAULT_MANUFACTURER: &str = "joyent";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    /// Display name used in reports
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[cfg(test)]
impl Manufacturer {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }
}

/// Manufacturers in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManufacturerTable {
    entries: IndexMap<String, Manufacturer>,
}

impl ManufacturerTable {
    pub fn get(&self, id: &str) -> Option<&Manufacturer> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Iterate `(identifier, manufacturer)` pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Manufacturer)> {
        self.entries.iter().map(|(id, m)| (id.as_str(), m))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Manufacturer)> for ManufacturerTable {
    fn from_iter<I: IntoIterator<Item = (String, Manufacturer)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
