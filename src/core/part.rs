//! Part entity - catalogued components and assemblies

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Link to supporting documentation (datasheet, drawing, etc.)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub uri: String,
    pub title: String,
}

/// Reference links as written in a part document: one object or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum References {
    One(Reference),
    Many(Vec<Reference>),
}

impl References {
    pub fn as_slice(&self) -> &[Reference] {
        match self {
            References::One(r) => std::slice::from_ref(r),
            References::Many(refs) => refs,
        }
    }
}

/// A catalogued component or assembly
///
/// Field names on disk follow the historical document keys (`pn`,
/// `dashroll`, `rev`, `mfg`, `mfgpn`, `desc`, `ref`); the long forms are
/// accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// File stem of the document this part was loaded from
    #[serde(skip)]
    pub id: String,

    /// Part number, unique across the catalogue
    #[serde(rename = "pn", alias = "partNumber")]
    pub part_number: String,

    /// Current dash roll (revision family); absent for unrolled parts
    #[serde(
        rename = "dashroll",
        alias = "dashRoll",
        default,
        deserialize_with = "deserialize_dash_roll",
        skip_serializing_if = "Option::is_none"
    )]
    pub dash_roll: Option<String>,

    /// Revision level within the dash roll
    #[serde(
        rename = "rev",
        alias = "revision",
        default,
        deserialize_with = "deserialize_revision",
        skip_serializing_if = "Option::is_none"
    )]
    pub revision: Option<u32>,

    /// Raw bill of materials: reference string -> quantity, in document order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub constituents: IndexMap<String, u32>,

    /// Manufacturer identifier (key into the manufacturer table)
    #[serde(
        rename = "mfg",
        alias = "manufacturer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub manufacturer: Option<String>,

    /// Manufacturer's own part number
    #[serde(rename = "mfgpn", default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_pn: Option<String>,

    #[serde(
        rename = "desc",
        alias = "description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Short name used in headings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub references: Option<References>,
}

/// In-memory builders for fixtures
#[cfg(test)]
impl Part {
    pub(crate) fn new(part_number: impl Into<String>) -> Self {
        let part_number = part_number.into();
        Self {
            id: part_number.clone(),
            part_number,
            ..Default::default()
        }
    }

    pub(crate) fn rolled(mut self, dash_roll: impl Into<String>, revision: Option<u32>) -> Self {
        self.dash_roll = Some(dash_roll.into());
        self.revision = revision;
        self
    }

    pub(crate) fn with_constituent(mut self, reference: impl Into<String>, quantity: u32) -> Self {
        self.constituents.insert(reference.into(), quantity);
        self
    }
}

impl Part {
    /// Part number including the current dash roll (`PN-ROLL`), or the plain
    /// part number for unrolled parts
    pub fn full_part_number(&self) -> String {
        match &self.dash_roll {
            Some(roll) => format!("{}-{}", self.part_number, roll),
            None => self.part_number.clone(),
        }
    }

    /// Manufacturer identifier, falling back to the catalogue default
    pub fn manufacturer_id<'a>(&'a self, default: &'a str) -> &'a str {
        self.manufacturer.as_deref().unwrap_or(default)
    }

    /// `alias [description]` when aliased, otherwise the description
    pub fn display_name(&self) -> String {
        let desc = self.description.as_deref().unwrap_or("N/A");
        match &self.alias {
            Some(alias) => format!("{} [{}]", alias, desc),
            None => desc.to_string(),
        }
    }
}

/// Strip a dash roll from a full part number.
///
/// Two-component numbers are already root numbers; three-component numbers
/// lose their last component. Anything else cannot be parsed.
pub fn root_part_number(full: &str) -> Option<String> {
    let taxa: Vec<&str> = full.split('-').collect();
    match taxa.len() {
        2 => Some(full.to_string()),
        3 => Some(format!("{}-{}", taxa[0], taxa[1])),
        _ => None,
    }
}

/// JSON scalars tolerated for dash rolls and revisions
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Str(String),
}

fn deserialize_dash_roll<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|v| match v {
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Str(s) => s,
    }))
}

fn deserialize_revision<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Int(i)) => u32::try_from(i)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("revision out of range: {}", i))),
        Some(Scalar::Str(s)) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("revision is not a number: {:?}", s))),
        Some(Scalar::Float(f)) => Err(de::Error::custom(format!(
            "revision must be an integer, got {}",
            f
        ))),
    }
}
