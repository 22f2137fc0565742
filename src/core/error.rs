//! Error taxonomy for loading, resolving and rendering a parts catalogue

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::json::JsonSyntaxError;

/// Every failure is fatal to the run; variants carry the part number and
/// reference string needed to fix the offending document.
#[derive(Debug, Error, Diagnostic)]
pub enum BomError {
    // Load-time
    #[error(transparent)]
    #[diagnostic(transparent)]
    MalformedDocument(#[from] JsonSyntaxError),

    #[error("{path} is missing required property {field}")]
    #[diagnostic(code(mkbom::load::missing_field))]
    MissingField { path: PathBuf, field: &'static str },

    #[error("{path} contains duplicate part {part_number} (first defined in {first})")]
    #[diagnostic(code(mkbom::load::duplicate_part))]
    DuplicatePart {
        part_number: String,
        path: PathBuf,
        first: PathBuf,
    },

    #[error("cannot read {path}: {source}")]
    #[diagnostic(code(mkbom::load::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Resolution-time
    #[error("part number {part} depends on nonexistent {reference}")]
    #[diagnostic(
        code(mkbom::resolve::unresolvable_reference),
        help("reference an existing part number, or a dash roll as ROOT-FAMILY-ROLL")
    )]
    UnresolvableReference { part: String, reference: String },

    #[error("part number {part} depends on bogus {reference}")]
    #[diagnostic(
        code(mkbom::resolve::malformed_reference),
        help("a dash-roll reference has exactly three dash-separated components")
    )]
    MalformedReference { part: String, reference: String },

    #[error("part number {part} depends on {reference} but no root part {root} exists")]
    #[diagnostic(code(mkbom::resolve::unresolvable_root))]
    UnresolvableRoot {
        part: String,
        reference: String,
        root: String,
    },

    #[error(
        "part number {part} depends on \"{reference}\" but {root} is at level {}",
        .current.as_deref().unwrap_or("none")
    )]
    #[diagnostic(code(mkbom::resolve::dash_roll_mismatch))]
    DashRollMismatch {
        part: String,
        reference: String,
        root: String,
        current: Option<String>,
    },

    #[error(
        "part number {part} is at rev {revision} but depends on {root} at rev {}",
        .root_revision.map_or_else(|| "none".to_string(), |r| r.to_string())
    )]
    #[diagnostic(
        code(mkbom::resolve::revision_incompatible),
        help("parts at rev 50 or later may only depend on constituents at rev 50 or later")
    )]
    RevisionIncompatible {
        part: String,
        revision: u32,
        root: String,
        root_revision: Option<u32>,
    },

    // Validation-time
    #[error("{part} circular dependency ({})", .path.join(" -> "))]
    #[diagnostic(code(mkbom::validate::circular_dependency))]
    CircularDependency { part: String, path: Vec<String> },

    // Render/query-time
    #[error("part number {part} uses unknown manufacturer {manufacturer}")]
    #[diagnostic(
        code(mkbom::render::unknown_manufacturer),
        help("add the identifier to the manufacturer table, or set the part's mfg")
    )]
    UnknownManufacturer { part: String, manufacturer: String },

    #[error("part number {0} cannot be parsed")]
    #[diagnostic(code(mkbom::render::unparseable_part_number))]
    UnparseablePartNumber(String),

    #[error("no such part: {0}")]
    #[diagnostic(code(mkbom::query::unknown_part))]
    UnknownPart(String),
}
