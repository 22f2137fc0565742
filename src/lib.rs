//! mkbom: bill-of-materials report generator
//!
//! Loads a catalogue of JSON part documents, resolves the constituent
//! references between them into an acyclic dependency graph, and renders a
//! cross-referenced report from it.

pub mod cli;
pub mod core;
pub mod json;
