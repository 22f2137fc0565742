//! Core module - part model, catalogue loading and dependency resolution

pub mod bom;
pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
pub mod manufacturer;
pub mod part;
pub mod project;

pub use bom::Bom;
pub use catalog::Catalog;
pub use config::{Config, ConfigError};
pub use error::BomError;
pub use graph::{BomGraph, Edge, PartId};
pub use manufacturer::{Manufacturer, ManufacturerTable};
pub use part::Part;
pub use project::{Project, ProjectError};
