//! Catalogue loading
//!
//! Reads the manufacturer table and every `*.json` part document under the
//! configured part directories. Any unreadable, malformed or duplicate
//! document aborts the load.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::core::catalog::Catalog;
use crate::core::error::BomError;
use crate::core::manufacturer::ManufacturerTable;
use crate::core::part::Part;
use crate::json::{parse_json_str, JsonSyntaxError};

/// Keys accepted as the part number property
const PART_NUMBER_KEYS: [&str; 2] = ["pn", "partNumber"];

fn read_source(path: &Path) -> Result<String, BomError> {
    fs::read_to_string(path).map_err(|source| BomError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the manufacturer table from a single JSON document
pub fn load_manufacturers(path: &Path) -> Result<ManufacturerTable, BomError> {
    let source = read_source(path)?;
    let table: ManufacturerTable = parse_json_str(&source, &path.display().to_string())?;
    debug!(path = %path.display(), count = table.len(), "loaded manufacturer table");
    Ok(table)
}

/// Load a single part document; its file stem becomes the part id
pub fn load_part(path: &Path) -> Result<Part, BomError> {
    let source = read_source(path)?;
    let filename = path.display().to_string();
    let value: serde_json::Value = parse_json_str(&source, &filename)?;

    let has_part_number = value
        .as_object()
        .is_some_and(|obj| PART_NUMBER_KEYS.iter().any(|k| obj.contains_key(*k)));
    if !has_part_number {
        return Err(BomError::MissingField {
            path: path.to_path_buf(),
            field: PART_NUMBER_KEYS[0],
        });
    }

    let mut part: Part = serde_json::from_value(value)
        .map_err(|e| JsonSyntaxError::from_serde_error(&e, &source, &filename))?;
    part.id = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(part)
}

/// List the part documents under `dir`, in file-name order
pub fn part_files(dir: &Path) -> Result<Vec<PathBuf>, BomError> {
    if !dir.is_dir() {
        return Err(BomError::Io {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            BomError::Io {
                path,
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop")),
            }
        })?;

        if entry.file_type().is_file() && entry.path().extension().is_some_and(|e| e == "json") {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Load every part document from the given directories into a catalog
pub fn load_parts(dirs: &[PathBuf]) -> Result<Catalog, BomError> {
    let mut catalog = Catalog::new();

    for dir in dirs {
        let files = part_files(dir)?;
        debug!(dir = %dir.display(), files = files.len(), "scanning part directory");

        for path in files {
            let part = load_part(&path)?;
            debug!(part = %part.part_number, path = %path.display(), "loaded part");
            catalog.insert(part, path)?;
        }
    }

    info!(parts = catalog.len(), directories = dirs.len(), "catalogue loaded");
    Ok(catalog)
}
