//! `mkbom report` command - Generate the bill-of-materials report
//!
//! The report is rendered completely in memory and written in one piece, so
//! a failure anywhere in the pipeline never leaves a partial report behind.

mod by_manufacturer;
mod catalogue;
mod dependents;
mod json;
mod listing;
mod top_level;

use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

use crate::cli::{GlobalOpts, ReportFormat};
use crate::core::bom::Bom;
use crate::core::error::BomError;

use super::utils::Workspace;

/// First line of every wiki report
pub const GENERATED_HEADER: &str =
    "<!-- DO NOT EDIT THIS FILE! It is automatically generated by mkbom-->\n\n";

#[derive(clap::Args, Debug, Default)]
pub struct ReportArgs {
    /// Report format (default: config `format`, else wiki)
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<ReportFormat>,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let workspace = Workspace::open(global)?;
    let bom = workspace.load_bom()?;

    let format = match args.format {
        Some(format) => format,
        None => workspace.configured_format()?.unwrap_or_default(),
    };

    let content = render(&bom, format)?;
    info!(?format, bytes = content.len(), "report rendered");
    write_output(&content, args.output)
}

/// Render the report for an already validated bill of materials
pub fn render(bom: &Bom, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Wiki => Ok(render_wiki(bom)?),
        ReportFormat::Json => json::render(bom),
    }
}

/// All five report sections, in their fixed order
pub fn render_wiki(bom: &Bom) -> Result<String, BomError> {
    let mut output = String::new();
    output.push_str(GENERATED_HEADER);

    top_level::render(bom, &mut output)?;
    listing::render(bom, &mut output)?;
    catalogue::render(bom, &mut output)?;
    dependents::render(bom, &mut output)?;
    by_manufacturer::render(bom, &mut output);

    Ok(output)
}

pub(crate) fn write_output(content: &str, output_path: Option<PathBuf>) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(&path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            eprintln!("Report written to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(content.as_bytes()).into_diagnostic()?;
            lock.flush().into_diagnostic()?;
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::fixtures::sample_bom;
    use super::*;

    #[test]
    fn test_sections_in_fixed_order() {
        let report = render_wiki(&sample_bom()).unwrap();
        assert!(report.starts_with(GENERATED_HEADER));

        let positions: Vec<usize> = [
            "# Top-Level Systems\n",
            "# Tabular Parts Listing\n",
            "# Individual Parts Catalogue\n",
            "# Dependents on Each Part\n",
            "# Parts by Manufacturer\n",
        ]
        .iter()
        .map(|h| report.find(h).unwrap())
        .collect();

        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_json_format_is_valid_json() {
        let report = render(&sample_bom(), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["top_level"][0], "270-0001");
    }
}
