//! Shared display helpers for reports and listings

use crate::core::error::BomError;
use crate::core::part::{root_part_number, Part};

const NOT_APPLICABLE: &str = "N/A";

/// Anchor link to a part's catalogue entry, labelled with its full number
pub fn part_link(part: &Part) -> String {
    let full = part.full_part_number();
    format!("<a href=\"#{}\">{}</a>", full, full)
}

/// Anchor link to a part's catalogue entry, labelled with its root number
pub fn root_part_link(part: &Part) -> Result<String, BomError> {
    let full = part.full_part_number();
    let root = root_part_number(&full).ok_or_else(|| BomError::UnparseablePartNumber(full.clone()))?;
    Ok(format!("<a href=\"#{}\">{}</a>", full, root))
}

pub fn display_dash_roll(part: &Part) -> &str {
    part.dash_roll.as_deref().unwrap_or(NOT_APPLICABLE)
}

/// Revision is only meaningful for dash-rolled parts
pub fn display_revision(part: &Part) -> String {
    match (&part.dash_roll, part.revision) {
        (Some(_), Some(rev)) => rev.to_string(),
        _ => NOT_APPLICABLE.to_string(),
    }
}

pub fn display_mfg_pn(part: &Part) -> &str {
    part.manufacturer_pn.as_deref().unwrap_or(NOT_APPLICABLE)
}

pub fn display_description(part: &Part) -> &str {
    part.description.as_deref().unwrap_or(NOT_APPLICABLE)
}

/// Reference links, each followed by a space
pub fn display_references(part: &Part) -> String {
    match &part.references {
        None => NOT_APPLICABLE.to_string(),
        Some(refs) => refs
            .as_slice()
            .iter()
            .map(|r| format!("<a href=\"{}\">{}</a> ", r.uri, r.title))
            .collect(),
    }
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
