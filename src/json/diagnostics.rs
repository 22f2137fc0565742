//! JSON error diagnostics with source spans

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// JSON syntax or shape error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("error in {filename}: {message}")]
#[diagnostic(code(mkbom::load::malformed_document))]
pub struct JsonSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    /// File the document was read from
    pub filename: String,

    /// The underlying error message
    pub message: String,
}

impl JsonSyntaxError {
    /// Create a syntax error from a serde_json error
    pub fn from_serde_error(err: &serde_json::Error, source: &str, filename: &str) -> Self {
        // serde_json reports line 0 for errors not tied to a position
        let (line, column) = if err.line() == 0 {
            (1, 1)
        } else {
            (err.line(), err.column().max(1))
        };

        let offset = line_col_to_offset(source, line, column);
        let message = err.to_string();
        let help = generate_help(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            filename: filename.to_string(),
            message,
        }
    }
}

/// Convert a 1-based line/column to a byte offset, clamped to the source
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut line_start = 0;

    for (current_line, text) in source.split_inclusive('\n').enumerate() {
        if current_line + 1 == line {
            let col_offset = text
                .char_indices()
                .nth(column.saturating_sub(1))
                .map(|(i, _)| i)
                .unwrap_or(text.len().saturating_sub(1));
            return line_start + col_offset;
        }
        line_start += text.len();
    }

    source.len().saturating_sub(1)
}

/// Generate helpful suggestions based on error message
fn generate_help(message: &str) -> Option<String> {
    let msg = message.to_lowercase();

    if msg.contains("trailing comma") {
        return Some("JSON does not allow a comma after the last item.".to_string());
    }

    if msg.contains("key must be a string") {
        return Some("Object keys must be quoted: \"pn\": \"600-0001\"".to_string());
    }

    if msg.contains("eof while parsing") {
        return Some("The document ends early - check for a missing '}' or ']'.".to_string());
    }

    if msg.contains("expected `,` or `}`") || msg.contains("expected `,` or `]`") {
        return Some("Add commas between members: { \"a\": 1, \"b\": 2 }".to_string());
    }

    if msg.contains("control character") {
        return Some("Escape newlines and tabs inside strings (\\n, \\t).".to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_to_offset() {
        let source = "line1\nline2\nline3";
        assert_eq!(line_col_to_offset(source, 1, 1), 0);
        assert_eq!(line_col_to_offset(source, 2, 1), 6);
        assert_eq!(line_col_to_offset(source, 3, 3), 14);
    }

    #[test]
    fn test_offset_clamped_past_end() {
        let source = "{}";
        assert_eq!(line_col_to_offset(source, 9, 9), 1);
    }

    #[test]
    fn test_error_names_file() {
        let source = "{ \"pn\": \"A-1\", }";
        let err = serde_json::from_str::<serde_json::Value>(source).unwrap_err();
        let diag = JsonSyntaxError::from_serde_error(&err, source, "parts/a.json");
        assert!(diag.to_string().starts_with("error in parts/a.json:"));
        assert!(diag.help.is_some());
    }

    #[test]
    fn test_help_generation() {
        assert!(generate_help("trailing comma at line 1 column 3").is_some());
        assert!(generate_help("EOF while parsing an object").is_some());
        assert!(generate_help("some random error").is_none());
    }
}
