//! Source-annotated diagnostics for hand-edited draft files

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A draft file that failed to parse, pointing at the offending spot
#[derive(Debug, Error, Diagnostic)]
#[error("Could not read draft: {message}")]
#[diagnostic(code(solarops::yaml::syntax))]
pub struct DraftSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl DraftSyntaxError {
    /// Build from a serde_yml error, which also covers type mismatches
    /// such as a non-numeric `progress`
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));
        let offset = offset_of(source, line, column);
        let message = err.to_string();

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1).min(source.len().max(1))),
            help: suggest(&message),
            message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors reading a draft from disk
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] DraftSyntaxError),

    #[error("Failed to read {path}: {source}")]
    #[diagnostic(code(solarops::yaml::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Byte offset of a 1-based line/column, clamped to the source
fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let mut start = 0;
    for (n, text) in source.split_inclusive('\n').enumerate() {
        if n + 1 == line {
            let within = text
                .char_indices()
                .nth(column.saturating_sub(1))
                .map(|(i, _)| i)
                .unwrap_or(text.len());
            return start + within;
        }
        start += text.len();
    }
    source.len()
}

fn suggest(message: &str) -> Option<String> {
    let msg = message.to_lowercase();

    if msg.contains("tab") {
        return Some("Indent with spaces, not tabs.".to_string());
    }
    if msg.contains("duplicate") {
        return Some("Each field may appear only once per record.".to_string());
    }
    if msg.contains("mapping values are not allowed") {
        return Some("Quote values that contain ':' or fix the indentation.".to_string());
    }
    if msg.contains("invalid type") {
        return Some(
            "Numeric fields (progress, capacity, probability, impact) must be plain numbers."
                .to_string(),
        );
    }
    if msg.contains("unknown variant") {
        return Some("Check the spelling of status, priority and severity values.".to_string());
    }

    None
}
