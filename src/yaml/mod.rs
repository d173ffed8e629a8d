//! YAML round-tripping of project drafts for editor-based editing

pub mod diagnostics;

pub use diagnostics::{YamlError, DraftSyntaxError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Parse a YAML document, reporting errors against the source text
pub fn parse_yaml_str<T: DeserializeOwned>(
    source: &str,
    filename: &str,
) -> Result<T, DraftSyntaxError> {
    serde_yml::from_str(source)
        .map_err(|e| DraftSyntaxError::from_serde_error(&e, source, filename))
}

/// Read and parse a YAML (or JSON, which is valid YAML) file
pub fn parse_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<T, YamlError> {
    let source = std::fs::read_to_string(path).map_err(|source| YamlError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_yaml_str(&source, &path.display().to_string())?)
}

/// Serialize a value as YAML
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, serde_yml::Error> {
    serde_yml::to_string(value)
}
