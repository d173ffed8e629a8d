//! Shared helper functions for CLI commands
//!
//! Configuration resolution, record loading (from the backend or a local
//! JSON file) and the common list/export output paths used by every
//! entity command.

use miette::{IntoDiagnostic, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

use crate::cli::table::{ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::api::ApiClient;
use crate::core::entity::Record;
use crate::core::export::{export_csv, CsvRecord};
use crate::core::Config;

/// Format a string ID for display, truncating if too long
///
/// IDs longer than 16 characters are truncated to 13 chars with "..." suffix.
pub fn format_short_id_str(id: &str) -> String {
    if id.chars().count() > 16 {
        format!("{}...", id.chars().take(13).collect::<String>())
    } else {
        id.to_string()
    }
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Configuration with command-line overrides applied last
pub fn resolve_config(global: &GlobalOpts) -> Config {
    let mut config = Config::load();
    if let Some(ref url) = global.api_url {
        config.api_url = Some(url.clone());
    }
    config
}

/// The output format after applying the configured default to `auto`
pub fn effective_format(
    global: &GlobalOpts,
    config: &Config,
    fallback: OutputFormat,
) -> OutputFormat {
    let configured = config
        .default_format
        .as_deref()
        .and_then(|f| f.parse::<OutputFormat>().ok())
        .unwrap_or(OutputFormat::Auto);
    global.format.or(configured).or(fallback)
}

/// Build a backend client from resolved configuration
pub fn api_client(config: &Config) -> Result<ApiClient> {
    ApiClient::from_config(config).map_err(|e| miette::miette!("{}", e))
}

/// Load every record of a collection, from `input` if given, else from the backend
pub fn load_records<T: Record>(config: &Config, input: Option<&Path>) -> Result<Vec<T>> {
    match input {
        Some(path) => read_records(path),
        None => {
            let client = api_client(config)?;
            client.list::<T>().map_err(|e| {
                miette::miette!("Failed to load {}s: {}", T::LABEL, e)
            })
        }
    }
}

/// Read a JSON array of records from a file; a `{ "data": [...] }` envelope is accepted
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))?;
    let mut doc: Value = serde_json::from_str(&text)
        .map_err(|e| miette::miette!("{} is not valid JSON: {}", path.display(), e))?;
    if let Some(data) = doc.get_mut("data") {
        doc = data.take();
    }
    serde_json::from_value(doc)
        .map_err(|e| miette::miette!("Unexpected record shape in {}: {}", path.display(), e))
}

/// Print a list of records in the requested format
///
/// `auto` renders the aligned table; `to_row` builds table rows.
pub fn print_records<T, F>(
    records: &[T],
    global: &GlobalOpts,
    config: &Config,
    columns: &[ColumnDef],
    to_row: F,
) -> Result<()>
where
    T: Record + CsvRecord,
    F: Fn(&T) -> TableRow,
{
    match effective_format(global, config, OutputFormat::Tsv) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(records).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            export_csv(std::io::stdout().lock(), records).into_diagnostic()?;
        }
        format => {
            if records.is_empty() && format != OutputFormat::Id {
                if !global.quiet {
                    println!("No {}s found.", T::LABEL);
                }
                return Ok(());
            }
            let rows: Vec<TableRow> = records.iter().map(to_row).collect();
            print!(
                "{}",
                TableFormatter::new(columns, T::LABEL)
                    .quiet(global.quiet)
                    .render(&rows, format)
            );
        }
    }
    Ok(())
}

/// Write records as CSV to `output`, or stdout when absent
pub fn write_csv<T: CsvRecord>(records: &[T], output: Option<&Path>, quiet: bool) -> Result<()> {
    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .map_err(|e| miette::miette!("Failed to create {}: {}", path.display(), e))?;
            export_csv(file, records).into_diagnostic()?;
            if !quiet {
                eprintln!(
                    "{} Exported {} record(s) to {}",
                    console::style("✓").green(),
                    records.len(),
                    console::style(path.display()).cyan()
                );
            }
        }
        None => export_csv(std::io::stdout().lock(), records).into_diagnostic()?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Location;
    use std::io::Write;

    #[test]
    fn test_format_short_id_str() {
        assert_eq!(format_short_id_str("SHORT"), "SHORT");
        assert_eq!(
            format_short_id_str("65f1c0ffee0123456789abcd"),
            "65f1c0ffee012..."
        );
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("Montañas del sur", 10), "Montaña...");
    }

    #[test]
    fn test_read_records_accepts_envelope() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"data": [{{"_id": "l1", "name": "Depot"}}]}}"#).unwrap();
        let locations: Vec<Location> = read_records(file.path()).unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "Depot");
    }

    #[test]
    fn test_read_records_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(read_records::<Location>(file.path()).is_err());
    }

    #[test]
    fn test_effective_format() {
        let global = GlobalOpts {
            format: OutputFormat::Auto,
            quiet: false,
            verbose: false,
            api_url: None,
        };
        let mut config = Config::default();
        assert_eq!(
            effective_format(&global, &config, OutputFormat::Tsv),
            OutputFormat::Tsv
        );

        config.default_format = Some("json".to_string());
        assert_eq!(
            effective_format(&global, &config, OutputFormat::Tsv),
            OutputFormat::Json
        );

        let explicit = GlobalOpts {
            format: OutputFormat::Md,
            ..global
        };
        assert_eq!(
            effective_format(&explicit, &config, OutputFormat::Tsv),
            OutputFormat::Md
        );
    }
}
