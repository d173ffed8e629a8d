//! Table formatting for CLI list commands
//!
//! Commands describe their columns once and build one [`TableRow`] per
//! record; [`TableFormatter`] renders them as an aligned terminal table,
//! a markdown table or a bare id list. JSON, YAML and CSV go through serde
//! and the CSV exporter instead.

use chrono::{DateTime, Utc};
use console::style;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_short_id_str, truncate_str};
use crate::cli::OutputFormat;
use crate::core::entity::Priority;

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Record id (cyan, shortened)
    Id(String),
    /// Plain text, truncated to the column width
    Text(String),
    /// Free-form status string; a few well-known values are colored
    Status(String),
    Priority(Priority),
    /// Date only
    Date(DateTime<Utc>),
    Number(i64),
    /// Float with precision
    Float(f64, usize),
    /// Percentage with one decimal
    Percent(f64),
    /// Highlighted in red when true
    Flag(bool),
    Empty,
}

impl CellValue {
    /// Text cell, or empty for `None`/blank
    pub fn text(value: Option<&str>) -> Self {
        match value {
            Some(s) if !s.trim().is_empty() => CellValue::Text(s.to_string()),
            _ => CellValue::Empty,
        }
    }

    /// Date cell, or empty for `None`
    pub fn date(value: Option<DateTime<Utc>>) -> Self {
        value.map(CellValue::Date).unwrap_or(CellValue::Empty)
    }

    /// Plain value with no styling
    pub fn raw(&self) -> String {
        match self {
            CellValue::Id(s) | CellValue::Text(s) | CellValue::Status(s) => s.clone(),
            CellValue::Priority(p) => p.to_string(),
            CellValue::Date(dt) => dt.format("%Y-%m-%d").to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Float(f, precision) => format!("{:.prec$}", f, prec = precision),
            CellValue::Percent(p) => format!("{:.1}%", p),
            CellValue::Flag(b) => if *b { "yes" } else { "no" }.to_string(),
            CellValue::Empty => "-".to_string(),
        }
    }

    /// Format for the aligned terminal table
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Id(id) => {
                format!("{:<width$}", style(format_short_id_str(id)).cyan(), width = width)
            }
            CellValue::Text(s) => {
                format!("{:<width$}", truncate_str(s, width.saturating_sub(2)), width = width)
            }
            CellValue::Status(s) => {
                let styled = match s.to_lowercase().as_str() {
                    "active" | "completed" | "closed" | "mitigated" => style(s.as_str()).green(),
                    "maintenance" | "on hold" | "blocked" | "monitoring" => {
                        style(s.as_str()).yellow()
                    }
                    "inactive" | "cancelled" => style(s.as_str()).dim(),
                    "open" => style(s.as_str()).red(),
                    _ => style(s.as_str()),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Priority(priority) => {
                let s = priority.to_string();
                let styled = match priority {
                    Priority::Low => style(s).dim(),
                    Priority::Medium => style(s),
                    Priority::High => style(s).yellow(),
                    Priority::Critical => style(s).red().bold(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Flag(true) => {
                format!("{:<width$}", style("yes").red().bold(), width = width)
            }
            CellValue::Number(_) | CellValue::Float(..) | CellValue::Percent(_) => {
                format!("{:>width$}", self.raw(), width = width)
            }
            CellValue::Empty => format!("{:<width$}", style("-").dim(), width = width),
            _ => format!("{:<width$}", self.raw(), width = width),
        }
    }

    /// Format for markdown (escaped pipes)
    pub fn format_md(&self) -> String {
        self.raw().replace('|', "\\|")
    }
}

/// Column definition with header label and width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(header: &'static str, width: usize) -> Self {
        Self { header, width }
    }
}

/// A row of cell values, one per column
pub struct TableRow {
    pub id: String,
    pub cells: Vec<CellValue>,
}

impl TableRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, value: CellValue) -> Self {
        self.cells.push(value);
        self
    }
}

/// Renders rows for a given entity kind
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    entity_name: &'static str,
    show_summary: bool,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], entity_name: &'static str) -> Self {
        Self {
            columns,
            entity_name,
            show_summary: true,
        }
    }

    /// Drop the trailing "N item(s)" line
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.show_summary = !quiet;
        self
    }

    /// Render rows; `format` must be tsv, md or id
    pub fn render(&self, rows: &[TableRow], format: OutputFormat) -> String {
        match format {
            OutputFormat::Md => self.render_md(rows),
            OutputFormat::Id => rows.iter().map(|r| format!("{}\n", r.id)).collect(),
            _ => self.render_tsv(rows),
        }
    }

    fn render_tsv(&self, rows: &[TableRow]) -> String {
        let mut out = String::new();
        let header: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{:<width$}", style(c.header).bold(), width = c.width))
            .collect();
        out.push_str(header.join(" ").trim_end());
        out.push('\n');
        let total: usize = self.columns.iter().map(|c| c.width + 1).sum();
        out.push_str(&"-".repeat(total.saturating_sub(1)));
        out.push('\n');

        for row in rows {
            let line: Vec<String> = self
                .columns
                .iter()
                .zip(&row.cells)
                .map(|(col, cell)| cell.format_tsv(col.width))
                .collect();
            out.push_str(line.join(" ").trim_end());
            out.push('\n');
        }

        if self.show_summary {
            out.push('\n');
            out.push_str(&format!(
                "{} {}(s) found.\n",
                style(rows.len()).cyan(),
                self.entity_name
            ));
        }
        out
    }

    fn render_md(&self, rows: &[TableRow]) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.columns.iter().map(|c| c.header.to_string()));
        for row in rows {
            builder.push_record(row.cells.iter().map(CellValue::format_md));
        }
        format!("{}\n", builder.build().with(Style::markdown()))
    }
}
