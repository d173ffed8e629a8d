//! `solarops location` command - sites and the locations dashboard

use chrono::{DateTime, Utc};
use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::{
    api_client, effective_format, load_records, print_records, resolve_config, write_csv,
};
use crate::cli::table::{CellValue, ColumnDef, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::normalize::parse_date;
use crate::core::stats::LocationAggregateStats;
use crate::entities::{Location, LocationStatus};

#[derive(Subcommand, Debug)]
pub enum LocationCommands {
    /// List locations with filtering
    List(ListArgs),

    /// Show location counts and month-over-month trends
    Stats(StatsArgs),

    /// Export locations as CSV
    Export(ExportArgs),
}

/// Status filter
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusFilter {
    Active,
    Inactive,
    Maintenance,
    All,
}

impl StatusFilter {
    fn matches(self, status: LocationStatus) -> bool {
        match self {
            StatusFilter::Active => status == LocationStatus::Active,
            StatusFilter::Inactive => status == LocationStatus::Inactive,
            StatusFilter::Maintenance => status == LocationStatus::Maintenance,
            StatusFilter::All => true,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long, short = 's', default_value = "all")]
    pub status: StatusFilter,

    /// Filter by county (case-insensitive)
    #[arg(long)]
    pub county: Option<String>,

    /// Read records from a JSON file instead of the backend
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    /// Use the backend's pre-aggregated counts (trends show N/A)
    #[arg(long, conflicts_with = "input")]
    pub counts_only: bool,

    /// Compute trends as of this date instead of now (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub as_of: Option<String>,

    /// Read records from a JSON file instead of the backend
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Output file (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Read records from a JSON file instead of the backend
    #[arg(long)]
    pub input: Option<PathBuf>,
}

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("ID", 17),
    ColumnDef::new("NAME", 26),
    ColumnDef::new("TYPE", 10),
    ColumnDef::new("STATUS", 12),
    ColumnDef::new("CITY", 14),
    ColumnDef::new("COUNTY", 14),
    ColumnDef::new("CREATED", 10),
];

pub fn run(cmd: LocationCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        LocationCommands::List(args) => run_list(args, global),
        LocationCommands::Stats(args) => run_stats(args, global),
        LocationCommands::Export(args) => run_export(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = resolve_config(global);
    let mut locations: Vec<Location> = load_records(&config, args.input.as_deref())?;

    locations.retain(|l| args.status.matches(l.status));
    if let Some(ref county) = args.county {
        let county = county.trim();
        locations.retain(|l| {
            l.county
                .as_deref()
                .is_some_and(|c| c.trim().eq_ignore_ascii_case(county))
        });
    }

    print_records(&locations, global, &config, COLUMNS, |l| {
        TableRow::new(&l.id)
            .cell(CellValue::Id(l.id.clone()))
            .cell(CellValue::Text(l.name.clone()))
            .cell(CellValue::Text(l.site_type.to_string()))
            .cell(CellValue::Status(l.status.to_string()))
            .cell(CellValue::text(l.city.as_deref()))
            .cell(CellValue::text(l.county.as_deref()))
            .cell(CellValue::date(l.created_at))
    })
}

fn run_stats(args: StatsArgs, global: &GlobalOpts) -> Result<()> {
    let config = resolve_config(global);

    let stats = if args.counts_only {
        let client = api_client(&config)?;
        let counts = client
            .location_counts()
            .map_err(|e| miette::miette!("Failed to load location stats: {}", e))?;
        LocationAggregateStats::from_counts(counts)
    } else {
        let now = as_of(args.as_of.as_deref())?;
        let locations: Vec<Location> = load_records(&config, args.input.as_deref())?;
        LocationAggregateStats::from_locations(&locations, now)
    };

    match effective_format(global, &config, OutputFormat::Tsv) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&stats).into_diagnostic()?);
        }
        _ => print_dashboard(&stats),
    }
    Ok(())
}

fn as_of(value: Option<&str>) -> Result<DateTime<Utc>> {
    match value {
        None => Ok(Utc::now()),
        Some(s) => parse_date(s).ok_or_else(|| {
            miette::miette!(
                help = "Use YYYY-MM-DD or an RFC 3339 timestamp",
                "Invalid --as-of date '{}'",
                s
            )
        }),
    }
}

fn print_dashboard(stats: &LocationAggregateStats) {
    let c = &stats.counts;
    println!("{}", style("Locations").bold());
    println!("{}", style("─".repeat(48)).dim());
    dashboard_line("Total", c.total, Some(stats.total_trend.as_str()));
    dashboard_line("Active", c.active, Some(stats.active_trend.as_str()));
    dashboard_line("Inactive", c.inactive, None);
    dashboard_line("Maintenance", c.maintenance, Some(stats.maintenance_trend.as_str()));
    dashboard_line("Outdoor", c.outdoor, Some(stats.outdoor_trend.as_str()));
    dashboard_line("Indoor", c.indoor, None);
    dashboard_line("Counties", c.counties, None);
}

fn dashboard_line(label: &str, value: usize, trend: Option<&str>) {
    match trend {
        Some(t) => println!(
            "{:<14} {:>6}   {}",
            style(label).bold(),
            style(value).cyan(),
            trend_style(t)
        ),
        None => println!("{:<14} {:>6}", style(label).bold(), style(value).cyan()),
    }
}

fn trend_style(trend: &str) -> console::StyledObject<&str> {
    if trend.starts_with('-') {
        style(trend).red()
    } else if trend.starts_with("0%") || trend.starts_with("0.0%") || trend == "N/A" {
        style(trend).dim()
    } else {
        style(trend).green()
    }
}

fn run_export(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let config = resolve_config(global);
    let locations: Vec<Location> = load_records(&config, args.input.as_deref())?;
    write_csv(&locations, args.output.as_deref(), global.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_matches_only_all() {
        assert!(StatusFilter::All.matches(LocationStatus::Other));
        for filter in [StatusFilter::Active, StatusFilter::Inactive, StatusFilter::Maintenance] {
            assert!(!filter.matches(LocationStatus::Other));
        }
        assert!(StatusFilter::Maintenance.matches(LocationStatus::Maintenance));
    }
}
