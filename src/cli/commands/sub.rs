//! `solarops sub` command - subcontractors

use clap::Subcommand;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{load_records, print_records, resolve_config, write_csv};
use crate::cli::table::{CellValue, ColumnDef, TableRow};
use crate::cli::GlobalOpts;
use crate::entities::Subcontractor;

#[derive(Subcommand, Debug)]
pub enum SubCommands {
    /// List subcontractors
    List(ListArgs),

    /// Export subcontractors as CSV
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show only active subcontractors
    #[arg(long)]
    pub active: bool,

    /// Filter by specialty (case-insensitive substring)
    #[arg(long)]
    pub specialty: Option<String>,

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
    ColumnDef::new("COMPANY", 26),
    ColumnDef::new("CONTACT", 20),
    ColumnDef::new("SPECIALTY", 16),
    ColumnDef::new("ACTIVE", 6),
];

pub fn run(cmd: SubCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        SubCommands::List(args) => run_list(args, global),
        SubCommands::Export(args) => run_export(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = resolve_config(global);
    let mut subs: Vec<Subcontractor> = load_records(&config, args.input.as_deref())?;

    if args.active {
        subs.retain(|s| s.is_active);
    }
    if let Some(ref specialty) = args.specialty {
        let needle = specialty.to_lowercase();
        subs.retain(|s| {
            s.specialty
                .as_deref()
                .is_some_and(|sp| sp.to_lowercase().contains(&needle))
        });
    }

    print_records(&subs, global, &config, COLUMNS, |s| {
        TableRow::new(&s.id)
            .cell(CellValue::Id(s.id.clone()))
            .cell(CellValue::Text(s.company_name.clone()))
            .cell(CellValue::text(s.contact_name.as_deref()))
            .cell(CellValue::text(s.specialty.as_deref()))
            .cell(CellValue::Text(if s.is_active { "yes" } else { "no" }.to_string()))
    })
}

fn run_export(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let config = resolve_config(global);
    let subs: Vec<Subcontractor> = load_records(&config, args.input.as_deref())?;
    write_csv(&subs, args.output.as_deref(), global.quiet)
}
