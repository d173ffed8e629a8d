//! `solarops order` command - service orders

use clap::Subcommand;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{load_records, print_records, resolve_config, write_csv};
use crate::cli::table::{CellValue, ColumnDef, TableRow};
use crate::cli::GlobalOpts;
use crate::entities::ServiceOrder;

#[derive(Subcommand, Debug)]
pub enum OrderCommands {
    /// List service orders
    List(ListArgs),

    /// Export service orders as CSV
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status (case-insensitive)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Search order number and customer (case-insensitive substring)
    #[arg(long)]
    pub search: Option<String>,

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
    ColumnDef::new("ORDER", 14),
    ColumnDef::new("CUSTOMER", 28),
    ColumnDef::new("STATUS", 12),
    ColumnDef::new("CREATED", 10),
];

pub fn run(cmd: OrderCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        OrderCommands::List(args) => run_list(args, global),
        OrderCommands::Export(args) => run_export(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = resolve_config(global);
    let mut orders: Vec<ServiceOrder> = load_records(&config, args.input.as_deref())?;

    if let Some(ref status) = args.status {
        orders.retain(|o| {
            o.status
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case(status))
        });
    }
    if let Some(ref search) = args.search {
        let needle = search.to_lowercase();
        orders.retain(|o| {
            o.order_number.to_lowercase().contains(&needle)
                || o.customer_name
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&needle))
        });
    }

    print_records(&orders, global, &config, COLUMNS, |o| {
        TableRow::new(&o.id)
            .cell(CellValue::Id(o.id.clone()))
            .cell(CellValue::Text(o.order_number.clone()))
            .cell(CellValue::text(o.customer_name.as_deref()))
            .cell(
                o.status
                    .clone()
                    .map(CellValue::Status)
                    .unwrap_or(CellValue::Empty),
            )
            .cell(CellValue::date(o.created_at))
    })
}

fn run_export(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let config = resolve_config(global);
    let orders: Vec<ServiceOrder> = load_records(&config, args.input.as_deref())?;
    write_csv(&orders, args.output.as_deref(), global.quiet)
}
