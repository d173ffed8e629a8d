//! `solarops inventory` command - stock levels

use clap::Subcommand;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{effective_format, load_records, print_records, resolve_config, write_csv};
use crate::cli::table::{CellValue, ColumnDef, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::InventoryItem;

#[derive(Subcommand, Debug)]
pub enum InventoryCommands {
    /// List inventory items
    List(ListArgs),

    /// Export inventory as CSV
    Export(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show only items at or below their minimum stock
    #[arg(long)]
    pub low_stock: bool,

    /// Filter by category (case-insensitive)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

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
    ColumnDef::new("SKU", 12),
    ColumnDef::new("CATEGORY", 14),
    ColumnDef::new("QTY", 6),
    ColumnDef::new("MIN", 5),
    ColumnDef::new("LOW", 4),
    ColumnDef::new("LOCATION", 18),
];

pub fn run(cmd: InventoryCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        InventoryCommands::List(args) => run_list(args, global),
        InventoryCommands::Export(args) => run_export(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = resolve_config(global);
    let mut items: Vec<InventoryItem> = load_records(&config, args.input.as_deref())?;

    if args.low_stock {
        items.retain(InventoryItem::is_low_stock);
    }
    if let Some(ref category) = args.category {
        items.retain(|i| {
            i.category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(category))
        });
    }

    print_records(&items, global, &config, COLUMNS, |i| {
        TableRow::new(&i.id)
            .cell(CellValue::Id(i.id.clone()))
            .cell(CellValue::Text(i.name.clone()))
            .cell(CellValue::text(i.sku.as_deref()))
            .cell(CellValue::text(i.category.as_deref()))
            .cell(CellValue::Number(i.quantity))
            .cell(
                i.minimum_stock
                    .map(CellValue::Number)
                    .unwrap_or(CellValue::Empty),
            )
            .cell(CellValue::Flag(i.is_low_stock()))
            .cell(
                i.location
                    .as_ref()
                    .map(|l| CellValue::Text(l.label().to_string()))
                    .unwrap_or(CellValue::Empty),
            )
    })?;

    if !global.quiet && effective_format(global, &config, OutputFormat::Tsv) == OutputFormat::Tsv {
        let value: f64 = items.iter().filter_map(InventoryItem::stock_value).sum();
        if value > 0.0 {
            println!("Stock value: {}", style(format!("{:.2}", value)).yellow());
        }
    }
    Ok(())
}

fn run_export(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let config = resolve_config(global);
    let items: Vec<InventoryItem> = load_records(&config, args.input.as_deref())?;
    write_csv(&items, args.output.as_deref(), global.quiet)
}
