//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs, inventory::InventoryCommands, location::LocationCommands,
    order::OrderCommands, project::ProjectCommands, sub::SubCommands,
};

#[derive(Parser)]
#[command(name = "solarops")]
#[command(author, version, about = "Operations console for solar installation projects")]
#[command(
    long_about = "Browse and edit solar installation projects, sites, service orders, \
                  subcontractors and inventory held by the operations backend."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging to stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Backend base URL (overrides config and SOLAROPS_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project management (milestones, tasks, risks)
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Installation and storage sites
    #[command(subcommand)]
    Location(LocationCommands),

    /// Service orders
    #[command(subcommand)]
    Order(OrderCommands),

    /// Subcontractors
    #[command(subcommand)]
    Sub(SubCommands),

    /// Inventory items
    #[command(subcommand)]
    Inventory(InventoryCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}

impl OutputFormat {
    /// Resolve `auto` to a concrete format
    pub fn or(self, fallback: OutputFormat) -> OutputFormat {
        match self {
            OutputFormat::Auto => fallback,
            f => f,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <OutputFormat as ValueEnum>::from_str(s, true)
    }
}
