use clap::Parser;
use miette::Result;
use solarops::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Reset SIGPIPE so piping into `head` or `grep -q` exits quietly
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    let default_level = if global.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("solarops={}", default_level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    match cli.command {
        Commands::Project(cmd) => solarops::cli::commands::project::run(cmd, &global),
        Commands::Location(cmd) => solarops::cli::commands::location::run(cmd, &global),
        Commands::Order(cmd) => solarops::cli::commands::order::run(cmd, &global),
        Commands::Sub(cmd) => solarops::cli::commands::sub::run(cmd, &global),
        Commands::Inventory(cmd) => solarops::cli::commands::inventory::run(cmd, &global),
        Commands::Completions(args) => solarops::cli::commands::completions::run(args),
    }
}
