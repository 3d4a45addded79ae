mod classifier;
mod cleaner;
mod cli;
mod emitter;
mod error;
mod models;
mod reader;
mod settings;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use cli::{Cli, Commands};

fn init_logging() {
    let filter = EnvFilter::try_from_env("LEADSHEET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Generate {
            workbook,
            output,
            date,
        } => cli::generate::run(config, workbook.as_deref(), output.as_deref(), date.as_deref()),
        Commands::Sheets { workbook } => cli::sheets::run(config, workbook.as_deref()),
        Commands::Classify {
            status,
            country,
            visa,
        } => cli::classify::run(status.as_deref(), &country, &visa),
        Commands::Init { force } => cli::init::run(config, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
