use std::path::PathBuf;
use std::process::ExitCode;

use aerodesk_catalog::FlightCatalog;
use aerodesk_cli::{execute, Command};
use aerodesk_store::app_config::Config;
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Airport flight reference desk.
#[derive(Debug, Parser)]
#[command(name = "aerodesk", version)]
struct Cli {
    /// Directory holding default.toml and friends
    #[arg(long, default_value = "config", env = "AERODESK_CONFIG_DIR")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config_dir)
        .with_context(|| format!("Failed to load config from {}", cli.config_dir.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let store = aerodesk_store::open_store(&config.storage);
    let mut catalog = FlightCatalog::open(store, aerodesk_store::catalog_options(&config));

    let code = match execute(&mut catalog, cli.command) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    };

    if !catalog.is_persistent() {
        eprintln!("Warning: changes could not be saved and will be lost on exit");
    }
    catalog.close();
    Ok(code)
}
