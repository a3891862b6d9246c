use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod scrape;

#[derive(Debug, Parser)]
#[command(name = "btcvps-cli")]
#[command(about = "Bitcoin-friendly hosting provider directory scraper")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape the listing page and write the provider dataset.
    Scrape {
        /// Output path override; defaults to the configured output path.
        #[arg(long)]
        output: Option<std::path::PathBuf>,
        /// Keep tracking URLs instead of probing their redirect targets.
        #[arg(long)]
        skip_resolve: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = btcvps_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Scrape {
        output: None,
        skip_resolve: false,
    }) {
        Commands::Scrape {
            output,
            skip_resolve,
        } => scrape::run_scrape(&config, output, skip_resolve).await,
    }
}
