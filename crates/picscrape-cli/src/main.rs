mod prices;
mod sugar;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use picscrape_core::Site;

#[derive(Debug, Parser)]
#[command(name = "picscrape")]
#[command(about = "Picard loyalty-point prices and sugar content extractor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a price-per-point table for products redeemable at each points tier
    Prices {
        /// Product page URLs for the 100-point tier
        #[arg(long = "urls100", num_args = 0..)]
        urls100: Vec<String>,

        /// Product page URLs for the 300-point tier
        #[arg(long = "urls300", num_args = 0..)]
        urls300: Vec<String>,

        /// Product page URLs for the 700-point tier
        #[arg(long = "urls700", num_args = 0..)]
        urls700: Vec<String>,

        /// Site whose price selectors to use
        #[arg(long, default_value = "picard")]
        site: Site,
    },
    /// Crawl every category and write a CSV of sugar content per product
    Sugar {
        /// Site to crawl
        #[arg(long, default_value = "picard")]
        site: Site,

        /// CSV destination (default: `PICSCRAPE_OUTPUT_PATH` or `picard_results.csv`)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub(crate) fn build_page_client(
    config: &picscrape_core::AppConfig,
) -> anyhow::Result<picscrape_scraper::PageClient> {
    picscrape_scraper::PageClient::new(config.request_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build page client: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = picscrape_core::load_app_config()?;
    init_tracing(&config.log_level);
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Prices {
            urls100,
            urls300,
            urls700,
            site,
        } => {
            let mut stdout = std::io::stdout().lock();
            prices::run_prices(&config, site, [urls100, urls300, urls700], &mut stdout).await
        }
        Commands::Sugar { site, output } => {
            let output = output.unwrap_or_else(|| config.output_path.clone());
            sugar::run_sugar(&config, site, &output).await
        }
    }
}
