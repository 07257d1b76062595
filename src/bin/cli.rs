//! shopscrape CLI
//!
//! Searches one webshop and prints the extracted products.

use std::path::PathBuf;

use clap::Parser;
use shopscrape::{error::Result, models::Config, pipeline};

/// shopscrape - Webshop product search
#[derive(Parser, Debug)]
#[command(
    name = "shopscrape",
    version,
    about = "Search a webshop and extract product listings"
)]
struct Cli {
    /// Shop identifier (case-insensitive)
    shop: String,

    /// Search term; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    search: Vec<String>,

    /// Path to a TOML shop catalog (default: built-in shops)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one line per product using placeholders like {name} and {price}
    #[arg(short, long)]
    template: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => {
            log::info!("Loading shop catalog from {}", path.display());
            Config::load_or_default(path)
        }
        None => Config::default(),
    };

    let term = cli.search.join(" ");
    let products = pipeline::run_search(&config, &cli.shop, &term).await?;

    match &cli.template {
        Some(template) => {
            for product in &products {
                println!("{}", product.format(template));
            }
        }
        None => println!("{}", serde_json::to_string_pretty(&products)?),
    }

    log::info!("Done! {} products", products.len());
    Ok(())
}
