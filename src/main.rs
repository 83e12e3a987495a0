//! Shop-Harvest main entry point
//!
//! This is the command-line interface for the Shop-Harvest product harvester.

use anyhow::Context;
use clap::{Parser, Subcommand};
use shop_harvest::config::{load_config_with_hash, Config};
use shop_harvest::{Extractor, HttpFetcher, UrlDiscovery};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shop-Harvest: a product catalogue harvester
///
/// Shop-Harvest walks a demo shop's categories, listing pages and product
/// cards, exports product fields as `;`-delimited tables and totals the
/// value of the stock on sale.
#[derive(Parser, Debug)]
#[command(name = "shop-harvest")]
#[command(version)]
#[command(about = "A product catalogue harvester", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults target the demo shop)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the root URL of every category
    CategoryUrls,

    /// Print every paginated listing page URL
    PageUrls,

    /// Print every product card URL
    ProductUrls {
        /// Only product cards of this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Export product cards as a table
    ExportProducts {
        /// Output file (`.csv` is appended when missing)
        #[arg(value_name = "FILE")]
        output: PathBuf,

        /// Only product cards of this category
        #[arg(long)]
        category: Option<String>,

        /// Leave out the header row
        #[arg(long)]
        no_header: bool,
    },

    /// Export the product summaries on every listing page as a table
    ExportListing {
        /// Output file (`.csv` is appended when missing)
        #[arg(value_name = "FILE")]
        output: PathBuf,

        /// Leave out the header row
        #[arg(long)]
        no_header: bool,
    },

    /// Print the product export header built from a sample of product cards
    Header,

    /// Print the total value of all stock on sale
    TotalValue,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    let result = run(cli.command, config).await;
    if let Err(e) = &result {
        tracing::error!("Harvest failed: {:#}", e);
    }
    result
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so URL lists on stdout stay pipeable.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shop_harvest=info,warn"),
            1 => EnvFilter::new("shop_harvest=debug,info"),
            2 => EnvFilter::new("shop_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs one harvesting scenario
async fn run(command: Command, config: Config) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(&config.http).context("Failed to build HTTP client")?;
    let discovery = UrlDiscovery::new(fetcher.clone(), config.site.clone());
    let extractor = Extractor::new(fetcher, config.site.clone(), config.output.clone());

    match command {
        Command::CategoryUrls => print_urls(&discovery.category_urls().await?),
        Command::PageUrls => print_urls(&discovery.category_page_urls().await?),
        Command::ProductUrls { category } => {
            print_urls(&discovery.product_card_urls(category.as_deref()).await?)
        }
        Command::ExportProducts {
            output,
            category,
            no_header,
        } => {
            let urls = discovery.product_card_urls(category.as_deref()).await?;
            let report = extractor.export_rows(&urls, &output, !no_header).await?;
            println!("✓ Exported {} rows to {}", report.rows, report.path.display());
        }
        Command::ExportListing { output, no_header } => {
            let urls = discovery.category_page_urls().await?;
            let report = extractor.export_rows(&urls, &output, !no_header).await?;
            println!("✓ Exported {} rows to {}", report.rows, report.path.display());
        }
        Command::Header => {
            let urls = discovery.product_card_urls(None).await?;
            let header = extractor.generate_header(&urls).await?;
            println!("{}", header.join(config.output.delimiter.as_str()));
        }
        Command::TotalValue => {
            let urls = discovery.product_card_urls(None).await?;
            let total = extractor.total_value(&urls).await?;
            println!("Total value of all products on sale: {} руб.", total);
        }
    }

    Ok(())
}

fn print_urls(urls: &[String]) {
    for url in urls {
        println!("{}", url);
    }
}
