mod compare;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pricecmp_engine::{Aggregator, AggregatorSettings, OfferPipeline};
use pricecmp_search::SerpApiClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricecmp")]
#[command(about = "Compare store prices for a product across US retailers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Aggregate and rank store offers for one product query
    Aggregate {
        /// Product query, e.g. "iPhone 17 Pro Max"
        query: String,

        /// Show at most this many offers
        #[arg(long)]
        limit: Option<usize>,

        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Keep offers from stores outside the US allowlist
        #[arg(long)]
        include_international: bool,
    },
    /// Aggregate every query in a file (one per line; `#` starts a comment)
    Batch {
        /// Path to the query file
        file: PathBuf,

        /// Print one JSON object per query instead of tables
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = pricecmp_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let aggregator = build_aggregator(&config)?;

    match cli.command {
        Commands::Aggregate {
            query,
            limit,
            json,
            include_international,
        } => {
            let options = compare::options(limit, include_international);
            compare::run_aggregate(&aggregator, &query, &options, json).await?;
        }
        Commands::Batch { file, json } => {
            compare::run_batch(&aggregator, &file, config.max_concurrent_queries, json).await?;
        }
    }

    Ok(())
}

/// Builds the search client and rule tables from configuration, applying
/// the optional rules file.
fn build_aggregator(
    config: &pricecmp_core::AppConfig,
) -> anyhow::Result<Aggregator<SerpApiClient>> {
    let client = SerpApiClient::from_config(config)?;

    let pipeline = match &config.rules_path {
        Some(path) => {
            let overrides = pricecmp_core::load_rule_overrides(path)?;
            tracing::info!(
                path = %path.display(),
                floors = overrides.price_floors.len(),
                extra_stores = overrides.extra_stores.len(),
                "loaded rule overrides"
            );
            OfferPipeline::from_overrides(&overrides, config.marketplace_listing_cap)
        }
        None => OfferPipeline::builtin(config.marketplace_listing_cap),
    };

    Ok(Aggregator::new(
        client,
        pipeline,
        AggregatorSettings::from_config(config),
    ))
}
