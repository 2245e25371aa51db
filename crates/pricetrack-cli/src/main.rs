mod actions;
mod check;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pricetrack_core::{AppConfig, StoreType};
use pricetrack_db::{JsonFileStore, ProductStore};
use pricetrack_scraper::{Resolver, StoreClient};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::actions::AddForm;

#[derive(Debug, Parser)]
#[command(name = "pricetrack")]
#[command(about = "Track product availability across Indian online stores")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a product URL to its store identifier without saving it
    Resolve {
        url: String,
        /// Apple part number or OPPO SKU
        #[arg(long)]
        part_number: Option<String>,
    },
    /// List the purchasable variants of an OPPO product
    Variants { url: String },
    /// Scrape the item code from a Reliance Digital product page
    ItemCode { url: String },
    /// Show which store a URL belongs to and what else it needs
    Hint { url: String },
    /// Resolve a product URL and start tracking it
    Add {
        url: String,
        /// Apple part number or OPPO SKU
        #[arg(long)]
        part_number: Option<String>,
        #[arg(long)]
        affiliate_link: Option<String>,
    },
    /// Stop tracking a product
    Remove { id: Uuid },
    /// List tracked products
    List {
        #[arg(long)]
        store: Option<StoreType>,
    },
    /// Check stock for tracked products and send alerts
    Check {
        /// Print the alert instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config =
        pricetrack_core::load_app_config_from_env().context("failed to load configuration")?;
    init_tracing(&config)?;
    tracing::debug!(env = %config.env, store = %config.store_path.display(), "starting");

    run(cli.command, &config).await
}

async fn run(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Commands::Hint { url } => {
            let hint = pricetrack_core::store_hint(&url);
            println!("{}", serde_json::to_string_pretty(&hint)?);
            println!("placeholder: {}", hint.placeholder());
        }
        Commands::Resolve { url, part_number } => {
            let resolver = Resolver::new(store_client(config)?);
            let source = resolver.resolve(&url, part_number.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&source)?);
        }
        Commands::Variants { url } => {
            let variants = store_client(config)?.fetch_oppo_variants(&url).await;
            if variants.is_empty() {
                println!("no variants found");
            }
            for variant in variants {
                println!("{}\t{}", variant.sku, variant.name);
            }
        }
        Commands::ItemCode { url } => match store_client(config)?.fetch_item_code(&url).await {
            Some(code) => println!("{code}"),
            None => anyhow::bail!("Could not extract Reliance Item Code"),
        },
        Commands::Add {
            url,
            part_number,
            affiliate_link,
        } => {
            let resolver = Resolver::new(store_client(config)?);
            let store = JsonFileStore::new(&config.store_path);
            let form = AddForm {
                url,
                part_number,
                affiliate_link,
            };
            let product = actions::add_product(&resolver, &store, form).await?;
            println!("added {} {} ({})", product.id, product.name, product.store_type);
        }
        Commands::Remove { id } => {
            let store = JsonFileStore::new(&config.store_path);
            actions::delete_product(&store, id);
        }
        Commands::List { store: filter } => {
            let store = JsonFileStore::new(&config.store_path);
            let products = match filter {
                Some(store_type) => store.list_by_store(store_type)?,
                None => store.list()?,
            };
            for p in &products {
                println!(
                    "{}\t{}\t{}\t{}",
                    p.id, p.store_type, p.product_id, p.name
                );
            }
            tracing::debug!(
                count = products.len(),
                path = %store.path().display(),
                "listed products"
            );
        }
        Commands::Check { dry_run } => {
            let store = JsonFileStore::new(&config.store_path);
            let client = store_client(config)?;
            check::run_check(config, &store, &client, dry_run).await?;
        }
    }

    Ok(())
}

fn store_client(config: &AppConfig) -> anyhow::Result<StoreClient> {
    StoreClient::from_config(config).map_err(|e| anyhow::anyhow!("failed to build store client: {e}"))
}

#[cfg(test)]
mod tests;
