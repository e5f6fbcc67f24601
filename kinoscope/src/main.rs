use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use kinoscope_addons::AddonClient;
use kinoscope_core::bootstrap::{load_config, run_autostart};
use kinoscope_core::logging;
use kinoscope_core::models::{FilterKind, FilterSet, MediaCategory};
use kinoscope_core::provider::{AddonDirectory, DirectoryClient, ProviderDirectory};
use kinoscope_core::service::DiscoveryController;

#[derive(Parser)]
#[command(name = "kinoscope", about = "Catalog discovery over addon providers", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Browse a catalog feed: list, select, filter, paginate
    Browse {
        /// Media category tag (movie, series, tv, ...)
        #[arg(long)]
        category: Option<String>,

        /// Catalog key as printed by `catalogs` (provider-id/catalog-id)
        #[arg(long)]
        catalog: Option<String>,

        /// Additional addon manifest URLs to install before browsing
        #[arg(long = "addon")]
        addons: Vec<String>,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        year: Option<String>,

        /// How many pages to pull before printing
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Emit the feed as JSON instead of text lines
        #[arg(long)]
        json: bool,
    },

    /// List the catalogs available for a category
    Catalogs {
        #[arg(long)]
        category: Option<String>,

        #[arg(long = "addon")]
        addons: Vec<String>,
    },
}

struct Engine {
    directory: DirectoryClient,
    controller: DiscoveryController,
}

/// Wire the addon-backed directory into a controller and run the
/// autostart flow.
async fn start_engine(
    config: &kinoscope_core::Config,
    addons: &[String],
    category: Option<MediaCategory>,
) -> Result<Engine> {
    let addon_dir = Arc::new(AddonDirectory::new(AddonClient::new()));
    let directory = DirectoryClient::new(addon_dir.clone());
    let controller = DiscoveryController::new(addon_dir.clone(), config.discovery.clone());

    for locator in addons {
        match addon_dir.install(locator).await {
            Ok(id) => info!(provider = %id, "Installed addon"),
            Err(e) => warn!(locator, error = %e, "Addon install failed, skipping"),
        }
    }

    run_autostart(&config.bootstrap, &directory, &controller, category.clone()).await?;

    // With autostart disabled the controller is still idle; drive the
    // initial selection explicitly
    if controller.snapshot().await.catalogs.is_empty() {
        let category = category
            .unwrap_or_else(|| MediaCategory::from_tag(&config.discovery.default_category));
        if let Err(e) = controller.select_category(category).await {
            warn!(error = %e, "Initial category selection failed");
        }
    }

    Ok(Engine {
        directory,
        controller,
    })
}

async fn browse(
    config: &kinoscope_core::Config,
    category: Option<String>,
    catalog: Option<String>,
    addons: &[String],
    genre: Option<String>,
    search: Option<String>,
    year: Option<String>,
    pages: u32,
    json: bool,
) -> Result<()> {
    let category = category.map(|t| MediaCategory::from_tag(&t));
    let engine = start_engine(config, addons, category).await?;
    let controller = &engine.controller;

    if let Some(key) = catalog {
        controller.select_catalog(&key).await?;
    }

    let mut filters = FilterSet::default();
    filters.set(FilterKind::Genre, genre);
    filters.set(FilterKind::Search, search);
    filters.set(FilterKind::Year, year);
    if !filters.is_empty() {
        controller.apply_filters(filters).await?;
    }

    for _ in 1..pages {
        if !controller.snapshot().await.has_more {
            break;
        }
        controller.load_more().await?;
    }

    let snapshot = controller.snapshot().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot.items)?);
        return Ok(());
    }

    match &snapshot.catalog {
        Some(catalog) => println!(
            "{} — {} ({} items{})",
            catalog.provider_name,
            catalog.name,
            snapshot.items.len(),
            if snapshot.has_more { ", more available" } else { "" }
        ),
        None => {
            println!("No catalogs available for {}", snapshot.category);
            return Ok(());
        }
    }
    for item in &snapshot.items {
        let year = item
            .year
            .map_or_else(String::new, |y| format!(" ({y})"));
        let rating = item
            .rating
            .map_or_else(String::new, |r| format!("  [{r:.1}]"));
        println!("  {}{year}{rating}  {}", item.title, item.id);
    }
    Ok(())
}

async fn list_catalogs(
    config: &kinoscope_core::Config,
    category: Option<String>,
    addons: &[String],
) -> Result<()> {
    let category = category.map(|t| MediaCategory::from_tag(&t));
    let engine = start_engine(config, addons, category).await?;

    let providers = engine.directory.list_providers().await?;
    println!("{} provider(s) installed", providers.len());

    let snapshot = engine.controller.snapshot().await;
    if snapshot.catalogs.is_empty() {
        println!("No catalogs available for {}", snapshot.category);
        return Ok(());
    }
    for catalog in &snapshot.catalogs {
        let mut caps = Vec::new();
        if !catalog.genres.is_empty() {
            caps.push(format!("{} genres", catalog.genres.len()));
        }
        if catalog.supports_search() {
            caps.push("search".to_string());
        }
        let caps = if caps.is_empty() {
            String::new()
        } else {
            format!("  [{}]", caps.join(", "))
        };
        println!("  {}  {} — {}{caps}", catalog.key(), catalog.provider_name, catalog.name);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config()?;
    logging::init_logging(&config.logging)?;

    match cli.command {
        Command::Browse {
            category,
            catalog,
            addons,
            genre,
            search,
            year,
            pages,
            json,
        } => {
            browse(
                &config, category, catalog, &addons, genre, search, year, pages, json,
            )
            .await
        }
        Command::Catalogs { category, addons } => {
            list_catalogs(&config, category, &addons).await
        }
    }
}
