use sat_selector_cli::app::{self, App};
use sat_selector_cli::config::{self, ConfigSource};
use sat_selector_cli::logging;

use anyhow::{Context, Result};
use sat_selector::{CatalogLoader, FsSatStore, ListView, SatSelector};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let (config, source) = config::read_config(&config_path)?;

    // Initialize logging
    let _logging_guard = logging::init_logging(&config.log_dir, "sat-selector", &config.log_level)?;

    tracing::info!("Satellite selector starting...");
    if source == ConfigSource::Defaults {
        tracing::warn!("Config file {} not found, using defaults", config_path);
    }
    tracing::info!("Reading satellite data from {}", config.data_dir);

    let store = FsSatStore::new(&config.data_dir);
    let loader = CatalogLoader::new(&config.data_dir, store);
    let (selector, report) =
        SatSelector::initialize_with_surface(config.columns.flags(), &loader, ListView::new());

    tracing::info!(
        "{} satellites and {} categories ready in {:.3}s",
        report.satellites_loaded,
        report.categories_loaded,
        report.duration_seconds
    );
    if selector.tables()[0].is_empty() {
        tracing::warn!("No satellites found in {}", config.data_dir);
    }

    let mut app = App::new(selector);
    println!("Type 'help' for commands.");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    app::run(&mut app, stdin, tokio::io::stdout())
        .await
        .context("Command loop failed")?;

    match app.last_activated() {
        Some(catalog_number) => tracing::info!("Last selected satellite: {}", catalog_number),
        None => tracing::info!("No satellite selected"),
    }
    Ok(())
}
