use anyhow::Result;
use std::sync::Arc;
use tracing::info;

mod config;
mod error;
mod models;
mod parsers;
mod pipeline;
mod render;
mod scrapers;
mod storage;
mod utils;

use crate::config::Config;
use crate::render::WebDriverRenderer;
use crate::scrapers::ModkartinaScraper;
use crate::storage::XlsxStorage;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("modkartina_scraper=info".parse()?),
        )
        .init();

    info!("Starting modkartina scraper");

    let config = Arc::new(Config::load()?);

    let client = utils::http::create_client(&config)?;
    let renderer = Arc::new(WebDriverRenderer::new(&config));
    let scraper = ModkartinaScraper::new(config.clone(), client, renderer);
    let storage = XlsxStorage::new(&config);

    let products = pipeline::run(&scraper, &storage, config.category_limit).await?;

    info!(
        "Wrote {} products to {}",
        products.len(),
        storage.output_path().display()
    );
    Ok(())
}
