use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::models::{Category, Product};
use crate::parsers::{parse_categories, parse_product_links, parse_product_summary, parse_rendered_details};
use crate::render::{render_with_retry, PageRenderer};
use crate::scrapers::CatalogScraper;
use crate::utils::http::fetch_html;

pub struct ModkartinaScraper {
    config: Arc<Config>,
    client: Client,
    renderer: Arc<dyn PageRenderer>,
}

impl ModkartinaScraper {
    pub fn new(config: Arc<Config>, client: Client, renderer: Arc<dyn PageRenderer>) -> Self {
        Self {
            config,
            client,
            renderer,
        }
    }

    /// Fetch one product page, drive its size selector and assemble the product.
    pub async fn product(&self, url: &str, category: &Category) -> Result<Product> {
        info!("Fetching product {}", url);

        let html = fetch_html(&self.client, url, self.config.fetch_attempts).await?;
        let summary = parse_product_summary(&html)
            .with_context(|| format!("Failed to parse product page {}", url))?;

        let page = render_with_retry(
            self.renderer.as_ref(),
            url,
            &self.config.size_values,
            self.config.render_attempts,
        )
        .await?;
        let details = parse_rendered_details(&page.html, &self.config.base_url, page.prices)
            .with_context(|| format!("Failed to parse rendered page {}", url))?;

        Ok(Product {
            name: summary.name,
            category: category.clone(),
            image_src: details.image_src,
            code: summary.code,
            options: details.options,
        })
    }
}

#[async_trait]
impl CatalogScraper for ModkartinaScraper {
    async fn categories(&self) -> Result<Vec<Category>> {
        info!("Fetching catalog navigation from {}", self.config.catalog_url);

        let html = fetch_html(&self.client, &self.config.catalog_url, self.config.fetch_attempts).await?;
        let categories = parse_categories(&html).context("Failed to parse catalog navigation")?;

        info!("Found {} categories", categories.len());
        Ok(categories)
    }

    async fn products(&self, category: &Category) -> Result<Vec<Product>> {
        info!("Scraping category {} ({})", category.path(), category.url);

        let html = fetch_html(&self.client, &category.url, self.config.fetch_attempts).await?;
        let links = parse_product_links(&html);

        let mut products = Vec::new();

        for link in links {
            let result = match link {
                Ok(url) if self.config.is_excluded(&url) => {
                    debug!("Skipping non-product link {}", url);
                    continue;
                }
                Ok(url) => self.product(&url, category).await,
                Err(e) => Err(e.into()),
            };

            match result {
                Ok(product) => products.push(product),
                Err(e) => {
                    error!(
                        "Abandoning remaining products of {} after failure: {:?}",
                        category.path(),
                        e
                    );
                    break;
                }
            }
        }

        info!("Collected {} products from {}", products.len(), category.path());
        Ok(products)
    }
}
