use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Category, Product};

mod modkartina;

pub use modkartina::ModkartinaScraper;

#[async_trait]
pub trait CatalogScraper: Send + Sync {
    /// Leaf categories of the catalog navigation, in document order.
    async fn categories(&self) -> Result<Vec<Category>>;

    /// Products listed under `category`. A failing product ends the category
    /// early; products collected before it are still returned.
    async fn products(&self, category: &Category) -> Result<Vec<Product>>;
}
