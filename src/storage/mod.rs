use anyhow::Result;
use async_trait::async_trait;

use crate::models::Product;

mod xlsx;
pub use xlsx::XlsxStorage;

#[async_trait]
pub trait ProductStorage: Send + Sync {
    /// Persist `products` in order, one row each.
    async fn save(&self, products: &[Product]) -> Result<()>;
}
