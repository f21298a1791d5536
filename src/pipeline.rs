use anyhow::Result;
use tracing::info;

use crate::models::Product;
use crate::scrapers::CatalogScraper;
use crate::storage::ProductStorage;

/// Discover categories, scrape up to `category_limit` of them (0 = all) and
/// hand every collected product to `storage` in one call.
pub async fn run(
    scraper: &dyn CatalogScraper,
    storage: &dyn ProductStorage,
    category_limit: usize,
) -> Result<Vec<Product>> {
    let categories = scraper.categories().await?;

    let limit = if category_limit == 0 {
        categories.len()
    } else {
        category_limit
    };
    if limit < categories.len() {
        info!(
            "Processing {} of {} categories (category_limit = {})",
            limit,
            categories.len(),
            category_limit
        );
    }

    let mut products = Vec::new();
    for category in categories.iter().take(limit) {
        products.extend(scraper.products(category).await?);
    }

    storage.save(&products).await?;
    info!("Run finished with {} products", products.len());
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    struct FakeScraper {
        categories: Vec<Category>,
        visited: Mutex<Vec<String>>,
    }

    impl FakeScraper {
        fn with_categories(count: usize) -> Self {
            Self {
                categories: (1..=count)
                    .map(|i| Category::new(format!("c{}", i), "root", format!("https://modkartina.ru/c{}", i)))
                    .collect(),
                visited: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CatalogScraper for FakeScraper {
        async fn categories(&self) -> Result<Vec<Category>> {
            Ok(self.categories.clone())
        }

        async fn products(&self, category: &Category) -> Result<Vec<Product>> {
            self.visited.lock().unwrap().push(category.name.clone());
            Ok(vec![Product {
                name: format!("{}-product", category.name),
                category: category.clone(),
                image_src: String::new(),
                code: String::new(),
                options: Vec::new(),
            }])
        }
    }

    #[derive(Default)]
    struct MemoryStorage {
        saved: Mutex<Vec<Vec<String>>>,
    }

    #[async_trait]
    impl ProductStorage for MemoryStorage {
        async fn save(&self, products: &[Product]) -> Result<()> {
            let names = products.iter().map(|p| p.name.clone()).collect();
            self.saved.lock().unwrap().push(names);
            Ok(())
        }
    }

    #[tokio::test]
    async fn default_limit_processes_only_the_first_category() {
        let scraper = FakeScraper::with_categories(3);
        let storage = MemoryStorage::default();

        let products = run(&scraper, &storage, 1).await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(*scraper.visited.lock().unwrap(), vec!["c1"]);
        assert_eq!(*storage.saved.lock().unwrap(), vec![vec!["c1-product".to_string()]]);
    }

    #[tokio::test]
    async fn zero_limit_processes_everything() {
        let scraper = FakeScraper::with_categories(3);
        let storage = MemoryStorage::default();

        run(&scraper, &storage, 0).await.unwrap();

        assert_eq!(*scraper.visited.lock().unwrap(), vec!["c1", "c2", "c3"]);
    }

    #[tokio::test]
    async fn storage_is_written_once_even_without_categories() {
        let scraper = FakeScraper::with_categories(0);
        let storage = MemoryStorage::default();

        let products = run(&scraper, &storage, 1).await.unwrap();

        assert!(products.is_empty());
        assert_eq!(storage.saved.lock().unwrap().len(), 1);
    }
}
