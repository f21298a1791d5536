use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Optional override file, looked up in the working directory.
const CONFIG_FILE: &str = "modkartina";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub catalog_url: String,
    pub base_url: String,
    pub excluded_product_urls: Vec<String>,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub fetch_attempts: u32,
    pub webdriver_url: String,
    pub headless: bool,
    pub render_timeout_secs: u64,
    pub render_attempts: u32,
    pub size_values: Vec<String>,
    pub template_path: String,
    pub output_file_name: String,
    pub sheet_name: String,
    pub first_row: u32,
    /// Number of categories to process; 0 processes all of them.
    pub category_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: "https://modkartina.ru/katalog-modulnyh-kartin".to_string(),
            base_url: "https://modkartina.ru/".to_string(),
            excluded_product_urls: vec!["https://modkartina.ru/all-news/novost1".to_string()],
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36".to_string(),
            request_timeout_secs: 25,
            fetch_attempts: 1,
            webdriver_url: "http://localhost:4444".to_string(),
            headless: true,
            render_timeout_secs: 100,
            render_attempts: 2,
            size_values: (1..=5).map(|v| v.to_string()).collect(),
            template_path: "Шаблон.xlsx".to_string(),
            output_file_name: "Результаты.xlsx".to_string(),
            sheet_name: "Лист1".to_string(),
            first_row: 2,
            category_limit: 1,
        }
    }
}

impl Config {
    /// Hardcoded defaults, optionally overridden by `modkartina.toml`.
    pub fn load() -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::Config::try_from(&Config::default())?)
            .add_source(::config::File::with_name(CONFIG_FILE).required(false))
            .build()
            .context("Failed to build configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.catalog_url)
            .with_context(|| format!("Invalid catalog_url: {}", self.catalog_url))?;
        Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base_url: {}", self.base_url))?;
        ensure!(self.fetch_attempts >= 1, "fetch_attempts must be at least 1");
        ensure!(self.render_attempts >= 1, "render_attempts must be at least 1");
        ensure!(self.first_row >= 1, "first_row must be at least 1");
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    /// The output workbook lives next to the template.
    pub fn output_path(&self) -> PathBuf {
        let template = PathBuf::from(&self.template_path);
        match template.parent() {
            Some(dir) => dir.join(&self.output_file_name),
            None => PathBuf::from(&self.output_file_name),
        }
    }

    pub fn is_excluded(&self, product_url: &str) -> bool {
        self.excluded_product_urls.iter().any(|u| u == product_url)
    }
}
