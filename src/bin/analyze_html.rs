use anyhow::{Context, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use std::fs;

const CATALOG_URL: &str = "https://modkartina.ru/katalog-modulnyh-kartin";

/// Selectors the scraper depends on, checked against live pages.
const CATALOG_SELECTORS: &[&str] = &["#column-left", "#column-left li", "#column-left li ul li a"];
const LISTING_SELECTORS: &[&str] = &["div.product-thumb", "div.product-thumb .caption h4 a"];

fn report(document: &Html, selectors: &[&str]) {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            println!("Selector '{}' matched {} elements", selector_str, document.select(&selector).count());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let client = Client::builder()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36")
        .build()?;

    println!("Fetching catalog HTML...");
    let html = client.get(CATALOG_URL).send().await?.text().await?;
    fs::write("catalog_sample.html", &html)?;

    let document = Html::parse_document(&html);
    report(&document, CATALOG_SELECTORS);

    let first_category = Selector::parse("#column-left li ul li ul li a").unwrap();
    let listing_url = document
        .select(&first_category)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
        .context("No category link found in navigation")?;

    println!("\nFetching listing HTML from {}...", listing_url);
    let html = client.get(&listing_url).send().await?.text().await?;
    fs::write("listing_sample.html", &html)?;

    let document = Html::parse_document(&html);
    report(&document, LISTING_SELECTORS);

    Ok(())
}
