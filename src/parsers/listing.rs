use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::error::ScrapeError;

static THUMBNAIL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.product-thumb").expect("Invalid thumbnail selector"));
static CAPTION_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".caption h4 a").expect("Invalid caption selector"));

/// Detail-page link of every product thumbnail, in document order.
///
/// Each thumbnail yields its own result so the caller can stop at the first
/// malformed one while keeping everything before it.
pub fn parse_product_links(html: &str) -> Vec<Result<String, ScrapeError>> {
    let document = Html::parse_document(html);

    document
        .select(&THUMBNAIL)
        .map(|thumbnail| {
            let link = thumbnail
                .select(&CAPTION_LINK)
                .next()
                .ok_or_else(|| ScrapeError::MissingElement {
                    selector: ".caption h4 a",
                    context: "product thumbnail".to_string(),
                })?;
            link.value()
                .attr("href")
                .map(str::to_string)
                .ok_or(ScrapeError::MissingAttribute {
                    selector: ".caption h4 a",
                    attribute: "href",
                })
        })
        .collect()
}
