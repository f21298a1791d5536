use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use super::{element_text, strip_nav_label, trimmed_text};
use crate::error::ScrapeError;
use crate::models::Category;

static LEFT_COLUMN: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#column-left").expect("Invalid column selector"));
static ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("li").expect("Invalid li selector"));
static LIST: Lazy<Selector> = Lazy::new(|| Selector::parse("ul").expect("Invalid ul selector"));
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("Invalid a selector"));

/// Flatten the left navigation tree of the catalog root page.
///
/// The first item of `#column-left` holds a list of parent entries; every
/// nested item below a parent becomes one [`Category`] in document order.
pub fn parse_categories(html: &str) -> Result<Vec<Category>, ScrapeError> {
    let document = Html::parse_document(html);

    let column = document
        .select(&LEFT_COLUMN)
        .next()
        .ok_or_else(|| missing("#column-left", "catalog page"))?;
    let root_item = column
        .select(&ITEM)
        .next()
        .ok_or_else(|| missing("li", "#column-left"))?;
    let root_list = root_item
        .select(&LIST)
        .next()
        .ok_or_else(|| missing("ul", "#column-left li"))?;

    let mut categories = Vec::new();

    for parent_item in root_list.select(&ITEM) {
        let parent_link = parent_item
            .select(&LINK)
            .next()
            .ok_or_else(|| missing("a", "navigation entry"))?;
        let parent_name = trimmed_text(&parent_link);

        for child_item in parent_item.select(&ITEM) {
            let name = strip_nav_label(&element_text(&child_item));
            let link = child_item
                .select(&LINK)
                .next()
                .ok_or_else(|| missing("a", format!("category `{}`", name)))?;
            let url = link.value().attr("href").ok_or(ScrapeError::MissingAttribute {
                selector: "#column-left li a",
                attribute: "href",
            })?;

            categories.push(Category::new(name, parent_name.clone(), url));
        }
    }

    Ok(categories)
}

fn missing(selector: &'static str, context: impl Into<String>) -> ScrapeError {
    ScrapeError::MissingElement {
        selector,
        context: context.into(),
    }
}
