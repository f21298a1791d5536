use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::trimmed_text;
use crate::error::ScrapeError;
use crate::models::SizeOption;

static NAME: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[itemprop="name"]"#).expect("Invalid name selector"));
static MODEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[itemprop="model"]"#).expect("Invalid model selector"));
static IMAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("image").expect("Invalid image selector"));
static SIZE_SELECT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#_sV").expect("Invalid size selector"));
static SIZE_OPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("option").expect("Invalid option selector"));

/// Fields available from the static product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub name: String,
    pub code: String,
}

/// Fields read after the size selector has been driven in a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDetails {
    pub image_src: String,
    pub options: Vec<SizeOption>,
}

pub fn parse_product_summary(html: &str) -> Result<ProductSummary, ScrapeError> {
    let document = Html::parse_document(html);

    let name = document
        .select(&NAME)
        .next()
        .ok_or_else(|| missing(r#"[itemprop="name"]"#))?;
    let code = document
        .select(&MODEL)
        .next()
        .ok_or_else(|| missing(r#"[itemprop="model"]"#))?;

    Ok(ProductSummary {
        name: trimmed_text(&name),
        code: trimmed_text(&code),
    })
}

/// Parse the rendered page and pair `prices` with the size labels.
pub fn parse_rendered_details(
    html: &str,
    base_url: &str,
    prices: Vec<String>,
) -> Result<RenderedDetails, ScrapeError> {
    let document = Html::parse_document(html);

    let image = document
        .select(&IMAGE)
        .next()
        .ok_or_else(|| missing("image"))?;
    let href = xlink_href(&image).ok_or(ScrapeError::MissingAttribute {
        selector: "image",
        attribute: "xlink:href",
    })?;
    let image_src = format!("{}{}", base_url, href);

    let size_select = document
        .select(&SIZE_SELECT)
        .next()
        .ok_or_else(|| missing("#_sV"))?;
    let labels = size_select
        .select(&SIZE_OPTION)
        .map(|option| trimmed_text(&option))
        .collect();

    Ok(RenderedDetails {
        image_src,
        options: pair_options(prices, labels),
    })
}

/// Pair prices with size labels by position; the longer side is truncated.
pub fn pair_options(prices: Vec<String>, labels: Vec<String>) -> Vec<SizeOption> {
    prices
        .into_iter()
        .zip(labels)
        .map(|(price, size)| SizeOption::new(size, price))
        .collect()
}

// Inside <svg> the parser files `xlink:href` under the xlink namespace with
// local name `href`; outside it the attribute keeps its literal name.
fn xlink_href<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    element
        .value()
        .attrs()
        .find(|(name, _)| *name == "href" || *name == "xlink:href")
        .map(|(_, value)| value)
}

fn missing(selector: &'static str) -> ScrapeError {
    ScrapeError::MissingElement {
        selector,
        context: "product page".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PRODUCT_PAGE: &str = r#"
        <html><body>
        <h1 itemprop="name">
            Модульная картина «Закат»
        </h1>
        <span itemprop="model"> MK-0042 </span>
        <svg width="600" height="400" xmlns:xlink="http://www.w3.org/1999/xlink">
          <image xlink:href="image/cache/catalog/zakat-600x400.jpg" width="600" height="400"></image>
        </svg>
        <select id="_sV" name="size">
          <option value="1"> S </option>
          <option value="2">M</option>
          <option value="3">L</option>
          <option value="4">XL</option>
          <option value="5">XXL</option>
        </select>
        </body></html>
    "#;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn summary_is_trimmed() {
        let summary = parse_product_summary(PRODUCT_PAGE).unwrap();
        assert_eq!(
            summary,
            ProductSummary {
                name: "Модульная картина «Закат»".to_string(),
                code: "MK-0042".to_string(),
            }
        );
    }

    #[test]
    fn rendered_details_pair_prices_with_sizes() {
        let prices = strings(&["100", "110", "120", "130", "140"]);
        let details = parse_rendered_details(PRODUCT_PAGE, "https://modkartina.ru/", prices).unwrap();

        assert_eq!(
            details.image_src,
            "https://modkartina.ru/image/cache/catalog/zakat-600x400.jpg"
        );
        assert_eq!(
            details.options,
            vec![
                SizeOption::new("S", "100"),
                SizeOption::new("M", "110"),
                SizeOption::new("L", "120"),
                SizeOption::new("XL", "130"),
                SizeOption::new("XXL", "140"),
            ]
        );
    }

    #[test]
    fn pairing_truncates_to_shorter_side() {
        let options = pair_options(strings(&["100", "110", "120"]), strings(&["S", "M"]));
        assert_eq!(options, vec![SizeOption::new("S", "100"), SizeOption::new("M", "110")]);

        let options = pair_options(strings(&["100"]), strings(&["S", "M", "L"]));
        assert_eq!(options, vec![SizeOption::new("S", "100")]);
    }

    #[test]
    fn missing_model_is_an_error() {
        let err = parse_product_summary(r#"<p itemprop="name">x</p>"#).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::MissingElement { selector: r#"[itemprop="model"]"#, .. }
        ));
    }
}
