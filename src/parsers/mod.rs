pub mod categories;
pub mod listing;
pub mod product;

pub use categories::*;
pub use listing::*;
pub use product::*;

use scraper::ElementRef;

/// Characters trimmed from navigation labels such as `"- \n  Sunset \n"`.
const NAV_LABEL_TRIM: &[char] = &['-', ' ', '\n', '\r', '\t'];

/// All text below an element, concatenated in document order.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Element text with surrounding whitespace removed.
pub fn trimmed_text(element: &ElementRef<'_>) -> String {
    element_text(element).trim().to_string()
}

/// Strip the leading dash marker and surrounding whitespace from a nav entry.
pub fn strip_nav_label(text: &str) -> String {
    text.trim_matches(NAV_LABEL_TRIM).to_string()
}
