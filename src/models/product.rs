use serde::{Deserialize, Serialize};
use std::fmt;

use super::Category;

/// One size variant and the price shown after selecting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    pub size: String,
    pub price: String,
}

impl SizeOption {
    pub fn new(size: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            size: size.into(),
            price: price.into(),
        }
    }
}

impl fmt::Display for SizeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.size, self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: Category,
    pub image_src: String,
    pub code: String,
    pub options: Vec<SizeOption>,
}

impl Product {
    /// Newline-joined `size - price` lines in option order.
    pub fn options_display(&self) -> String {
        self.options
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn options_are_listed_one_per_line() {
        let product = Product {
            name: "Закат".to_string(),
            category: Category::new("Пейзажи", "Природа", "https://modkartina.ru/peyzazhi"),
            image_src: "https://modkartina.ru/image/1.jpg".to_string(),
            code: "MK-1".to_string(),
            options: vec![SizeOption::new("S", "100"), SizeOption::new("M", "110")],
        };
        assert_eq!(product.options_display(), "S - 100\nM - 110");
        assert_eq!(product.category.path(), "Пейзажи/Природа");
    }

    #[test]
    fn no_options_render_empty() {
        let product = Product {
            name: String::new(),
            category: Category::new("a", "b", "c"),
            image_src: String::new(),
            code: String::new(),
            options: Vec::new(),
        };
        assert_eq!(product.options_display(), "");
    }
}
