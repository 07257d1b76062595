//! Product record data structures.

use serde::{Deserialize, Serialize};

/// A product extracted from a search result page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    /// Product name, whitespace-collapsed
    pub name: String,

    /// Parsed price; 0.0 when the raw text was not numeric
    pub price: f64,

    /// Price text after separator cleanup, before currency stripping
    pub price_raw: String,

    /// Absolute image URL, or empty
    pub image: String,

    /// Absolute product page URL, or empty
    pub link: String,
}

impl ProductRecord {
    /// Format the record for display using a template.
    ///
    /// Supported placeholders:
    /// - `{name}`, `{price}`, `{price_raw}`, `{image}`, `{link}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{name}", &self.name)
            .replace("{price_raw}", &self.price_raw)
            .replace("{price}", &format!("{:.2}", self.price))
            .replace("{image}", &self.image)
            .replace("{link}", &self.link)
    }
}

/// Outcome of price normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPrice {
    /// Cleaned text kept for diagnostics
    pub raw: String,

    /// Parsed amount, `None` if no numeric prefix was found
    pub amount: Option<f64>,
}

impl NormalizedPrice {
    /// Numeric value with the permissive zero fallback.
    pub fn value(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }

    /// Whether the text yielded a number at all.
    pub fn is_numeric(&self) -> bool {
        self.amount.is_some()
    }
}
