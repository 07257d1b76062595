// src/models/site.rs

//! Per-shop extraction rules and the shop lookup table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A selector plus the occurrence to read within a product node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelector {
    /// CSS selector evaluated against the product node
    pub selector: String,

    /// Zero-based index into the ordered matches
    #[serde(default)]
    pub index: usize,

    /// Read this attribute instead of the text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
}

impl FieldSelector {
    pub fn new(selector: impl Into<String>, index: usize) -> Self {
        Self {
            selector: selector.into(),
            index,
            attr: None,
        }
    }

    /// Read an attribute of the matched element instead of its text.
    pub fn with_attr(mut self, attr: impl Into<String>) -> Self {
        self.attr = Some(attr.into());
        self
    }
}

/// Which candidate wins when several sub-elements qualify.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// First acceptable candidate in document order
    First,
    /// Last acceptable candidate in document order
    #[default]
    Last,
}

impl SelectionPolicy {
    /// Pick a candidate from an iterator of acceptable values.
    pub fn pick<I>(self, candidates: I) -> Option<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut candidates = candidates.into_iter();
        match self {
            SelectionPolicy::First => candidates.next(),
            SelectionPolicy::Last => candidates.last(),
        }
    }
}

/// Extraction rules for a single webshop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Shop identifier, matched case-insensitively
    pub id: String,

    /// Site root used to absolutize relative links and images
    pub root_url: String,

    /// Search endpoint; the encoded search term is appended
    pub search_url: String,

    /// Selector for each candidate product node
    pub product_selector: String,

    /// Product name field
    pub name: FieldSelector,

    /// Product price field
    pub price: FieldSelector,

    /// Lazy-load attribute consulted when `src` is unusable
    #[serde(default = "default_image_fallback_attr")]
    pub image_fallback_attr: String,

    #[serde(default)]
    pub image_policy: SelectionPolicy,

    #[serde(default)]
    pub link_policy: SelectionPolicy,
}

fn default_image_fallback_attr() -> String {
    "data-src".to_string()
}

impl SiteConfig {
    /// Create rules with default image/link handling.
    pub fn new(
        id: impl Into<String>,
        root_url: impl Into<String>,
        search_url: impl Into<String>,
        product_selector: impl Into<String>,
        name: FieldSelector,
        price: FieldSelector,
    ) -> Self {
        Self {
            id: id.into(),
            root_url: root_url.into(),
            search_url: search_url.into(),
            product_selector: product_selector.into(),
            name,
            price,
            image_fallback_attr: default_image_fallback_attr(),
            image_policy: SelectionPolicy::default(),
            link_policy: SelectionPolicy::default(),
        }
    }

    /// Build the search page URL for a term.
    ///
    /// The term is form-encoded, so spaces become `+`.
    pub fn search_url_for(&self, term: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(term.as_bytes()).collect();
        format!("{}{}", self.search_url, encoded)
    }
}

/// Case-insensitive lookup table from shop identifier to rules.
#[derive(Debug, Clone, Default)]
pub struct ShopRegistry {
    shops: HashMap<String, SiteConfig>,
}

impl ShopRegistry {
    /// Build a registry. Later entries replace earlier ones with the same id.
    pub fn new(shops: impl IntoIterator<Item = SiteConfig>) -> Self {
        let shops = shops
            .into_iter()
            .map(|site| (site.id.to_lowercase(), site))
            .collect();
        Self { shops }
    }

    pub fn get(&self, id: &str) -> Option<&SiteConfig> {
        self.shops.get(&id.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.shops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }

    /// Shop identifiers in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.shops.values().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids
    }
}
