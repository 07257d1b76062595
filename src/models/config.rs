//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{ShopRegistry, SiteConfig};
use crate::utils::parse_selector;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Supported shops and their extraction rules
    #[serde(default = "defaults::default_shops")]
    pub shops: Vec<SiteConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Build the shop lookup table.
    pub fn registry(&self) -> ShopRegistry {
        ShopRegistry::new(self.shops.iter().cloned())
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.http.max_concurrent == 0 {
            return Err(AppError::validation("http.max_concurrent must be > 0"));
        }
        if self.shops.is_empty() {
            return Err(AppError::validation("No shops defined"));
        }

        let mut seen = HashSet::new();
        for site in &self.shops {
            if !seen.insert(site.id.to_lowercase()) {
                return Err(AppError::validation(format!(
                    "Duplicate shop id '{}'",
                    site.id
                )));
            }
            Self::validate_site(site)?;
        }
        Ok(())
    }

    fn validate_site(site: &SiteConfig) -> Result<()> {
        if site.id.trim().is_empty() {
            return Err(AppError::config("Shop with empty id"));
        }
        url::Url::parse(&site.root_url).map_err(|e| {
            AppError::config(format!("{}: invalid root_url: {e}", site.id))
        })?;
        url::Url::parse(&site.search_url).map_err(|e| {
            AppError::config(format!("{}: invalid search_url: {e}", site.id))
        })?;
        parse_selector(&site.product_selector)?;
        parse_selector(&site.name.selector)?;
        parse_selector(&site.price.selector)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            shops: defaults::default_shops(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum shops searched at once
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

mod defaults {
    use crate::models::{FieldSelector, SiteConfig};

    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; shopscrape/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        4
    }

    fn shop(
        id: &str,
        root_url: &str,
        search_url: &str,
        product: &str,
        name: (&str, usize),
        price: (&str, usize),
    ) -> SiteConfig {
        SiteConfig::new(
            id,
            root_url,
            search_url,
            product,
            FieldSelector::new(name.0, name.1),
            FieldSelector::new(price.0, price.1),
        )
    }

    // Built-in shop catalog
    pub fn default_shops() -> Vec<SiteConfig> {
        vec![
            shop(
                "fototools",
                "https://fototools.be",
                "https://fototools.be/index.php?action=search&lang=NL&srchval=",
                "tr",
                ("td", 1),
                ("td", 2),
            ),
            shop(
                "fotokonijnenberg",
                "https://www.fotokonijnenberg.be",
                "https://www.fotokonijnenberg.be/catalogsearch/result/?q=",
                "div.category-products ul li",
                ("div.product-name", 0),
                ("span.price", 0),
            ),
            shop(
                "selexion",
                "https://www.selexion.be",
                "https://www.selexion.be/nl/search/?text=",
                "div.product-layout",
                ("div.name", 0),
                ("div.price", 0),
            ),
            shop(
                "mediamarkt",
                "https://www.mediamarkt.be",
                "https://www.mediamarkt.be/nl/search.html?query=",
                "ul.products-list li",
                ("h2", 0),
                ("div.price", 0),
            ),
            shop(
                "amazon",
                "https://www.amazon.de",
                "https://www.amazon.de/s?k=",
                ".s-result-item",
                ("h2", 0),
                ("span.a-price-whole", 0),
            ),
            shop(
                "avned",
                "http://www.avned.nl",
                "http://www.avned.nl/catalogsearch/result/?q=",
                "li.item",
                ("h2.product-name", 0),
                ("span.price", 0),
            ),
            shop(
                "avblackmagic",
                "http://www.avblackmagic.nl",
                "http://www.avblackmagic.nl/catalogsearch/result/?q=",
                "li.item",
                ("h2.product-name", 0),
                ("span.price", 0),
            ),
            shop(
                "bhphotovideo",
                "https://www.bhphotovideo.com",
                "https://www.bhphotovideo.com/c/search?Ntt=",
                "div.item",
                ("h5", 0),
                ("span.itc-you-pay-price", 0),
            ),
            shop(
                "coolblue",
                "https://www.coolblue.be",
                "https://www.coolblue.be/nl/zoeken?query=",
                "div.product",
                ("a.product__title", 0),
                ("span.sales-price", 0),
            ),
            shop(
                "digistore",
                "https://digistore.eu",
                "https://digistore.eu/catalogsearch/result/?q=",
                "li.item",
                ("h2.product-name", 0),
                ("span.price", 0),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.http.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_ids_ignoring_case() {
        let mut config = Config::default();
        let mut dup = config.shops[0].clone();
        dup.id = dup.id.to_uppercase();
        config.shops.push(dup);
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn validate_rejects_bad_selector() {
        let mut config = Config::default();
        config.shops[0].product_selector = "[[invalid".to_string();
        assert!(matches!(config.validate(), Err(AppError::Selector { .. })));
    }

    #[test]
    fn validate_rejects_relative_root_url() {
        let mut config = Config::default();
        config.shops[0].root_url = "/shop".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn validate_rejects_blank_shop_id() {
        let mut config = Config::default();
        config.shops[0].id = " ".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn default_catalog_has_all_shops() {
        let registry = Config::default().registry();
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.get("fototools").map(|s| s.name.index), Some(1));
        assert_eq!(registry.get("FotoTools").map(|s| s.price.index), Some(2));
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [http]
            timeout_secs = 5

            [[shops]]
            id = "demo"
            root_url = "https://demo.example"
            search_url = "https://demo.example/search?q="
            product_selector = "article"
            name = {{ selector = "h3" }}
            price = {{ selector = ".price" }}
            image_policy = "first"
            "#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.max_concurrent, 4);
        assert_eq!(config.shops.len(), 1);
        assert_eq!(config.shops[0].image_policy, crate::models::SelectionPolicy::First);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_or_default_falls_back() {
        let config = Config::load_or_default("/nonexistent/shops.toml");
        assert_eq!(config.shops.len(), 10);
    }
}
