// src/services/search.rs

//! Shop search service.
//!
//! Fetches a shop's search page and runs product extraction on it.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use scraper::Html;

use crate::error::Result;
use crate::models::{Config, ProductRecord, ShopRegistry};
use crate::services::products::ProductExtractor;
use crate::utils::http::{HttpFetcher, PageFetcher};

/// Outcome of searching a single shop.
#[derive(Debug)]
pub struct ShopResult {
    pub shop: String,
    pub result: Result<Vec<ProductRecord>>,
}

/// Service for searching one or more shops.
pub struct ShopSearcher {
    registry: ShopRegistry,
    fetcher: Arc<dyn PageFetcher>,
    max_concurrent: usize,
}

impl ShopSearcher {
    /// Create a searcher over the configured shops with a custom fetcher.
    pub fn new(config: &Config, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            registry: config.registry(),
            fetcher,
            max_concurrent: config.http.max_concurrent.max(1),
        }
    }

    /// Create a searcher that fetches pages over HTTP.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.http)?;
        Ok(Self::new(config, Arc::new(fetcher)))
    }

    pub fn registry(&self) -> &ShopRegistry {
        &self.registry
    }

    /// Search a shop for `term`.
    ///
    /// An unknown shop yields an empty list. Fetch failures are returned.
    pub async fn search(&self, shop: &str, term: &str) -> Result<Vec<ProductRecord>> {
        let Some(site) = self.registry.get(shop) else {
            log::warn!("Unknown shop '{}', returning no products", shop);
            return Ok(Vec::new());
        };

        let extractor = ProductExtractor::new(site)?;
        let url = site.search_url_for(term);
        log::info!("Searching {} for '{}'", site.id, term);

        let html = self.fetcher.fetch(&url).await?;
        let document = Html::parse_document(&html);
        let products = extractor.extract(&document);

        log::info!("{}: found {} products", site.id, products.len());
        Ok(products)
    }

    /// Search several shops concurrently. Results keep the order of `shops`.
    pub async fn search_many<S>(&self, shops: &[S], term: &str) -> Vec<ShopResult>
    where
        S: AsRef<str>,
    {
        let results: Vec<ShopResult> = stream::iter(shops)
            .map(|shop| async move {
                let shop = shop.as_ref();
                ShopResult {
                    shop: shop.to_string(),
                    result: self.search(shop, term).await,
                }
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        for outcome in &results {
            if let Err(error) = &outcome.result {
                log::warn!("Search failed for {}: {}", outcome.shop, error);
            }
        }
        results
    }

    /// Search every configured shop.
    pub async fn search_all(&self, term: &str) -> Vec<ShopResult> {
        let shops: Vec<String> = self
            .registry
            .ids()
            .into_iter()
            .map(str::to_string)
            .collect();
        self.search_many(&shops, term).await
    }
}
