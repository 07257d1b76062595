// src/pipeline/search.rs

//! Single-shop search pipeline.

use crate::error::Result;
use crate::models::{Config, ProductRecord};
use crate::services::ShopSearcher;

/// Validate the configuration, then search `shop` for `term` over HTTP.
pub async fn run_search(config: &Config, shop: &str, term: &str) -> Result<Vec<ProductRecord>> {
    config.validate()?;

    let searcher = ShopSearcher::from_config(config)?;
    if searcher.registry().get(shop).is_none() {
        log::warn!(
            "Supported shops: {}",
            searcher.registry().ids().join(", ")
        );
    }

    searcher.search(shop, term).await
}
