// src/models/mod.rs

//! Domain models for the scraper.
//!
//! Shop rules and configuration are read-only inputs; product records are
//! the output of extraction.

mod config;
mod product;
mod site;

// Re-export all public types
pub use config::{Config, HttpConfig};
pub use product::{NormalizedPrice, ProductRecord};
pub use site::{FieldSelector, SelectionPolicy, ShopRegistry, SiteConfig};
