//! Service layer for the scraper.
//!
//! This module contains the extraction logic:
//! - Field, image and link resolution within a product node
//! - Price normalization (`normalize_price`)
//! - Product assembly (`ProductExtractor`)
//! - Shop search over fetched pages (`ShopSearcher`)

pub mod fields;
pub mod images;
pub mod links;
pub mod prices;
mod products;
mod search;

pub use fields::FieldResolver;
pub use images::ImageResolver;
pub use links::LinkResolver;
pub use prices::normalize_price;
pub use products::{ProductExtractor, extract_products};
pub use search::{ShopResult, ShopSearcher};
