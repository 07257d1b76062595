// src/services/products.rs

//! Product extraction service.
//!
//! Turns the candidate nodes of a search result page into product records
//! using a shop's extraction rules.

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{ProductRecord, SiteConfig};
use crate::services::fields::FieldResolver;
use crate::services::images::ImageResolver;
use crate::services::links::LinkResolver;
use crate::services::prices::normalize_price;
use crate::utils::parse_selector;
use crate::utils::url::absolutize;

/// Extractor with a shop's selectors compiled once.
///
/// Holds no state between calls; the same document always yields the same
/// records.
#[derive(Debug, Clone)]
pub struct ProductExtractor {
    site_id: String,
    root_url: String,
    product: Selector,
    name: FieldResolver,
    price: FieldResolver,
    image: ImageResolver,
    link: LinkResolver,
}

impl ProductExtractor {
    /// Compile the rules of a shop.
    pub fn new(site: &SiteConfig) -> Result<Self> {
        Ok(Self {
            site_id: site.id.clone(),
            root_url: site.root_url.clone(),
            product: parse_selector(&site.product_selector)?,
            name: FieldResolver::new(&site.name)?,
            price: FieldResolver::new(&site.price)?,
            image: ImageResolver::for_site(site)?,
            link: LinkResolver::for_site(site)?,
        })
    }

    /// Extract all complete products from a parsed page, in document order.
    pub fn extract(&self, document: &Html) -> Vec<ProductRecord> {
        self.collect(document.select(&self.product))
    }

    /// Extract products from the subtree below `root`.
    pub fn extract_from(&self, root: ElementRef<'_>) -> Vec<ProductRecord> {
        self.collect(root.select(&self.product))
    }

    fn collect<'a>(&self, candidates: impl Iterator<Item = ElementRef<'a>>) -> Vec<ProductRecord> {
        let mut skipped = 0usize;
        let products: Vec<ProductRecord> = candidates
            .filter_map(|node| {
                let product = self.build(node);
                if product.is_none() {
                    skipped += 1;
                }
                product
            })
            .collect();

        log::debug!(
            "{}: extracted {} products, skipped {} incomplete nodes",
            self.site_id,
            products.len(),
            skipped
        );
        products
    }

    /// A node qualifies when it has an image and enough name/price matches.
    fn is_complete(&self, node: ElementRef<'_>) -> bool {
        self.image.has_image(node)
            && self.name.is_satisfiable(node)
            && self.price.is_satisfiable(node)
    }

    fn build(&self, node: ElementRef<'_>) -> Option<ProductRecord> {
        if !self.is_complete(node) {
            return None;
        }

        let name = self.name.resolve(node)?;
        let price = normalize_price(&self.price.resolve(node)?);
        if !price.is_numeric() {
            log::debug!("{}: non-numeric price '{}' for '{}'", self.site_id, price.raw, name);
        }

        let image = self
            .image
            .resolve(node)
            .map(|src| absolutize(&self.root_url, &src))
            .unwrap_or_default();
        let link = self.link.resolve(node);

        Some(ProductRecord {
            name,
            price: price.value(),
            price_raw: price.raw,
            image,
            link,
        })
    }
}

/// Extract products from a parsed page with a shop's rules.
pub fn extract_products(document: &Html, site: &SiteConfig) -> Result<Vec<ProductRecord>> {
    Ok(ProductExtractor::new(site)?.extract(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldSelector, SelectionPolicy};

    const LISTING: &str = r##"
        <html><body><div class="results">
          <div class="product">
            <img src="//cdn.example.com/a.jpg">
            <h2>  Canon
                  EOS R6 </h2>
            <span class="price">1.234,56&nbsp;€</span>
            <a href="/p/123">details</a>
            <a href="#">compare</a>
          </div>
          <div class="product">
            <h2>Nikon Z6</h2>
            <span class="price">999,00 €</span>
            <a href="/p/456">details</a>
          </div>
          <div class="product">
            <img src="data:image/png;base64,iVBORw0KGgo=" data-src="/img/b.jpg">
            <h2>Sony A7</h2>
            <span class="price">$12.00</span>
            <a href="https://other.example/sony">details</a>
          </div>
          <div class="product">
            <img src="/img/c.jpg">
            <h2>Fujifilm X-T5</h2>
          </div>
          <div class="product">
            <img src="/img/d.jpg">
            <h2>Gift card</h2>
            <span class="price">on request</span>
          </div>
        </div></body></html>
    "##;

    fn sample_site() -> SiteConfig {
        SiteConfig::new(
            "demo",
            "https://shop.example",
            "https://shop.example/search?q=",
            "div.product",
            FieldSelector::new("h2", 0),
            FieldSelector::new("span.price", 0),
        )
    }

    fn extract(html: &str, site: &SiteConfig) -> Vec<ProductRecord> {
        let document = Html::parse_document(html);
        extract_products(&document, site).unwrap()
    }

    #[test]
    fn test_extracts_complete_products_in_order() {
        let products = extract(LISTING, &sample_site());
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Canon EOS R6", "Sony A7", "Gift card"]);
    }

    #[test]
    fn test_record_fields() {
        let products = extract(LISTING, &sample_site());

        assert_eq!(
            products[0],
            ProductRecord {
                name: "Canon EOS R6".to_string(),
                price: 1234.56,
                price_raw: "1.234.56€".to_string(),
                image: "https://cdn.example.com/a.jpg".to_string(),
                link: "https://shop.example/p/123".to_string(),
            }
        );

        assert_eq!(products[1].price, 12.0);
        assert_eq!(products[1].price_raw, "$12.00");
        assert_eq!(products[1].image, "https://shop.example/img/b.jpg");
        assert_eq!(products[1].link, "https://other.example/sony");
    }

    #[test]
    fn test_non_numeric_price_is_zero_not_skipped() {
        let products = extract(LISTING, &sample_site());
        let gift = &products[2];
        assert_eq!(gift.price, 0.0);
        assert_eq!(gift.price_raw, "onrequest");
        assert_eq!(gift.link, "https://shop.example");
    }

    #[test]
    fn test_placeholder_only_anchor_links_to_site_root() {
        let html = r##"<div class="product">
            <img src="/img/strap.jpg">
            <h2>Camera strap</h2>
            <span class="price">19,95</span>
            <a href="#">Add to wishlist</a>
        </div>"##;

        let products = extract(html, &sample_site());
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].link, "https://shop.example");
    }

    #[test]
    fn test_nodes_without_enough_matches_are_skipped() {
        let html = r#"
            <table>
              <tr><th>Image</th><th>Name</th><th>Price</th></tr>
              <tr><td><img src="/img/50.jpg"></td><td>Lens 50mm</td><td>1,200</td></tr>
              <tr><td><img src="/img/85.jpg"></td><td>Lens 85mm</td></tr>
            </table>
        "#;
        let site = SiteConfig::new(
            "fototools",
            "https://fototools.be",
            "https://fototools.be/index.php?action=search&lang=NL&srchval=",
            "tr",
            FieldSelector::new("td", 1),
            FieldSelector::new("td", 2),
        );

        let products = extract(html, &site);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Lens 50mm");
        assert_eq!(products[0].price, 1.2);
        assert_eq!(products[0].image, "https://fototools.be/img/50.jpg");
    }

    #[test]
    fn test_multiple_images_follow_site_policy() {
        let html = r#"<div class="product">
            <img src="https://cdn.example.com/front.jpg">
            <img src="https://cdn.example.com/back.jpg">
            <h2>Tripod</h2><span class="price">89,95</span>
        </div>"#;

        let mut site = sample_site();
        assert_eq!(extract(html, &site)[0].image, "https://cdn.example.com/back.jpg");

        site.image_policy = SelectionPolicy::First;
        assert_eq!(extract(html, &site)[0].image, "https://cdn.example.com/front.jpg");
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let document = Html::parse_document(LISTING);
        let extractor = ProductExtractor::new(&sample_site()).unwrap();
        assert_eq!(extractor.extract(&document), extractor.extract(&document));
    }

    #[test]
    fn test_no_candidates_yields_empty() {
        let products = extract("<html><body><p>No results</p></body></html>", &sample_site());
        assert!(products.is_empty());
    }

    #[test]
    fn test_extract_from_subtree() {
        let document = Html::parse_document(LISTING);
        let results = document
            .select(&parse_selector("div.results").unwrap())
            .next()
            .unwrap();
        let extractor = ProductExtractor::new(&sample_site()).unwrap();
        assert_eq!(extractor.extract_from(results).len(), 3);
    }

    #[test]
    fn test_invalid_rules_are_rejected() {
        let mut site = sample_site();
        site.price.selector = "span[".to_string();
        assert!(ProductExtractor::new(&site).is_err());
    }
}
