//! Product image selection.

use scraper::{ElementRef, Selector};

use crate::error::Result;
use crate::models::{SelectionPolicy, SiteConfig};
use crate::utils::parse_selector;
use crate::utils::url::{is_inline_data, with_scheme};

/// Picks the image URL of a product node.
///
/// Each `<img>` contributes its `src`, or its lazy-load attribute when `src`
/// is empty or an inline `data:` URI. The policy decides between several
/// qualifying images; the default keeps the last one in document order.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    selector: Selector,
    fallback_attr: String,
    policy: SelectionPolicy,
}

impl ImageResolver {
    pub fn new(fallback_attr: impl Into<String>, policy: SelectionPolicy) -> Result<Self> {
        Ok(Self {
            selector: parse_selector("img")?,
            fallback_attr: fallback_attr.into(),
            policy,
        })
    }

    pub fn for_site(site: &SiteConfig) -> Result<Self> {
        Self::new(&site.image_fallback_attr, site.image_policy)
    }

    /// Whether `node` contains at least one image element.
    pub fn has_image(&self, node: ElementRef<'_>) -> bool {
        node.select(&self.selector).next().is_some()
    }

    /// Selected image URL, with protocol-relative URLs given `https:`.
    pub fn resolve(&self, node: ElementRef<'_>) -> Option<String> {
        let candidates = node
            .select(&self.selector)
            .filter_map(|img| self.candidate(img));
        self.policy.pick(candidates).map(|src| with_scheme(&src))
    }

    fn candidate(&self, img: ElementRef<'_>) -> Option<String> {
        let element = img.value();
        usable(element.attr("src")).or_else(|| usable(element.attr(&self.fallback_attr)))
    }
}

fn usable(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() || is_inline_data(value) {
        None
    } else {
        Some(value.to_string())
    }
}
