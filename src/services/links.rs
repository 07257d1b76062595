//! Product link selection.

use scraper::{ElementRef, Selector};

use crate::error::Result;
use crate::models::{SelectionPolicy, SiteConfig};
use crate::utils::parse_selector;
use crate::utils::url::absolutize;

/// Placeholder anchors that do not lead anywhere.
const PLACEHOLDER_HREF: &str = "#";

/// Picks the outbound link of a product node and makes it absolute.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    selector: Selector,
    root_url: String,
    policy: SelectionPolicy,
}

impl LinkResolver {
    pub fn new(root_url: impl Into<String>, policy: SelectionPolicy) -> Result<Self> {
        Ok(Self {
            selector: parse_selector("a")?,
            root_url: root_url.into(),
            policy,
        })
    }

    pub fn for_site(site: &SiteConfig) -> Result<Self> {
        Self::new(&site.root_url, site.link_policy)
    }

    /// Absolute link. Without a usable `href` this is the site root itself.
    pub fn resolve(&self, node: ElementRef<'_>) -> String {
        let candidates = node
            .select(&self.selector)
            .filter_map(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty() && *href != PLACEHOLDER_HREF)
            .map(str::to_string);
        match self.policy.pick(candidates) {
            Some(href) => absolutize(&self.root_url, &href),
            None => self.root_url.clone(),
        }
    }
}
