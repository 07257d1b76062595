//! Field resolution within a product node.

use scraper::{ElementRef, Selector};

use crate::error::Result;
use crate::models::FieldSelector;
use crate::utils::{normalize_whitespace, parse_selector};

/// Reads the text (or an attribute) of the n-th selector match under a node.
#[derive(Debug, Clone)]
pub struct FieldResolver {
    selector: Selector,
    index: usize,
    attr: Option<String>,
}

impl FieldResolver {
    /// Compile a field rule.
    pub fn new(field: &FieldSelector) -> Result<Self> {
        Ok(Self {
            selector: parse_selector(&field.selector)?,
            index: field.index,
            attr: field.attr.clone(),
        })
    }

    /// Whether `node` has at least `index + 1` matches.
    pub fn is_satisfiable(&self, node: ElementRef<'_>) -> bool {
        node.select(&self.selector).nth(self.index).is_some()
    }

    /// Resolve the field, or `None` when the match or attribute is absent.
    pub fn resolve(&self, node: ElementRef<'_>) -> Option<String> {
        let element = node.select(&self.selector).nth(self.index)?;
        match &self.attr {
            Some(attr) => element.value().attr(attr).map(|v| v.trim().to_string()),
            None => Some(element_text(element)),
        }
    }
}

/// Concatenated text content of an element, whitespace-collapsed.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    const ROW: &str = r#"
        <table><tr id="row">
            <td><img src="/a.jpg"></td>
            <td>  Sigma   35mm
                  F1.4 Art </td>
            <td><span itemprop="price" content="649.00">€ 649,-</span></td>
        </tr></table>
    "#;

    fn with_row<T>(f: impl FnOnce(ElementRef<'_>) -> T) -> T {
        let document = Html::parse_document(ROW);
        let row = document
            .select(&parse_selector("tr#row").unwrap())
            .next()
            .unwrap();
        f(row)
    }

    #[test]
    fn test_resolve_collapses_whitespace() {
        let field = FieldResolver::new(&FieldSelector::new("td", 1)).unwrap();
        assert_eq!(
            with_row(|row| field.resolve(row)),
            Some("Sigma 35mm F1.4 Art".to_string())
        );
    }

    #[test]
    fn test_resolve_index_out_of_range_is_absent() {
        let field = FieldResolver::new(&FieldSelector::new("td", 3)).unwrap();
        assert!(!with_row(|row| field.is_satisfiable(row)));
        assert_eq!(with_row(|row| field.resolve(row)), None);
    }

    #[test]
    fn test_resolve_attribute() {
        let field =
            FieldResolver::new(&FieldSelector::new("span", 0).with_attr("content")).unwrap();
        assert_eq!(
            with_row(|row| field.resolve(row)),
            Some("649.00".to_string())
        );

        let missing =
            FieldResolver::new(&FieldSelector::new("span", 0).with_attr("data-price")).unwrap();
        assert_eq!(with_row(|row| missing.resolve(row)), None);
    }

    #[test]
    fn test_new_rejects_invalid_selector() {
        assert!(FieldResolver::new(&FieldSelector::new("[[invalid", 0)).is_err());
    }
}
