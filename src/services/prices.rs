//! Price text normalization.
//!
//! Shops mix `1.234,56 €` and `$1,234.56`. Commas are turned into periods
//! first, then every period but the last is dropped, so both layouts end up
//! as `1234.56` without a per-shop locale flag. A single separator is
//! always read as the decimal point: `1,200` becomes `1.2`.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::NormalizedPrice;

/// Currency markers removed before parsing. `&euro` lacks its `;` on purpose.
const CURRENCY_MARKERS: [&str; 3] = ["$", "€", "&euro"];

/// Marker for whole-currency prices, e.g. `49.-`.
const WHOLE_PRICE_MARKER: &str = ".-";

static NUMERIC_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+(?:\.\d*)?|\.\d+)").expect("numeric prefix regex"));

/// Normalize raw price text into its cleaned form and numeric value.
///
/// The value falls back to zero when no leading number remains; check
/// [`NormalizedPrice::is_numeric`] to tell that apart from a real zero.
pub fn normalize_price(text: &str) -> NormalizedPrice {
    let raw = text
        .replace("&nbsp;", "")
        .replace('\u{a0}', "")
        .replace(',', ".")
        .replace(' ', "")
        .trim()
        .to_string();

    let stripped = CURRENCY_MARKERS
        .iter()
        .fold(raw.clone(), |acc, marker| acc.replace(marker, ""))
        .replace(WHOLE_PRICE_MARKER, "");

    let amount = parse_leading_number(&collapse_thousands(&stripped));
    NormalizedPrice { raw, amount }
}

/// Drop every period except the last one.
fn collapse_thousands(s: &str) -> String {
    match s.rfind('.') {
        Some(last) if s[..last].contains('.') => {
            let mut collapsed: String = s[..last].chars().filter(|c| *c != '.').collect();
            collapsed.push_str(&s[last..]);
            collapsed
        }
        _ => s.to_string(),
    }
}

/// Parse the longest leading decimal number, ignoring any trailing text.
fn parse_leading_number(s: &str) -> Option<f64> {
    NUMERIC_PREFIX
        .find(s)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
