// src/utils/url.rs

//! URL manipulation utilities.

/// Whether `href` already carries an `http` or `https` scheme.
pub fn is_absolute(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

/// Whether `src` embeds its content inline (`data:` URI).
pub fn is_inline_data(src: &str) -> bool {
    src.get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("data:"))
}

/// Give a protocol-relative URL (`//host/path`) the `https` scheme.
///
/// # Examples
/// ```
/// use shopscrape::utils::url::with_scheme;
///
/// assert_eq!(with_scheme("//cdn.example.com/a.jpg"), "https://cdn.example.com/a.jpg");
/// assert_eq!(with_scheme("/a.jpg"), "/a.jpg");
/// ```
pub fn with_scheme(href: &str) -> String {
    match href.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => href.to_string(),
    }
}

/// Make `href` absolute against a site root.
///
/// Absolute URLs pass through, protocol-relative URLs get `https:`, and
/// everything else is appended to `root` with exactly one `/` between them.
/// An empty `href` stays empty.
///
/// # Examples
/// ```
/// use shopscrape::utils::url::absolutize;
///
/// assert_eq!(
///     absolutize("https://shop.example", "/p/123"),
///     "https://shop.example/p/123"
/// );
/// ```
pub fn absolutize(root: &str, href: &str) -> String {
    if href.is_empty() || is_absolute(href) {
        return href.to_string();
    }
    if href.starts_with("//") {
        return with_scheme(href);
    }

    match (root.ends_with('/'), href.starts_with('/')) {
        (true, true) => format!("{}{}", root, &href[1..]),
        (false, false) => format!("{root}/{href}"),
        _ => format!("{root}{href}"),
    }
}
