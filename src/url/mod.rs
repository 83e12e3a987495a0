//! URL handling module for Shop-Harvest
//!
//! This module provides href resolution against the site base, category-name
//! validation, the `<category>/<digit>` membership test, and classification of
//! URL lists into product-card or listing-page lists.

mod category;

pub use category::{filter_by_category, matches_category, normalize_category, path_has_category};

use crate::Result;
use url::Url;

/// Shape of a list of shop URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlKind {
    /// Product detail pages (`.../watch/1/1_1.html`)
    ProductCard,
    /// Paginated category listings (`.../index1_page_2.html`)
    ListingPage,
}

/// Classifies a URL list as product cards or listing pages
///
/// The list is treated as product cards as soon as any URL has a path
/// segment naming a known category. This is a heuristic on URL shape: a mixed
/// list classifies as product cards.
///
/// # Examples
///
/// ```
/// use shop_harvest::url::{classify_urls, UrlKind};
///
/// let categories = vec!["watch".to_string()];
/// let cards = vec!["https://shop.example.com/html/watch/3/3_1.html".to_string()];
/// assert_eq!(classify_urls(&cards, &categories), UrlKind::ProductCard);
///
/// let pages = vec!["https://shop.example.com/html/index3_page_1.html".to_string()];
/// assert_eq!(classify_urls(&pages, &categories), UrlKind::ListingPage);
/// ```
pub fn classify_urls(urls: &[String], categories: &[String]) -> UrlKind {
    if urls.iter().any(|url| path_has_category(url, categories)) {
        UrlKind::ProductCard
    } else {
        UrlKind::ListingPage
    }
}

/// Resolves an href found on a page against the site base URL
///
/// Relative hrefs are joined onto the base; absolute hrefs are kept as they are.
pub fn resolve_link(base_url: &str, href: &str) -> Result<String> {
    let base = Url::parse(base_url)?;
    Ok(base.join(href.trim())?.to_string())
}
