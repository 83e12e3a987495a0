use crate::{HarvestError, Result};
use url::Url;

/// Normalizes a caller-supplied category name and checks it against the known set
///
/// # Returns
///
/// * `Ok(String)` - The trimmed, lowercased category
/// * `Err(HarvestError::InvalidCategory)` - The category is not known
///
/// # Examples
///
/// ```
/// use shop_harvest::url::normalize_category;
///
/// let known = vec!["watch".to_string(), "mobile".to_string()];
/// assert_eq!(normalize_category("  Watch ", &known).unwrap(), "watch");
/// assert!(normalize_category("toaster", &known).is_err());
/// ```
pub fn normalize_category(category: &str, known: &[String]) -> Result<String> {
    let normalized = category.trim().to_lowercase();

    if known.iter().any(|k| *k == normalized) {
        Ok(normalized)
    } else {
        Err(HarvestError::InvalidCategory {
            category: category.to_string(),
            known: known.to_vec(),
        })
    }
}

/// Checks whether a URL contains `<category>/` immediately followed by a digit
///
/// # Examples
///
/// ```
/// use shop_harvest::url::matches_category;
///
/// assert!(matches_category("https://parsinger.ru/html/mouse/3/3_7.html", "mouse"));
/// assert!(!matches_category("https://parsinger.ru/html/mouse/pad.html", "mouse"));
/// assert!(!matches_category("https://parsinger.ru/html/watch/1/1_1.html", "mouse"));
/// ```
pub fn matches_category(url: &str, category: &str) -> bool {
    let needle = format!("{}/", category);

    url.match_indices(&needle).any(|(index, _)| {
        url[index + needle.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
    })
}

/// Keeps only the URLs belonging to one category, preserving order
pub fn filter_by_category(urls: Vec<String>, category: &str) -> Vec<String> {
    urls.into_iter()
        .filter(|url| matches_category(url, category))
        .collect()
}

/// Checks whether any path segment of a URL names a known category
pub fn path_has_category(url: &str, categories: &[String]) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    parsed
        .path_segments()
        .map(|mut segments| {
            segments.any(|segment| categories.iter().any(|c| c.eq_ignore_ascii_case(segment)))
        })
        .unwrap_or(false)
}
