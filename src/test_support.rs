//! In-memory fixtures shared by unit tests

use crate::crawler::Fetch;
use crate::FetchError;
use std::collections::{HashMap, HashSet};

/// Serves canned pages; unknown URLs answer 404
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    timeouts: HashSet<String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub fn timeout(mut self, url: &str) -> Self {
        self.timeouts.insert(url.to_string());
        self
    }
}

impl Fetch for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        // Yield once so sibling fetches interleave like real requests
        tokio::task::yield_now().await;

        if self.timeouts.contains(url) {
            return Err(FetchError::Timeout {
                url: url.to_string(),
            });
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

pub const BASE: &str = "https://shop.test/html/";

pub fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

/// Start page with a navigation menu over the given category roots
pub fn start_page(category_roots: &[&str]) -> String {
    let links: String = category_roots
        .iter()
        .map(|href| format!(r#"<a href="{}"><div>cat</div></a>"#, href))
        .collect();
    format!(r#"<html><body><div class="nav_menu">{}</div></body></html>"#, links)
}

/// Category root page with a pagination control; also a listing page itself
pub fn listing_page(page_hrefs: &[&str], card_hrefs: &[&str]) -> String {
    let pages: String = page_hrefs
        .iter()
        .enumerate()
        .map(|(i, href)| format!(r#"<a href="{}">{}</a>"#, href, i + 1))
        .collect();
    let items: String = card_hrefs
        .iter()
        .enumerate()
        .map(|(i, href)| {
            format!(
                r#"<div class="item">
                    <a class="name_item" href="{href}">Item {i}</a>
                    <div class="description"><li>Brand: Acme</li><li>Colour: black {i}</li></div>
                    <p class="price">{price} руб</p>
                    <div class="sale_button"><a href="{href}">Buy</a></div>
                </div>"#,
                href = href,
                i = i,
                price = 100 * (i + 1)
            )
        })
        .collect();
    format!(
        r#"<html><body>{}<div class="pagen">{}</div></body></html>"#,
        items, pages
    )
}

/// Product card page
pub fn product_page(name: &str, attributes: &[(&str, &str)], stock: u64, price: u64) -> String {
    let description: String = attributes
        .iter()
        .map(|(label, value)| format!("<li>{}: {}</li>", label, value))
        .collect();
    format!(
        r#"<html><body>
            <p id="p_header">{name}</p>
            <p class="article">Артикул: 8024{stock}</p>
            <ul id="description">{description}</ul>
            <span id="in_stock">В наличии: {stock}</span>
            <span id="price">{price} руб</span>
            <span id="old_price">{old} руб</span>
        </body></html>"#,
        name = name,
        stock = stock,
        description = description,
        price = price,
        old = price + 500
    )
}
