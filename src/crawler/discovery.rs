//! Product URL discovery
//!
//! Walks the shop's three-level link hierarchy:
//! start page navigation → category pagination → purchase links on each
//! listing page. Every level fans out one fetch per parent URL, joins the
//! whole batch in input order, and only then hands its URLs to the next level.

use crate::config::SiteConfig;
use crate::crawler::fetcher::{fetch_batch, Fetch};
use crate::crawler::parser::{Document, ElementQuery};
use crate::layout::SiteLayout;
use crate::url::{filter_by_category, normalize_category, resolve_link};
use crate::{HarvestError, Result};

/// Discovers category, listing-page and product-card URLs
pub struct UrlDiscovery<F> {
    fetcher: F,
    site: SiteConfig,
    layout: SiteLayout,
}

impl<F: Fetch> UrlDiscovery<F> {
    /// Creates a discovery engine using the default shop layout
    pub fn new(fetcher: F, site: SiteConfig) -> Self {
        Self::with_layout(fetcher, site, SiteLayout::default())
    }

    pub fn with_layout(fetcher: F, site: SiteConfig, layout: SiteLayout) -> Self {
        Self {
            fetcher,
            site,
            layout,
        }
    }

    /// Lists the root URL of every category in the start page's navigation menu
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Absolute category URLs in menu order
    /// * `Err(HarvestError)` - The start page could not be fetched or has no navigation menu
    pub async fn category_urls(&self) -> Result<Vec<String>> {
        let start_url = &self.site.start_url;
        let body = self.fetcher.fetch(start_url).await?;

        let urls = self.links_in_container(start_url, &body, &self.layout.nav_menu)?;
        tracing::info!("Discovered {} category URLs", urls.len());

        Ok(urls)
    }

    /// Lists every paginated listing page of every category
    ///
    /// Category roots are fetched concurrently; pages come back grouped by
    /// category in menu order, each group in pagination order. One failed
    /// category fetch fails the whole call.
    pub async fn category_page_urls(&self) -> Result<Vec<String>> {
        let category_urls = self.category_urls().await?;

        let urls = self
            .fan_out(&category_urls, |url, body| {
                self.links_in_container(url, body, &self.layout.pagination)
            })
            .await?;
        tracing::info!(
            "Discovered {} listing pages across {} categories",
            urls.len(),
            category_urls.len()
        );

        Ok(urls)
    }

    /// Lists every product card URL, optionally restricted to one category
    ///
    /// The category is checked against the known set before anything is
    /// fetched. URLs outside the requested category are dropped silently.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Absolute product card URLs in listing-page order
    /// * `Err(HarvestError::InvalidCategory)` - `category` is not a known category
    /// * `Err(HarvestError)` - A fetch failed or a page lacked its expected markup
    pub async fn product_card_urls(&self, category: Option<&str>) -> Result<Vec<String>> {
        let category = category
            .map(|c| normalize_category(c, &self.site.categories))
            .transpose()?;

        let page_urls = self.category_page_urls().await?;

        let urls = self
            .fan_out(&page_urls, |url, body| self.purchase_links(url, body))
            .await?;
        tracing::info!(
            "Discovered {} product cards on {} listing pages",
            urls.len(),
            page_urls.len()
        );

        Ok(match category {
            Some(category) => {
                let filtered = filter_by_category(urls, &category);
                tracing::info!("{} product cards in category '{}'", filtered.len(), category);
                filtered
            }
            None => urls,
        })
    }

    /// Fetches every parent URL concurrently and flattens the extracted URLs in parent order
    async fn fan_out<E>(&self, parents: &[String], extract: E) -> Result<Vec<String>>
    where
        E: Fn(&str, &str) -> Result<Vec<String>>,
    {
        let batches = fetch_batch(&self.fetcher, parents, extract).await?;
        Ok(batches.into_iter().flatten().collect())
    }

    /// Resolves every link inside the first element matching `container`
    fn links_in_container(
        &self,
        page_url: &str,
        body: &str,
        container: &ElementQuery,
    ) -> Result<Vec<String>> {
        let document = Document::parse(body);
        let scope = document
            .root()
            .first(container)?
            .ok_or_else(|| HarvestError::MissingElement {
                url: page_url.to_string(),
                element: container.to_css(),
            })?;

        scope
            .attrs(&self.layout.link, "href")?
            .iter()
            .map(|href| resolve_link(&self.site.base_url, href))
            .collect()
    }

    /// Resolves the first link of each purchase element on a listing page
    fn purchase_links(&self, page_url: &str, body: &str) -> Result<Vec<String>> {
        let document = Document::parse(body);
        let mut urls = Vec::new();

        for button in document.root().scopes(&self.layout.purchase)? {
            match button.attrs(&self.layout.link, "href")?.first() {
                Some(href) => urls.push(resolve_link(&self.site.base_url, href)?),
                None => tracing::warn!("Purchase element without a link on {}, skipping", page_url),
            }
        }

        tracing::debug!("{} product cards on {}", urls.len(), page_url);
        Ok(urls)
    }
}
