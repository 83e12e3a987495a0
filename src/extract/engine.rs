//! Field extraction and aggregation over harvested URLs

use crate::config::{OutputConfig, SiteConfig};
use crate::crawler::{fetch_batch, Document, ElementQuery, Fetch, Scope};
use crate::extract::records::{collect_labels, strip_label, Attribute, ListingRecord, ProductRecord};
use crate::layout::SiteLayout;
use crate::output::{write_table, ExportReport, ExportTable};
use crate::url::{classify_urls, UrlKind};
use crate::{HarvestError, Result};
use std::path::Path;

/// Extracts records from product-card or listing pages and aggregates them
pub struct Extractor<F> {
    fetcher: F,
    site: SiteConfig,
    output: OutputConfig,
    layout: SiteLayout,
}

impl<F: Fetch> Extractor<F> {
    /// Creates an extractor using the default shop layout
    pub fn new(fetcher: F, site: SiteConfig, output: OutputConfig) -> Self {
        Self::with_layout(fetcher, site, output, SiteLayout::default())
    }

    pub fn with_layout(
        fetcher: F,
        site: SiteConfig,
        output: OutputConfig,
        layout: SiteLayout,
    ) -> Self {
        Self {
            fetcher,
            site,
            output,
            layout,
        }
    }

    /// Decides which record schema a URL list calls for
    pub fn classify(&self, urls: &[String]) -> UrlKind {
        classify_urls(urls, &self.site.categories)
    }

    /// Extracts one record per product card, in URL order
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ProductRecord>)` - One record per URL
    /// * `Err(HarvestError::MissingElement)` - A page lacks one of the singular fields
    /// * `Err(HarvestError::Fetch)` - A page could not be fetched
    pub async fn product_records(&self, urls: &[String]) -> Result<Vec<ProductRecord>> {
        let records = fetch_batch(&self.fetcher, urls, |url, body| self.parse_product(url, body))
            .await?;
        tracing::info!("Extracted {} product records", records.len());
        Ok(records)
    }

    /// Extracts every product summary from a set of listing pages, in page order
    pub async fn listing_records(&self, urls: &[String]) -> Result<Vec<ListingRecord>> {
        let pages = fetch_batch(&self.fetcher, urls, |url, body| self.parse_listing(url, body))
            .await?;

        let records: Vec<ListingRecord> = pages.into_iter().flatten().collect();
        tracing::info!(
            "Extracted {} listing records from {} pages",
            records.len(),
            urls.len()
        );
        Ok(records)
    }

    /// Builds the product export header from a sample of product cards
    ///
    /// The first `header-sample-size` URLs are fetched and their description
    /// labels are united in first-seen order.
    pub async fn generate_header(&self, sample_urls: &[String]) -> Result<Vec<String>> {
        let sample = &sample_urls[..sample_urls.len().min(self.output.header_sample_size)];
        let records = self.product_records(sample).await?;

        let labels = collect_labels(records.iter().map(|r| r.description.as_slice()));
        tracing::debug!("Header labels from {} sampled cards: {:?}", sample.len(), labels);

        Ok(ProductRecord::header(&labels))
    }

    /// Sums stock quantity times price over every product card
    ///
    /// Quantities and prices are paired by position within a page; a page
    /// whose lists differ in length fails with `SchemaMismatch`. A total that
    /// does not fit in a `u64` fails with `ValueOverflow` naming the page
    /// where it overflowed.
    pub async fn total_value(&self, urls: &[String]) -> Result<u64> {
        let totals = fetch_batch(&self.fetcher, urls, |url, body| self.page_value(url, body))
            .await?;

        let total = totals
            .iter()
            .zip(urls)
            .try_fold(0u64, |total, (value, url)| {
                total
                    .checked_add(*value)
                    .ok_or_else(|| HarvestError::ValueOverflow { url: url.clone() })
            })?;
        tracing::info!("Total stock value over {} product cards: {}", urls.len(), total);
        Ok(total)
    }

    /// Extracts the records a URL list calls for and writes them as a table
    ///
    /// Description cells are aligned by label against the union of labels of
    /// all extracted records. Nothing is written unless every page was
    /// extracted.
    pub async fn export_rows(
        &self,
        urls: &[String],
        destination: &Path,
        write_header: bool,
    ) -> Result<ExportReport> {
        let kind = self.classify(urls);
        tracing::info!("Exporting {} URLs as {:?} records", urls.len(), kind);

        let (header, rows) = match kind {
            UrlKind::ProductCard => {
                let records = self.product_records(urls).await?;
                let labels = collect_labels(records.iter().map(|r| r.description.as_slice()));
                let rows = records.iter().map(|r| r.to_row(&labels)).collect();
                (ProductRecord::header(&labels), rows)
            }
            UrlKind::ListingPage => {
                let records = self.listing_records(urls).await?;
                let labels = collect_labels(records.iter().map(|r| r.description.as_slice()));
                let rows = records.iter().map(|r| r.to_row(&labels)).collect();
                (ListingRecord::header(&labels), rows)
            }
        };

        let table = ExportTable {
            header: write_header.then_some(header),
            rows,
        };
        let path = write_table(destination, &table, &self.output)?;

        Ok(ExportReport {
            path,
            kind,
            rows: table.rows.len(),
            header: table.header.is_some(),
        })
    }

    fn parse_product(&self, url: &str, body: &str) -> Result<ProductRecord> {
        let document = Document::parse(body);
        let page = document.root();
        let layout = &self.layout;

        let record = ProductRecord {
            name: single(&page, &layout.product_name, url)?,
            article: strip_label(&single(&page, &layout.product_article, url)?),
            description: description(
                &page,
                &layout.product_description,
                &layout.description_entry,
            )?,
            availability: strip_label(&single(&page, &layout.product_stock, url)?),
            price: single(&page, &layout.product_price, url)?,
            old_price: single(&page, &layout.product_old_price, url)?,
            url: url.to_string(),
        };

        tracing::debug!("Extracted '{}' from {}", record.name, url);
        Ok(record)
    }

    fn parse_listing(&self, url: &str, body: &str) -> Result<Vec<ListingRecord>> {
        let document = Document::parse(body);
        let layout = &self.layout;

        let records = document
            .root()
            .scopes(&layout.listing_item)?
            .iter()
            .map(|item| -> Result<ListingRecord> {
                Ok(ListingRecord {
                    name: single(item, &layout.listing_name, url)?,
                    description: description(
                        item,
                        &layout.listing_description,
                        &layout.description_entry,
                    )?,
                    price: single(item, &layout.listing_price, url)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("{} listing records on {}", records.len(), url);
        Ok(records)
    }

    fn page_value(&self, url: &str, body: &str) -> Result<u64> {
        let document = Document::parse(body);
        let page = document.root();

        let quantities = page
            .texts(&self.layout.product_stock)?
            .iter()
            .map(|text| parse_number(&strip_label(text), "quantity", url))
            .collect::<Result<Vec<_>>>()?;

        let prices = page
            .texts(&self.layout.product_price)?
            .iter()
            .map(|text| {
                let amount = text.split_whitespace().next().unwrap_or_default();
                parse_number(amount, "price", url)
            })
            .collect::<Result<Vec<_>>>()?;

        if quantities.len() != prices.len() {
            return Err(HarvestError::SchemaMismatch {
                url: url.to_string(),
                quantities: quantities.len(),
                prices: prices.len(),
            });
        }

        quantities
            .iter()
            .zip(&prices)
            .try_fold(0u64, |total, (q, p)| {
                q.checked_mul(*p).and_then(|value| total.checked_add(value))
            })
            .ok_or_else(|| HarvestError::ValueOverflow {
                url: url.to_string(),
            })
    }
}

/// Text of the first element matching `query`; absence is an incomplete record
fn single(scope: &Scope<'_>, query: &ElementQuery, url: &str) -> Result<String> {
    let mut texts = scope.texts(query)?;

    if texts.len() > 1 {
        tracing::warn!("{} elements match {} on {}, using the first", texts.len(), query, url);
    }

    if texts.is_empty() {
        return Err(HarvestError::MissingElement {
            url: url.to_string(),
            element: query.to_css(),
        });
    }

    Ok(texts.swap_remove(0))
}

/// Entries of the first description container, or none when it is absent
fn description(
    scope: &Scope<'_>,
    container: &ElementQuery,
    entry: &ElementQuery,
) -> Result<Vec<Attribute>> {
    match scope.first(container)? {
        Some(list) => Ok(list
            .texts(entry)?
            .iter()
            .map(|text| Attribute::parse(text))
            .collect()),
        None => Ok(Vec::new()),
    }
}

fn parse_number(text: &str, field: &str, url: &str) -> Result<u64> {
    text.trim().parse().map_err(|_| HarvestError::InvalidNumber {
        url: url.to_string(),
        field: field.to_string(),
        value: text.to_string(),
    })
}
