//! Field extraction and aggregation
//!
//! This module turns fetched pages into records:
//! - Product cards into [`ProductRecord`]s
//! - Listing pages into one [`ListingRecord`] per product summary
//! - Product cards into a total stock value
//!
//! and assembles records into export rows aligned with their header.

mod engine;
mod records;

pub use engine::Extractor;
pub use records::{
    collect_labels, strip_label, Attribute, ListingRecord, ProductRecord,
    LISTING_LEADING_COLUMNS, LISTING_TRAILING_COLUMNS, PRODUCT_LEADING_COLUMNS,
    PRODUCT_TRAILING_COLUMNS,
};
