//! Crawler module for page fetching and URL discovery
//!
//! This module contains:
//! - The fetch capability and its HTTP implementation
//! - HTML element queries
//! - The three-level product URL discovery engine

mod discovery;
mod fetcher;
mod parser;

pub use discovery::UrlDiscovery;
pub use fetcher::{build_http_client, fetch_batch, Fetch, HttpFetcher};
pub use parser::{Document, ElementQuery, Scope};
