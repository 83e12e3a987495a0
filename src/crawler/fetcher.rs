//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - The [`Fetch`] capability both engines are generic over
//! - Building the shared, pooled HTTP client
//! - Classifying transport failures into [`FetchError`]

use crate::config::HttpConfig;
use crate::{FetchError, Result};
use futures::future::try_join_all;
use futures::FutureExt;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Turns a URL into page text
///
/// Implementations must fail with [`FetchError`] rather than hand back an
/// error body as page content.
pub trait Fetch: Sync {
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = std::result::Result<String, FetchError>> + Send;
}

/// Fetches every URL concurrently and parses each page as it arrives
///
/// Results come back in URL order whatever order the responses complete in.
/// The first failure, fetch or parse, fails the whole batch.
pub async fn fetch_batch<F, T, P>(fetcher: &F, urls: &[String], parse: P) -> Result<Vec<T>>
where
    F: Fetch,
    P: Fn(&str, &str) -> Result<T>,
{
    let parse = &parse;
    let tasks = urls.iter().map(|url| {
        fetcher.fetch(url).map(move |fetched| -> Result<T> {
            let body = fetched?;
            parse(url.as_str(), &body)
        })
    });

    try_join_all(tasks).await
}

/// Builds an HTTP client with proper configuration
///
/// The client keeps a connection pool, so one instance is shared by every
/// fetch of a run.
///
/// # Example
///
/// ```no_run
/// use shop_harvest::config::HttpConfig;
/// use shop_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`Fetch`] over a pooled reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher with its own client
    pub fn new(config: &HttpConfig) -> std::result::Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    /// Fetches a URL and decodes its body as UTF-8
    ///
    /// The shop does not always declare its charset, so the body is decoded
    /// as UTF-8 regardless of the Content-Type header.
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx | page text |
    /// | Other status | `FetchError::Status` |
    /// | Timeout | `FetchError::Timeout` |
    /// | Connection / body error | `FetchError::Network` |
    async fn fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_error(url, e))?;

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Maps a reqwest error onto the transport failure taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            source: error,
        }
    }
}
