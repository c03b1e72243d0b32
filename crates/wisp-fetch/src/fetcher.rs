//! Fetcher trait and scheme dispatch

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use crate::error::{FetchError, NetworkErrorKind};
use crate::file::FileFetcher;
use crate::http::HttpFetcher;
use crate::Result;

/// Raw page bytes, or why they could not be retrieved
pub type FetchOutcome = Result<Vec<u8>>;

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Value of the User-Agent header
    pub user_agent: String,
    /// Maximum number of redirects followed per request
    pub max_redirects: usize,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: "Wisp/0.1".to_string(),
            max_redirects: 10,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Routes `http`/`https` to the network and `file` to disk
pub struct WebFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl WebFetcher {
    pub fn new(options: &FetchOptions) -> Result<Self> {
        Ok(Self {
            http: HttpFetcher::new(options)?,
            file: FileFetcher,
        })
    }
}

#[async_trait]
impl Fetcher for WebFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

        match parsed.scheme() {
            "http" | "https" => self.http.fetch(url).await,
            "file" => self.file.fetch(url).await,
            other => Err(FetchError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Serves canned pages from memory and records every requested URL
#[derive(Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Fetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        self.requests.lock().push(url.to_string());

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Network {
                kind: NetworkErrorKind::Connect,
                message: format!("no page registered for {url}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_scheme() {
        let fetcher = WebFetcher::new(&FetchOptions::default()).unwrap();
        let result = fetcher.fetch("ftp://example.com/file").await;
        assert_eq!(result, Err(FetchError::UnsupportedScheme("ftp".to_string())));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let fetcher = WebFetcher::new(&FetchOptions::default()).unwrap();
        let result = fetcher.fetch("not a url").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_file_urls_are_routed_to_disk() {
        let path = std::env::temp_dir().join(format!("wisp-web-{}.html", std::process::id()));
        std::fs::write(&path, b"<p>disk</p>").unwrap();
        let url = Url::from_file_path(&path).unwrap();

        let fetcher = WebFetcher::new(&FetchOptions::default()).unwrap();
        let body = fetcher.fetch(url.as_str()).await.unwrap();
        assert_eq!(body, b"<p>disk</p>");

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_memory_fetcher() {
        let fetcher = MemoryFetcher::new().with_page("http://a", "<p>a</p>");

        assert_eq!(fetcher.fetch("http://a").await.unwrap(), b"<p>a</p>");
        assert!(matches!(
            fetcher.fetch("http://b").await,
            Err(FetchError::Network {
                kind: NetworkErrorKind::Connect,
                ..
            })
        ));
        assert_eq!(fetcher.requests(), vec!["http://a", "http://b"]);
    }
}
