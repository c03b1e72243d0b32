//! HTTP(S) fetching

use reqwest::redirect::Policy;

use crate::error::{FetchError, NetworkErrorKind};
use crate::fetcher::{FetchOptions, FetchOutcome};
use crate::Result;

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(options: &FetchOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(options.max_redirects))
            .timeout(options.timeout)
            .user_agent(options.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetch the body at `url`. Error statuses still return their body so the
    /// server's error page is shown like any other page.
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let resp = self.client.get(url).send().await.map_err(classify)?;

        let status = resp.status();
        let final_url = resp.url().to_string();
        if status.is_success() {
            tracing::debug!(url = %url, final_url = %final_url, status = %status, "Fetched page");
        } else {
            tracing::warn!(url = %url, final_url = %final_url, status = %status, "Server returned error status");
        }

        let body = resp.bytes().await.map_err(|e| FetchError::Network {
            kind: NetworkErrorKind::Body,
            message: e.to_string(),
        })?;

        Ok(body.to_vec())
    }
}

fn classify(e: reqwest::Error) -> FetchError {
    let message = e.to_string();
    let mut kind = if e.is_timeout() {
        NetworkErrorKind::Timeout
    } else if e.is_connect() {
        NetworkErrorKind::Connect
    } else if e.is_request() || e.is_redirect() {
        NetworkErrorKind::Request
    } else {
        NetworkErrorKind::Unknown
    };

    if kind == NetworkErrorKind::Connect {
        let lowered = message.to_lowercase();
        if lowered.contains("dns") || lowered.contains("resolve") || lowered.contains("name") {
            kind = NetworkErrorKind::Dns;
        } else if lowered.contains("tls")
            || lowered.contains("certificate")
            || lowered.contains("handshake")
        {
            kind = NetworkErrorKind::Tls;
        }
    }

    FetchError::Network { kind, message }
}
