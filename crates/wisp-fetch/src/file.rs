//! Local file fetching

use url::Url;

use crate::error::FetchError;
use crate::fetcher::FetchOutcome;

pub struct FileFetcher;

impl FileFetcher {
    /// Read the file named by a `file://` URL
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        let path = parsed
            .to_file_path()
            .map_err(|_| FetchError::InvalidUrl(format!("{url}: not a local file path")))?;

        let body = tokio::fs::read(&path).await.map_err(|e| FetchError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), bytes = body.len(), "Read local file");

        Ok(body)
    }
}
