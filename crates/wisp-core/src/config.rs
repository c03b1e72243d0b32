//! Browser configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use wisp_fetch::FetchOptions;
use wisp_navigation::{InputResolver, DEFAULT_SEARCH_TEMPLATE};
use wisp_session::StartPage;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search engine URL template
    pub search_engine: String,
    /// Local document new tabs start on (built-in page when unset)
    pub start_page: Option<PathBuf>,
    /// User-Agent sent with every HTTP request
    pub user_agent: String,
    pub max_redirects: usize,
    pub request_timeout_secs: u64,
    /// Pixels moved per scroll key press
    pub scroll_step: isize,
}

impl Config {
    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;

        tracing::info!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.search_engine.contains("%s") {
            return Err(CoreError::Config(format!(
                "search engine template has no %s placeholder: {}",
                self.search_engine
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config(
                "request timeout must be at least one second".to_string(),
            ));
        }
        if self.scroll_step <= 0 {
            return Err(CoreError::Config(format!(
                "scroll step must be positive: {}",
                self.scroll_step
            )));
        }
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("wisp").join("config.json"))
            .unwrap_or_else(|| PathBuf::from(".wisp/config.json"))
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            user_agent: self.user_agent.clone(),
            max_redirects: self.max_redirects,
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn resolver(&self) -> InputResolver {
        InputResolver::with_search_engine(self.search_engine.clone())
    }

    /// Load the configured start page, falling back to the built-in one
    pub async fn load_start_page(&self) -> StartPage {
        let Some(path) = self.start_page.as_deref() else {
            return StartPage::builtin();
        };

        match read_start_page(path).await {
            Ok(page) => {
                tracing::info!(url = %page.url, "Using start page from disk");
                page
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Cannot load start page, using built-in page"
                );
                StartPage::builtin()
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let fetch = FetchOptions::default();

        Self {
            search_engine: DEFAULT_SEARCH_TEMPLATE.to_string(),
            start_page: None,
            user_agent: fetch.user_agent,
            max_redirects: fetch.max_redirects,
            request_timeout_secs: fetch.timeout.as_secs(),
            scroll_step: 10,
        }
    }
}

async fn read_start_page(path: &Path) -> Result<StartPage> {
    let absolute = tokio::fs::canonicalize(path).await?;
    let markup = tokio::fs::read(&absolute).await?;
    let url = Url::from_file_path(&absolute)
        .map_err(|_| CoreError::Config(format!("not a file path: {}", absolute.display())))?;

    Ok(StartPage {
        url: url.to_string(),
        title: "Start Page".to_string(),
        markup,
    })
}

// Simple dirs implementation for the config directory
mod dirs {
    use std::path::PathBuf;

    pub fn config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("APPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_CONFIG_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".config"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wisp-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.search_engine, DEFAULT_SEARCH_TEMPLATE);
        assert_eq!(config.user_agent, "Wisp/0.1");
        assert_eq!(config.scroll_step, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = temp_path("partial.json");
        std::fs::write(&path, r#"{ "search_engine": "https://duckduckgo.com/?q=%s" }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.search_engine, "https://duckduckgo.com/?q=%s");
        assert_eq!(config.max_redirects, 10);
        assert_eq!(
            config.resolver().search_url("a b").unwrap(),
            "https://duckduckgo.com/?q=a+b"
        );

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load_or_default(&temp_path("missing.json")).unwrap();
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_invalid_template_rejected() {
        let path = temp_path("bad.json");
        std::fs::write(&path, r#"{ "search_engine": "https://example.com/search" }"#).unwrap();

        assert!(matches!(Config::load(&path), Err(CoreError::Config(_))));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_non_positive_scroll_step_rejected() {
        for step in [0, -10, isize::MIN] {
            let config = Config {
                scroll_step: step,
                ..Config::default()
            };
            assert!(matches!(config.validate(), Err(CoreError::Config(_))));
        }

        let path = temp_path("scroll.json");
        std::fs::write(&path, r#"{ "scroll_step": -9223372036854775808 }"#).unwrap();
        assert!(matches!(Config::load(&path), Err(CoreError::Config(_))));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_malformed_json_rejected() {
        let path = temp_path("malformed.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(CoreError::Serialization(_))
        ));

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_start_page_from_disk() {
        let path = temp_path("start.html");
        std::fs::write(&path, "<p>home</p>").unwrap();

        let config = Config {
            start_page: Some(path.clone()),
            ..Config::default()
        };
        let page = config.load_start_page().await;
        assert!(page.url.starts_with("file://"));
        assert_eq!(page.title, "Start Page");
        assert_eq!(page.markup, b"<p>home</p>");

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_missing_start_page_falls_back() {
        let config = Config {
            start_page: Some(temp_path("no-such-start.html")),
            ..Config::default()
        };
        assert_eq!(config.load_start_page().await, StartPage::builtin());
    }
}
