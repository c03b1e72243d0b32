//! Tab data structure

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wisp_markup::Fragment;

use crate::error::TabError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    /// Unique identifier, used to route navigation results back to the tab
    pub id: String,
    /// Current URL
    pub url: String,
    /// Title shown in the tab strip
    pub title: String,
    /// Extracted page content, in document order
    pub fragments: Vec<Fragment>,
    /// A fetch for this tab is outstanding
    pub loading: bool,
    /// When the outstanding fetch started
    pub loading_since: Option<DateTime<Utc>>,
}

impl Tab {
    pub fn new(url: String, title: String, fragments: Vec<Fragment>) -> Result<Self> {
        if url.is_empty() {
            return Err(TabError::InvalidUrl("URL cannot be empty".to_string()));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            url,
            title,
            fragments,
            loading: false,
            loading_since: None,
        })
    }

    /// Mark a fetch as outstanding
    pub fn start_loading(&mut self) {
        self.loading = true;
        self.loading_since = Some(Utc::now());
    }

    /// Replace the tab's page (navigation finished)
    pub fn replace_content(
        &mut self,
        url: String,
        title: String,
        fragments: Vec<Fragment>,
    ) -> Result<()> {
        if url.is_empty() {
            return Err(TabError::InvalidUrl("URL cannot be empty".to_string()));
        }

        tracing::debug!(
            tab_id = %self.id,
            from = %self.url,
            to = %url,
            fragments = fragments.len(),
            "Tab content replaced"
        );

        self.url = url;
        self.title = title;
        self.fragments = fragments;
        self.loading = false;
        self.loading_since = None;

        Ok(())
    }

    /// Get display title (with fallback to URL)
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }

    /// Time spent on the outstanding fetch, if any
    pub fn loading_elapsed(&self) -> Option<Duration> {
        self.loading_since.map(|since| Utc::now() - since)
    }

    pub fn fragment(&self, index: usize) -> Option<&Fragment> {
        self.fragments.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tab() {
        let tab = Tab::new(
            "about:start".to_string(),
            "Start Page".to_string(),
            vec![Fragment::text("hello")],
        )
        .unwrap();
        assert_eq!(tab.url, "about:start");
        assert_eq!(tab.fragments.len(), 1);
        assert!(!tab.loading);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Tab::new("a:".to_string(), String::new(), Vec::new()).unwrap();
        let b = Tab::new("a:".to_string(), String::new(), Vec::new()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_replace_content() {
        let mut tab = Tab::new("about:start".to_string(), "Start".to_string(), Vec::new()).unwrap();
        assert!(tab.loading_elapsed().is_none());
        tab.start_loading();
        assert!(tab.loading);
        assert!(tab.loading_elapsed().is_some_and(|d| d >= Duration::zero()));

        tab.replace_content(
            "http://example.com".to_string(),
            "http://example.com".to_string(),
            vec![Fragment::link("more", "/more")],
        )
        .unwrap();

        assert!(!tab.loading);
        assert!(tab.loading_elapsed().is_none());
        assert_eq!(tab.url, "http://example.com");
        assert_eq!(tab.fragment(0).and_then(Fragment::href), Some("/more"));
        assert!(tab.fragment(1).is_none());
    }

    #[test]
    fn test_display_title_falls_back_to_url() {
        let tab = Tab::new("http://x".to_string(), String::new(), Vec::new()).unwrap();
        assert_eq!(tab.display_title(), "http://x");
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(Tab::new(String::new(), String::new(), Vec::new()).is_err());
    }
}
