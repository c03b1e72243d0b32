//! Fragment value type

use serde::{Deserialize, Serialize};

/// A run of text emitted by the extractor, optionally carrying a link target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    /// Set only when the text was emitted inside an open anchor with a known href
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Fragment {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: None,
        }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        let href = href.into();
        Self {
            text: text.into(),
            link: (!href.is_empty()).then_some(href),
        }
    }

    pub fn href(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn is_link(&self) -> bool {
        self.link.is_some()
    }
}
