//! Input resolution for the address and search bars

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::NavigationError;
use crate::Result;

/// Search engine URL template (`%s` replaced with the query)
pub const DEFAULT_SEARCH_TEMPLATE: &str = "https://www.google.com/search?q=%s";

const RECOGNIZED_SCHEMES: [&str; 3] = ["http://", "https://", "file://"];

/// Whether `input` already starts with a scheme the fetcher understands.
fn has_recognized_scheme(input: &str) -> bool {
    RECOGNIZED_SCHEMES.iter().any(|scheme| {
        input
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputResolver {
    search_template: String,
}

impl InputResolver {
    pub fn new() -> Self {
        Self {
            search_template: DEFAULT_SEARCH_TEMPLATE.to_string(),
        }
    }

    pub fn with_search_engine(template: String) -> Self {
        Self {
            search_template: template,
        }
    }

    pub fn set_search_engine(&mut self, template: String) {
        self.search_template = template;
    }

    pub fn search_template(&self) -> &str {
        &self.search_template
    }

    /// Turn address bar input into a fetchable URL
    pub fn normalize(&self, input: &str) -> Result<String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(NavigationError::EmptyInput);
        }

        if has_recognized_scheme(input) {
            return Ok(input.to_string());
        }

        let url = format!("http://{}", input);
        tracing::debug!(input = %input, url = %url, "Prepended default scheme");
        Ok(url)
    }

    /// Build the search URL for a query
    pub fn search_url(&self, query: &str) -> Result<String> {
        if query.trim().is_empty() {
            return Err(NavigationError::EmptyInput);
        }

        let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        Ok(self.search_template.replace("%s", &encoded))
    }
}

impl Default for InputResolver {
    fn default() -> Self {
        Self::new()
    }
}
