//! Wisp Navigation
//!
//! Address bar input is normalized before it is fetched:
//! - `http://`, `https://` and `file://` URLs pass through unchanged
//! - anything else gets `http://` prepended
//!
//! Search bar input is substituted into a search engine URL template.

mod error;
mod input;

pub use error::NavigationError;
pub use input::{InputResolver, DEFAULT_SEARCH_TEMPLATE};

pub type Result<T> = std::result::Result<T, NavigationError>;
