//! Wisp Tabs
//!
//! A tab is a URL, a title and the fragments extracted from the last page
//! loaded into it. Tabs are owned by the session and replaced wholesale on
//! navigation.

mod error;
mod tab;

pub use error::TabError;
pub use tab::Tab;

pub type Result<T> = std::result::Result<T, TabError>;
