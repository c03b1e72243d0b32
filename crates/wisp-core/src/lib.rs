//! Wisp Core
//!
//! Central coordination layer for the Wisp shell.
//! The [`Browser`] owns the session and is its only writer; front-ends talk
//! to it through a [`BrowserHandle`] by sending actions and reading snapshots.

mod browser;
mod config;
mod error;

pub use browser::{Browser, BrowserHandle};
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use wisp_fetch::{FetchError, FetchOptions, FetchOutcome, Fetcher, MemoryFetcher, WebFetcher};
pub use wisp_markup::{extract, Fragment};
pub use wisp_navigation::{InputResolver, NavigationError};
pub use wisp_session::{
    layout, Action, FocusMode, NavigationRequest, RenderSnapshot, Session, SessionError,
    StartPage,
};
pub use wisp_tabs::{Tab, TabError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// Events go to stderr so stdout stays free for page output.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
