//! Wisp Fetching
//!
//! The session only ever sees the [`Fetcher`] trait: a URL goes in, raw bytes
//! or a [`FetchError`] come out.
//! - `http` / `https` go through a reqwest client that follows redirects
//! - `file` URLs are read from disk
//! - every other scheme is rejected

mod error;
mod fetcher;
mod file;
mod http;

pub use error::{FetchError, NetworkErrorKind};
pub use fetcher::{FetchOptions, FetchOutcome, Fetcher, MemoryFetcher, WebFetcher};
pub use file::FileFetcher;
pub use http::HttpFetcher;

pub type Result<T> = std::result::Result<T, FetchError>;
