//! Wisp Markup Extraction
//!
//! Turns raw markup bytes into a flat, ordered list of display fragments.
//! There is no DOM: tags only matter for splitting text and for tracking
//! whether an anchor is currently open.

mod extract;
mod fragment;

pub use extract::extract;
pub use fragment::Fragment;
