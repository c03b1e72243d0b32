//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Tab index {index} out of range ({len} tabs)")]
    TabIndexOutOfRange { index: usize, len: usize },

    #[error("Fragment index {index} out of range ({len} fragments)")]
    FragmentIndexOutOfRange { index: usize, len: usize },

    #[error("Fragment {0} is not a link")]
    NotALink(usize),

    #[error("Tab not found: {0}")]
    TabNotFound(String),

    #[error("Navigation already in progress for tab {0}")]
    NavigationPending(String),

    #[error("Tab error: {0}")]
    Tab(#[from] wisp_tabs::TabError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] wisp_navigation::NavigationError),
}
