//! Read-only view of the session for renderers

use serde::Serialize;
use wisp_markup::Fragment;

use crate::session::FocusMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderSnapshot {
    pub tab_titles: Vec<String>,
    pub current_tab_index: usize,
    pub current_url: String,
    pub current_fragments: Vec<Fragment>,
    pub scroll_offset: usize,
    pub focus: FocusMode,
    pub url_buffer: String,
    pub search_buffer: String,
    /// The current tab is waiting on a fetch
    pub loading: bool,
}
