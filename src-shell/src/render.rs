//! Plain-text rendering of snapshots

use std::fmt::Write;

use wisp_core::layout::LINE_HEIGHT;
use wisp_core::{FocusMode, Fragment, RenderSnapshot};

/// Title length shown in each tab slot
const TITLE_WIDTH: usize = 15;

pub fn render(snapshot: &RenderSnapshot, max_lines: usize) -> String {
    let mut out = String::new();

    for (i, title) in snapshot.tab_titles.iter().enumerate() {
        let marker = if i == snapshot.current_tab_index { '*' } else { ' ' };
        let short: String = title.chars().take(TITLE_WIDTH).collect();
        let _ = write!(out, "[{marker}{i} {short}] ");
    }
    out.push_str("[+]\n");

    let url_line = if snapshot.url_buffer.is_empty() {
        snapshot.current_url.as_str()
    } else {
        snapshot.url_buffer.as_str()
    };
    let search_line = if snapshot.search_buffer.is_empty() {
        "Search..."
    } else {
        snapshot.search_buffer.as_str()
    };
    let (url_cursor, search_cursor) = match snapshot.focus {
        FocusMode::UrlBar => ('>', ' '),
        FocusMode::SearchBar => (' ', '>'),
    };
    let _ = writeln!(out, "{url_cursor} url:    {url_line}");
    let _ = writeln!(out, "{search_cursor} search: {search_line}");

    if snapshot.loading {
        out.push_str("  (loading...)\n");
    }
    out.push('\n');

    let first = snapshot.scroll_offset / LINE_HEIGHT as usize;
    for (i, fragment) in snapshot
        .current_fragments
        .iter()
        .enumerate()
        .skip(first)
        .take(max_lines)
    {
        out.push_str(&render_fragment(i, fragment));
        out.push('\n');
    }

    out
}

pub fn render_fragment(index: usize, fragment: &Fragment) -> String {
    match fragment.href() {
        Some(href) => format!("{index:>4}  {} <{href}>", fragment.text),
        None => format!("{index:>4}  {}", fragment.text),
    }
}
