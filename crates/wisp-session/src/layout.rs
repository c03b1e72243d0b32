//! Shell geometry and click resolution
//!
//! The shell draws a row of fixed-width tab slots, then the URL bar and the
//! search bar, then one line per fragment. Input layers call
//! [`resolve_click`] to turn pointer coordinates into an [`Action`].

use crate::action::Action;
use crate::snapshot::RenderSnapshot;

pub const TAB_WIDTH: i64 = 150;
pub const TAB_HEIGHT: i64 = 18;
/// Start of the close button inside a tab slot
pub const CLOSE_BUTTON_OFFSET: i64 = 140;
pub const NEW_TAB_WIDTH: i64 = 18;
pub const URL_BAR_HEIGHT: i64 = 16;
pub const SEARCH_BAR_HEIGHT: i64 = 16;
pub const CONTENT_TOP: i64 = TAB_HEIGHT + URL_BAR_HEIGHT + SEARCH_BAR_HEIGHT + 4;
pub const CONTENT_LEFT: i64 = 10;
pub const LINE_HEIGHT: i64 = 10;
pub const GLYPH_WIDTH: i64 = 8;
pub const GLYPH_HEIGHT: i64 = 8;

/// Map a click at `(x, y)` to the action it triggers, if any.
///
/// Inside a tab slot the close button takes priority over selecting the tab.
/// Only fragments that carry a link react to clicks.
pub fn resolve_click(snapshot: &RenderSnapshot, x: i64, y: i64) -> Option<Action> {
    if x < 0 || y < 0 {
        return None;
    }

    if y < TAB_HEIGHT {
        return resolve_tab_strip(snapshot.tab_titles.len(), x);
    }

    if y >= CONTENT_TOP {
        return resolve_content(snapshot, x, y);
    }

    None
}

fn resolve_tab_strip(tab_count: usize, x: i64) -> Option<Action> {
    let strip_end = tab_count as i64 * TAB_WIDTH;

    if x < strip_end {
        let slot = (x / TAB_WIDTH) as usize;
        let within = x % TAB_WIDTH;
        return Some(if within >= CLOSE_BUTTON_OFFSET {
            Action::CloseTab(slot)
        } else {
            Action::SelectTab(slot)
        });
    }

    (x < strip_end + NEW_TAB_WIDTH).then_some(Action::OpenTab)
}

fn resolve_content(snapshot: &RenderSnapshot, x: i64, y: i64) -> Option<Action> {
    // Offsets past i64::MAX cannot land on any line.
    let scroll = i64::try_from(snapshot.scroll_offset).ok()?;
    let document_y = (y - CONTENT_TOP).checked_add(scroll)?;
    if document_y % LINE_HEIGHT >= GLYPH_HEIGHT {
        return None;
    }

    let index = usize::try_from(document_y / LINE_HEIGHT).ok()?;
    let fragment = snapshot.current_fragments.get(index)?;
    if !fragment.is_link() {
        return None;
    }

    let width = fragment.text.chars().count() as i64 * GLYPH_WIDTH;
    (x >= CONTENT_LEFT && x < CONTENT_LEFT + width).then_some(Action::ClickFragment(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FocusMode;
    use wisp_markup::Fragment;

    fn snapshot(tabs: usize, fragments: Vec<Fragment>, scroll_offset: usize) -> RenderSnapshot {
        RenderSnapshot {
            tab_titles: vec!["Start Page".to_string(); tabs],
            current_tab_index: 0,
            current_url: "about:start".to_string(),
            current_fragments: fragments,
            scroll_offset,
            focus: FocusMode::UrlBar,
            url_buffer: String::new(),
            search_buffer: String::new(),
            loading: false,
        }
    }

    fn assert_action(action: Option<Action>, expected: &str) {
        assert_eq!(format!("{:?}", action), expected);
    }

    #[test]
    fn test_tab_slot_select() {
        let snap = snapshot(3, Vec::new(), 0);
        assert_action(resolve_click(&snap, 5, 5), "Some(SelectTab(0))");
        assert_action(resolve_click(&snap, 160, 17), "Some(SelectTab(1))");
        assert_action(resolve_click(&snap, 139, 0), "Some(SelectTab(0))");
    }

    #[test]
    fn test_close_region_wins_over_select() {
        let snap = snapshot(3, Vec::new(), 0);
        assert_action(resolve_click(&snap, 140, 5), "Some(CloseTab(0))");
        assert_action(resolve_click(&snap, 299, 5), "Some(CloseTab(1))");
        assert_action(resolve_click(&snap, 445, 5), "Some(CloseTab(2))");
    }

    #[test]
    fn test_new_tab_button() {
        let snap = snapshot(2, Vec::new(), 0);
        assert_action(resolve_click(&snap, 300, 5), "Some(OpenTab)");
        assert_action(resolve_click(&snap, 317, 5), "Some(OpenTab)");
        assert_action(resolve_click(&snap, 318, 5), "None");
    }

    #[test]
    fn test_bars_are_inert() {
        let snap = snapshot(1, vec![Fragment::link("x", "http://x")], 0);
        assert_action(resolve_click(&snap, 12, TAB_HEIGHT), "None");
        assert_action(resolve_click(&snap, 12, CONTENT_TOP - 1), "None");
    }

    #[test]
    fn test_link_lines() {
        let fragments = vec![
            Fragment::text("plain"),
            Fragment::link("link", "http://x"),
        ];
        let snap = snapshot(1, fragments, 0);

        // First line is plain text.
        assert_action(resolve_click(&snap, 12, CONTENT_TOP + 2), "None");
        // Second line, inside the 4-glyph-wide text.
        assert_action(
            resolve_click(&snap, CONTENT_LEFT, CONTENT_TOP + LINE_HEIGHT),
            "Some(ClickFragment(1))",
        );
        assert_action(
            resolve_click(&snap, CONTENT_LEFT + 31, CONTENT_TOP + LINE_HEIGHT + 7),
            "Some(ClickFragment(1))",
        );
        // Past the end of the text, and in the gap between lines.
        assert_action(
            resolve_click(&snap, CONTENT_LEFT + 32, CONTENT_TOP + LINE_HEIGHT),
            "None",
        );
        assert_action(
            resolve_click(&snap, CONTENT_LEFT, CONTENT_TOP + LINE_HEIGHT + 8),
            "None",
        );
    }

    #[test]
    fn test_scroll_shifts_lines() {
        let fragments = vec![
            Fragment::link("a", "http://a"),
            Fragment::link("b", "http://b"),
        ];
        let snap = snapshot(1, fragments, LINE_HEIGHT as usize);
        assert_action(resolve_click(&snap, CONTENT_LEFT, CONTENT_TOP), "Some(ClickFragment(1))");
        assert_action(
            resolve_click(&snap, CONTENT_LEFT, CONTENT_TOP + LINE_HEIGHT),
            "None",
        );
    }

    #[test]
    fn test_click_after_scrolling_to_the_limit() {
        let mut session =
            crate::Session::new(crate::StartPage::builtin(), wisp_navigation::InputResolver::new())
                .unwrap();
        session.scroll(isize::MAX);
        session.scroll(isize::MAX);

        let snap = session.snapshot();
        assert_action(resolve_click(&snap, 20, 100), "None");
        assert_action(resolve_click(&snap, 20, i64::MAX), "None");
        // The tab strip does not depend on scrolling.
        assert_action(resolve_click(&snap, 5, 5), "Some(SelectTab(0))");
    }

    #[test]
    fn test_scroll_offset_beyond_i64() {
        let links = vec![Fragment::link("a", "http://a")];
        assert_action(resolve_click(&snapshot(1, links.clone(), usize::MAX), 20, 100), "None");
        assert_action(
            resolve_click(&snapshot(1, links, i64::MAX as usize), CONTENT_LEFT, CONTENT_TOP),
            "None",
        );
    }

    #[test]
    fn test_negative_coordinates() {
        let snap = snapshot(1, Vec::new(), 0);
        assert_action(resolve_click(&snap, -1, 5), "None");
        assert_action(resolve_click(&snap, 5, -1), "None");
    }
}
