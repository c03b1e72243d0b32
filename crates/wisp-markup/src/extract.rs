//! Single-pass markup scanner
//!
//! The scanner never fails. Malformed input simply produces odd-looking
//! fragments. Anchors are tracked with a flag rather than a stack, so the most
//! recent `<a>` or `</a>` decides whether text is a link.

use crate::fragment::Fragment;

/// Extract the ordered text/link fragments from raw markup.
pub fn extract(raw: &[u8]) -> Vec<Fragment> {
    let mut scanner = Scanner::default();

    for (pos, &byte) in raw.iter().enumerate() {
        match byte {
            b'<' => scanner.open_tag(raw, pos),
            b'>' => scanner.inside_tag = false,
            _ if !scanner.inside_tag => scanner.text.push(byte),
            _ => {}
        }
    }
    scanner.flush();

    tracing::trace!(
        bytes = raw.len(),
        fragments = scanner.fragments.len(),
        "Extracted fragments"
    );

    scanner.fragments
}

#[derive(Default)]
struct Scanner {
    inside_tag: bool,
    link_active: bool,
    href: String,
    text: Vec<u8>,
    fragments: Vec<Fragment>,
}

impl Scanner {
    fn open_tag(&mut self, raw: &[u8], start: usize) {
        self.flush();
        self.inside_tag = true;

        let tag = TagHead::parse(raw, start);
        if tag.name != b"a" {
            return;
        }

        if tag.closing {
            self.link_active = false;
        } else {
            self.link_active = true;
            // Without a quoted href the previous target is kept.
            if let Some(href) = find_href(raw, start) {
                self.href = href;
            }
        }
    }

    fn flush(&mut self) {
        if self.text.is_empty() {
            return;
        }

        let text = String::from_utf8_lossy(&self.text).into_owned();
        self.text.clear();

        let fragment = if self.link_active {
            Fragment::link(text, self.href.as_str())
        } else {
            Fragment::text(text)
        };
        self.fragments.push(fragment);
    }
}

struct TagHead {
    closing: bool,
    name: Vec<u8>,
}

impl TagHead {
    /// Parse the tag starting at the `<` found at `start`.
    fn parse(raw: &[u8], start: usize) -> Self {
        let mut pos = start + 1;
        let closing = raw.get(pos) == Some(&b'/');
        if closing {
            pos += 1;
        }

        let name = raw
            .get(pos..)
            .unwrap_or_default()
            .iter()
            .take_while(|&&b| b != b'>' && !is_space(b))
            .map(u8::to_ascii_lowercase)
            .collect();

        Self { closing, name }
    }
}

/// Same set as C's `isspace`, which includes vertical tab.
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

fn find_from(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    haystack
        .get(start..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|i| start + i)
}

/// The `href=` search is not bounded by the tag's closing `>`.
fn find_href(raw: &[u8], tag_start: usize) -> Option<String> {
    let attr = find_from(raw, b"href=", tag_start)?;
    let open = find_from(raw, b"\"", attr)?;
    let close = find_from(raw, b"\"", open + 1)?;
    Some(String::from_utf8_lossy(&raw[open + 1..close]).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(fragments: &[Fragment]) -> Vec<&str> {
        fragments.iter().map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(extract(b"").is_empty());
    }

    #[test]
    fn test_plain_paragraph() {
        assert_eq!(extract(b"<p>hello</p>"), vec![Fragment::text("hello")]);
    }

    #[test]
    fn test_anchor_with_href() {
        assert_eq!(
            extract(b"<a href=\"http://x\">click</a>"),
            vec![Fragment::link("click", "http://x")]
        );
    }

    #[test]
    fn test_tags_split_text() {
        assert_eq!(
            extract(b"plain<br>text"),
            vec![Fragment::text("plain"), Fragment::text("text")]
        );
    }

    #[test]
    fn test_text_outside_tags_is_verbatim() {
        let fragments = extract(b"<p>  a &amp; b\n</p>");
        assert_eq!(texts(&fragments), vec!["  a &amp; b\n"]);
    }

    #[test]
    fn test_closing_anchor_ends_link() {
        let fragments = extract(b"before<a href=\"/next\">go</a>after");
        assert_eq!(
            fragments,
            vec![
                Fragment::text("before"),
                Fragment::link("go", "/next"),
                Fragment::text("after"),
            ]
        );
    }

    #[test]
    fn test_tag_name_is_case_insensitive() {
        let fragments = extract(b"<A href=\"http://x\">up</A>down");
        assert_eq!(
            fragments,
            vec![Fragment::link("up", "http://x"), Fragment::text("down")]
        );
    }

    #[test]
    fn test_href_attribute_is_case_sensitive() {
        // HREF= is not recognized and nothing later provides an href.
        let fragments = extract(b"<a HREF=\"http://x\">up</a>");
        assert_eq!(fragments, vec![Fragment::text("up")]);
    }

    #[test]
    fn test_single_quoted_href_is_ignored() {
        let fragments = extract(b"<a href='http://x'>up</a>");
        assert_eq!(fragments, vec![Fragment::text("up")]);
    }

    #[test]
    fn test_missing_href_retains_previous_target() {
        let fragments = extract(b"<a href=\"first\">one</a><a name=\"n\">two</a>");
        // `name="n"` is not an href, so the scan finds nothing and "first" is kept.
        assert_eq!(
            fragments,
            vec![Fragment::link("one", "first"), Fragment::link("two", "first")]
        );
    }

    #[test]
    fn test_href_scan_runs_past_tag_end() {
        let fragments = extract(b"<a>one</a><a href=\"two\">second</a>");
        assert_eq!(
            fragments,
            vec![Fragment::link("one", "two"), Fragment::link("second", "two")]
        );
    }

    #[test]
    fn test_nested_anchors_are_not_a_stack() {
        let fragments =
            extract(b"<a href=\"outer\">x<a href=\"inner\">y</a>z</a>w");
        assert_eq!(
            fragments,
            vec![
                Fragment::link("x", "outer"),
                Fragment::link("y", "inner"),
                Fragment::text("z"),
                Fragment::text("w"),
            ]
        );
    }

    #[test]
    fn test_other_tags_starting_with_a_are_ignored() {
        let fragments = extract(b"<abbr title=\"t\">abbr</abbr><area href=\"x\">");
        assert_eq!(fragments, vec![Fragment::text("abbr")]);
    }

    #[test]
    fn test_stray_closing_bracket_is_dropped() {
        assert_eq!(texts(&extract(b"a > b")), vec!["a  b"]);
    }

    #[test]
    fn test_unterminated_tag_swallows_rest() {
        assert_eq!(texts(&extract(b"keep<p class=\"x\" trailing")), vec!["keep"]);
    }

    #[test]
    fn test_trailing_text_uses_open_link() {
        let fragments = extract(b"<a href=\"u\">never closed");
        assert_eq!(fragments, vec![Fragment::link("never closed", "u")]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let fragments = extract(b"caf\xE9");
        assert_eq!(fragments, vec![Fragment::text("caf\u{FFFD}")]);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let page = b"<html><body><h1>T</h1><a href=\"/a\">A</a> tail</body></html>";
        assert_eq!(extract(page), extract(page));
    }
}
