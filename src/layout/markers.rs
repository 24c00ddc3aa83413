//! List-marker detection.
//!
//! Small named predicates over the start of a line's text, used both to
//! widen the indentation tolerance of a paragraph and to split paragraphs at
//! list item boundaries.

use std::sync::OnceLock;

use regex::Regex;

fn enumeration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\w{1,2}[.)]").expect("valid enumeration regex"))
}

fn bullet_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:[^\w\s(\[{]|o\s)").expect("valid bullet regex"))
}

/// Check for an enumeration marker: one or two word characters followed by
/// `.` or `)`, such as `1.`, `a)` or `12)`.
pub fn is_enumeration_marker(text: &str) -> bool {
    enumeration_regex().is_match(text.trim_start())
}

/// Check for a bullet glyph: a leading character that is not a word
/// character, whitespace or an opening bracket (`•`, `-`, `→`, `*`), or a
/// lone `o` token as OCR reports hollow bullets.
pub fn is_bullet_marker(text: &str) -> bool {
    let text = text.trim_start();
    if text == "o" {
        return true;
    }
    bullet_regex().is_match(text)
}

/// Check for either kind of list marker.
pub fn is_indent_marker(text: &str) -> bool {
    is_enumeration_marker(text) || is_bullet_marker(text)
}
