//! Line and paragraph records produced by the layout stages.

use serde::{Deserialize, Serialize};

use super::{Rect, TextElement};

/// A run of words judged to sit on the same text line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Words in reading order
    pub elements: Vec<TextElement>,
}

impl Line {
    /// Create a line from its words.
    pub fn new(elements: Vec<TextElement>) -> Self {
        Self { elements }
    }

    /// First word of the line.
    pub fn first(&self) -> Option<&TextElement> {
        self.elements.first()
    }

    /// Second word of the line, if there is one.
    pub fn second(&self) -> Option<&TextElement> {
        self.elements.get(1)
    }

    /// Last word of the line.
    pub fn last(&self) -> Option<&TextElement> {
        self.elements.last()
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the line has no words.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Combined text of all words.
    pub fn text(&self) -> String {
        join_words(&self.elements)
    }

    /// Left edge (first word's top-left x).
    pub fn left(&self) -> f32 {
        self.first().map(|e| e.left()).unwrap_or(0.0)
    }

    /// Lowest bottom edge of any word on the line.
    pub fn bottom(&self) -> f32 {
        self.elements
            .iter()
            .map(|e| e.bottom())
            .fold(f32::MIN, f32::max)
    }

    /// Horizontal extent from the leftmost to the rightmost edge.
    pub fn width(&self) -> f32 {
        if self.elements.is_empty() {
            return 0.0;
        }
        let left = self.elements.iter().map(|e| e.left()).fold(f32::MAX, f32::min);
        let right = self.elements.iter().map(|e| e.right()).fold(f32::MIN, f32::max);
        (right - left).max(0.0)
    }
}

/// A paragraph: consecutive lines grouped by indentation and spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Flattened text of every member word
    pub text: String,
    /// Visual extent, with bullet glyphs excluded from the left edge
    pub bounding_box: Rect,
    /// Member words in reading order
    pub members: Vec<TextElement>,
    /// Number of source lines
    pub line_count: usize,
}

impl Paragraph {
    /// Left edge used for indentation layering.
    pub fn left(&self) -> f32 {
        self.bounding_box.top_left.x
    }

    /// Top edge used for parent matching.
    pub fn top(&self) -> f32 {
        self.bounding_box.top_left.y
    }

    /// Number of member words.
    pub fn word_count(&self) -> usize {
        self.members.len()
    }

    /// Text without surrounding whitespace.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Check if the paragraph carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Concatenate word texts, inserting a space only where OCR did not
/// already report one.
pub fn join_words<'a, I>(words: I) -> String
where
    I: IntoIterator<Item = &'a TextElement>,
{
    let mut result = String::new();
    for word in words {
        let needs_space = !result.is_empty()
            && !result.ends_with(char::is_whitespace)
            && !word.text.starts_with(char::is_whitespace);
        if needs_space {
            result.push(' ');
        }
        result.push_str(&word.text);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_words_respects_ocr_spaces() {
        let words = vec![
            TextElement::at("Hello ", 0.0, 0.0, 50.0, 10.0),
            TextElement::at("big", 60.0, 0.0, 30.0, 10.0),
            TextElement::at("world", 100.0, 0.0, 50.0, 10.0),
        ];
        assert_eq!(join_words(&words), "Hello big world");
    }

    #[test]
    fn test_line_geometry() {
        let line = Line::new(vec![
            TextElement::at("a", 10.0, 0.0, 10.0, 10.0),
            TextElement::at("b", 30.0, 2.0, 20.0, 12.0),
        ]);
        assert_eq!(line.left(), 10.0);
        assert_eq!(line.bottom(), 14.0);
        assert_eq!(line.width(), 40.0);
        assert_eq!(line.second().map(|e| e.text.as_str()), Some("b"));
    }

    #[test]
    fn test_empty_line() {
        let line = Line::new(Vec::new());
        assert!(line.is_empty());
        assert_eq!(line.width(), 0.0);
        assert_eq!(line.text(), "");
    }
}
