//! Paragraph assembly.
//!
//! Lines are grouped by indentation and vertical spacing, then each group is
//! cut again at list items and at short heading lines that were glued onto
//! the text below them.

use crate::model::{
    join_words, within, within_tolerance, GlyphMetrics, Line, Paragraph, Point, Rect, TextElement,
};

use super::markers::is_indent_marker;
use super::options::LayoutOptions;

/// Groups lines into paragraph records.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphAssembler<'a> {
    metrics: GlyphMetrics,
    options: &'a LayoutOptions,
}

impl<'a> ParagraphAssembler<'a> {
    /// Create an assembler scaled by the page metrics.
    pub fn new(metrics: GlyphMetrics, options: &'a LayoutOptions) -> Self {
        Self { metrics, options }
    }

    /// Group lines into paragraphs, in input order.
    pub fn assemble(&self, lines: &[Line]) -> Vec<Paragraph> {
        let mut paragraphs = Vec::new();
        let mut accumulated: Vec<Line> = Vec::new();

        for line in lines.iter().filter(|l| !l.is_empty()) {
            let continues = match accumulated.last() {
                Some(prev) => self.is_next_line(prev, line, &accumulated),
                None => false,
            };

            if !continues && !accumulated.is_empty() {
                self.close(std::mem::take(&mut accumulated), &mut paragraphs);
            }
            accumulated.push(line.clone());
        }

        if !accumulated.is_empty() {
            self.close(accumulated, &mut paragraphs);
        }

        paragraphs
    }

    fn close(&self, lines: Vec<Line>, out: &mut Vec<Paragraph>) {
        for segment in self.split(lines) {
            if let Some(paragraph) = self.build_paragraph_record(&segment) {
                log::trace!(
                    "Paragraph with {} lines at x={:.1}: {:?}",
                    paragraph.line_count,
                    paragraph.left(),
                    paragraph.trimmed()
                );
                out.push(paragraph);
            }
        }
    }

    /// Check whether `line` continues the paragraph whose lines so far are
    /// `accumulated` (ending with `prev`).
    ///
    /// The horizontal anchor is the paragraph's first line. When that line
    /// opens with a list marker the anchor moves to its second word, so the
    /// hanging indent of the item's text is what continuation lines align to.
    pub fn is_next_line(&self, prev: &Line, line: &Line, accumulated: &[Line]) -> bool {
        let Some(candidate) = line.first() else {
            return false;
        };
        let Some(first_line) = accumulated.first() else {
            return false;
        };

        let marked = is_indent_marker(&first_line.text());
        let anchor = if marked && first_line.len() >= 2 {
            first_line.second()
        } else {
            first_line.first()
        };
        let Some(anchor) = anchor else {
            return false;
        };

        let w = self.metrics.avg_width;
        let h = self.metrics.avg_height;
        let tolerance = if marked {
            self.options.marked_indent_tolerance
        } else {
            self.options.indent_tolerance
        } * w;

        let bottom = prev.bottom();
        let in_x = within_tolerance(candidate.left(), anchor.left(), tolerance);
        let in_y = within(
            candidate.top(),
            bottom - self.options.line_overlap * h,
            bottom + self.options.line_spacing * h,
        );
        in_x && in_y
    }

    /// Cut a closed group of lines at internal paragraph boundaries.
    pub fn split(&self, lines: Vec<Line>) -> Vec<Vec<Line>> {
        let mut segments: Vec<Vec<Line>> = Vec::new();
        let mut current: Vec<Line> = Vec::new();
        let mut segment_marked = false;

        for line in lines {
            let boundary = match current.last() {
                Some(prev) => self.is_boundary(prev, &line, segment_marked),
                None => false,
            };

            if boundary {
                log::trace!("Splitting paragraph before {:?}", line.text());
                segments.push(std::mem::take(&mut current));
            }
            if current.is_empty() {
                segment_marked = is_indent_marker(&line.text());
            }
            current.push(line);
        }

        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    fn is_boundary(&self, prev: &Line, line: &Line, segment_marked: bool) -> bool {
        if is_indent_marker(&line.text()) {
            return true;
        }

        let Some(first) = line.first() else {
            return false;
        };

        let ends_sentence = prev
            .last()
            .map(|w| w.trimmed().ends_with(['.', '!', '?']))
            .unwrap_or(false);
        if ends_sentence || !is_capitalized(first.trimmed()) {
            return false;
        }

        let continues_entity = line.second().is_some_and(|w| is_capitalized(w.trimmed()))
            || prev.last().is_some_and(|w| is_capitalized(w.trimmed()));
        if continues_entity {
            return false;
        }

        let heading_like = prev.width() * self.options.heading_width_ratio < line.width();
        heading_like || segment_marked
    }

    /// Flatten lines into a paragraph record.
    ///
    /// The box spans every member word, except that a short leading glyph set
    /// well apart from the next word (a bullet) does not count towards the
    /// left edge. Returns `None` for an empty line list.
    pub fn build_paragraph_record(&self, lines: &[Line]) -> Option<Paragraph> {
        let members: Vec<TextElement> = lines
            .iter()
            .flat_map(|l| l.elements.iter().cloned())
            .collect();
        if members.is_empty() {
            return None;
        }

        let mut left = f32::MAX;
        let mut top = f32::MAX;
        let mut right = f32::MIN;
        let mut bottom = f32::MIN;
        for m in &members {
            left = left.min(m.left());
            top = top.min(m.top());
            right = right.max(m.right());
            bottom = bottom.max(m.bottom());
        }

        if let Some(corrected) = self.bullet_corrected_left(&members) {
            log::trace!("Bullet correction moves left edge {:.1} -> {:.1}", left, corrected);
            left = corrected;
        }

        Some(Paragraph {
            text: join_words(&members),
            bounding_box: Rect::new(Point::new(left, top), Point::new(right, bottom)),
            members,
            line_count: lines.len(),
        })
    }

    fn bullet_corrected_left(&self, members: &[TextElement]) -> Option<f32> {
        let mut by_left: Vec<&TextElement> = members.iter().collect();
        by_left.sort_by(|a, b| a.left().total_cmp(&b.left()));

        let leftmost = by_left.first()?;
        let second = by_left.get(1)?;

        let short = leftmost.trimmed().chars().count() <= self.options.bullet_max_chars;
        let gap = second.left() - leftmost.right();
        if short && gap > self.options.bullet_gap * self.metrics.avg_width {
            Some(second.left() - leftmost.width())
        } else {
            None
        }
    }
}

/// Group lines into paragraph records.
pub fn assemble_paragraphs(
    lines: &[Line],
    metrics: GlyphMetrics,
    options: &LayoutOptions,
) -> Vec<Paragraph> {
    ParagraphAssembler::new(metrics, options).assemble(lines)
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: GlyphMetrics = GlyphMetrics::new(10.0, 20.0);

    fn line(words: &[(&str, f32)], y: f32) -> Line {
        Line::new(
            words
                .iter()
                .map(|(t, x)| TextElement::at(*t, *x, y, t.chars().count() as f32 * 10.0, 20.0))
                .collect(),
        )
    }

    #[test]
    fn test_continuation_lines_join() {
        let options = LayoutOptions::default();
        let lines = vec![
            line(&[("The", 0.0), ("cat", 40.0), ("sat", 80.0)], 0.0),
            line(&[("on", 0.0), ("the", 30.0), ("mat.", 70.0)], 25.0),
        ];
        let paragraphs = assemble_paragraphs(&lines, METRICS, &options);

        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].text, "The cat sat on the mat.");
        assert_eq!(paragraphs[0].line_count, 2);
    }

    #[test]
    fn test_vertical_gap_breaks_paragraph() {
        let options = LayoutOptions::default();
        let lines = vec![
            line(&[("First", 0.0), ("block.", 60.0)], 0.0),
            line(&[("Second", 0.0), ("block.", 70.0)], 80.0),
        ];
        let paragraphs = assemble_paragraphs(&lines, METRICS, &options);
        assert_eq!(paragraphs.len(), 2);
    }

    #[test]
    fn test_indent_breaks_paragraph() {
        let options = LayoutOptions::default();
        let lines = vec![
            line(&[("Heading", 0.0)], 0.0),
            line(&[("indented", 60.0), ("text", 150.0)], 25.0),
        ];
        let paragraphs = assemble_paragraphs(&lines, METRICS, &options);
        assert_eq!(paragraphs.len(), 2);
    }

    #[test]
    fn test_marked_line_anchors_on_second_word() {
        let options = LayoutOptions::default();
        let assembler = ParagraphAssembler::new(METRICS, &options);
        let first = line(&[("-", 0.0), ("item", 40.0), ("text", 90.0)], 0.0);
        // Hanging indent aligned with "item", beyond the plain tolerance of
        // the dash but inside the marked tolerance of the second word.
        let next = line(&[("more", 80.0)], 25.0);
        assert!(assembler.is_next_line(&first, &next, std::slice::from_ref(&first)));
    }

    #[test]
    fn test_bullet_split() {
        let options = LayoutOptions::default();
        let lines = vec![
            line(&[("-", 0.0), ("first", 20.0), ("point", 80.0)], 0.0),
            line(&[("Another", 20.0), ("idea", 100.0)], 25.0),
        ];
        let paragraphs = assemble_paragraphs(&lines, METRICS, &options);

        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text, "- first point");
        assert_eq!(paragraphs[1].text, "Another idea");
    }

    #[test]
    fn test_marker_lines_split() {
        let options = LayoutOptions::default();
        let lines = vec![
            line(&[("1.", 0.0), ("alpha", 30.0)], 0.0),
            line(&[("2.", 0.0), ("beta", 30.0)], 25.0),
            line(&[("3.", 0.0), ("gamma", 30.0)], 50.0),
        ];
        let paragraphs = assemble_paragraphs(&lines, METRICS, &options);
        let texts: Vec<&str> = paragraphs.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["1. alpha", "2. beta", "3. gamma"]);
    }

    #[test]
    fn test_entity_continuation_does_not_split() {
        let options = LayoutOptions::default();
        let assembler = ParagraphAssembler::new(METRICS, &options);
        let segments = assembler.split(vec![
            line(&[("-", 0.0), ("visit", 20.0), ("New", 80.0)], 0.0),
            line(&[("York", 20.0), ("city", 70.0)], 25.0),
        ]);
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_comparable_widths_do_not_split() {
        let options = LayoutOptions::default();
        let assembler = ParagraphAssembler::new(METRICS, &options);
        let segments = assembler.split(vec![
            line(&[("Short", 0.0), ("line", 60.0)], 0.0),
            line(&[("Next", 0.0), ("line", 50.0)], 25.0),
        ]);
        // Not marked and widths are comparable.
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_short_heading_split() {
        let options = LayoutOptions::default();
        let assembler = ParagraphAssembler::new(METRICS, &options);
        let long: Vec<(&str, f32)> = (0..40).map(|i| ("word", i as f32 * 50.0)).collect();
        let mut long_line = line(&long, 25.0);
        long_line.elements[0].text = "Body".to_string();
        let segments = assembler.split(vec![line(&[("overview", 0.0)], 0.0), long_line]);
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_bullet_correction() {
        let options = LayoutOptions::default();
        let assembler = ParagraphAssembler::new(METRICS, &options);
        let lines = vec![line(&[("•", 0.0), ("Point", 40.0)], 0.0)];
        let paragraph = assembler.build_paragraph_record(&lines).unwrap();

        // "•" is 10 wide with a 30 gap; left edge becomes 40 - 10.
        assert_eq!(paragraph.left(), 30.0);
        assert_eq!(paragraph.bounding_box.bottom_right.x, 90.0);
    }

    #[test]
    fn test_no_bullet_correction_for_tight_gap() {
        let options = LayoutOptions::default();
        let assembler = ParagraphAssembler::new(METRICS, &options);
        let lines = vec![line(&[("A", 0.0), ("Point", 15.0)], 0.0)];
        let paragraph = assembler.build_paragraph_record(&lines).unwrap();
        assert_eq!(paragraph.left(), 0.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let options = LayoutOptions::default();
        assert!(assemble_paragraphs(&[], METRICS, &options).is_empty());

        let single = vec![line(&[("Word", 5.0)], 0.0)];
        let paragraphs = assemble_paragraphs(&single, METRICS, &options);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].word_count(), 1);
    }
}
