//! Line assembly.
//!
//! Words arrive in OCR reading order. Each word either continues the current
//! line or starts a new one, depending on where its top-left corner falls
//! relative to the previous word's bottom-right corner.

use crate::model::{within, GlyphMetrics, Line, TextElement};

use super::options::LayoutOptions;

/// Groups an ordered word list into lines.
#[derive(Debug, Clone, Copy)]
pub struct LineAssembler<'a> {
    metrics: GlyphMetrics,
    options: &'a LayoutOptions,
}

impl<'a> LineAssembler<'a> {
    /// Create an assembler scaled by the page metrics.
    pub fn new(metrics: GlyphMetrics, options: &'a LayoutOptions) -> Self {
        Self { metrics, options }
    }

    /// Check whether `next` sits on the same text line as `prev`, directly
    /// after it.
    pub fn is_adjacent(&self, prev: &TextElement, next: &TextElement) -> bool {
        let anchor = prev.bounding_box.bottom_right();
        let candidate = next.bounding_box.top_left();
        let m = &self.metrics;

        let in_x = within(
            candidate.x,
            anchor.x - m.widths(self.options.word_overlap),
            anchor.x + m.widths(self.options.word_gap),
        );
        let in_y = within(
            candidate.y,
            anchor.y - m.heights(self.options.line_rise_max),
            anchor.y - m.heights(self.options.line_rise_min),
        );
        in_x && in_y
    }

    /// Split the word list into lines. Input order is preserved; every word
    /// ends up in exactly one line.
    pub fn assemble(&self, elements: &[TextElement]) -> Vec<Line> {
        let mut lines = Vec::new();
        let mut current: Vec<TextElement> = Vec::new();

        for element in elements {
            let continues = current
                .last()
                .map(|prev| self.is_adjacent(prev, element))
                .unwrap_or(false);

            if !continues && !current.is_empty() {
                lines.push(Line::new(std::mem::take(&mut current)));
            }
            current.push(element.clone());
        }

        if !current.is_empty() {
            lines.push(Line::new(current));
        }

        log::trace!("Assembled {} words into {} lines", elements.len(), lines.len());
        lines
    }
}

/// Group an ordered word list into lines.
pub fn assemble_lines(
    elements: &[TextElement],
    metrics: GlyphMetrics,
    options: &LayoutOptions,
) -> Vec<Line> {
    LineAssembler::new(metrics, options).assemble(elements)
}
