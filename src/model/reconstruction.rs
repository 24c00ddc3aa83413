//! Per-page reconstruction result and statistics.

use serde::{Deserialize, Serialize};

use super::{GlyphMetrics, Outline, Paragraph};

/// Result of reconstructing one page.
///
/// Every paragraph fed to the outline stage ends up exactly once in either
/// `outline` or `annotations`. Paragraphs too short to outline are kept in
/// `fragments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reconstruction {
    /// Glyph metrics the run was scaled by
    pub metrics: GlyphMetrics,
    /// The outline tree
    pub outline: Outline,
    /// Paragraphs that could not be placed in the tree
    pub annotations: Vec<Paragraph>,
    /// Paragraphs set aside before outlining (below the minimum length)
    pub fragments: Vec<Paragraph>,
    /// Counters collected during the run
    pub stats: LayoutStats,
}

impl Reconstruction {
    /// Create an empty reconstruction.
    pub fn empty(metrics: GlyphMetrics) -> Self {
        Self {
            metrics,
            outline: Outline::new(),
            annotations: Vec::new(),
            fragments: Vec::new(),
            stats: LayoutStats::default(),
        }
    }

    /// Check if nothing was reconstructed.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty() && self.annotations.is_empty() && self.fragments.is_empty()
    }

    /// Number of paragraphs that reached the outline stage.
    pub fn outlined_paragraph_count(&self) -> usize {
        self.outline.len() + self.annotations.len()
    }

    /// Plain text of the tree in pre-order, followed by annotations.
    pub fn plain_text(&self) -> String {
        self.outline
            .paragraphs()
            .chain(self.annotations.iter())
            .map(|p| p.trimmed())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Statistics collected during reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Number of input words
    pub element_count: u32,

    /// Number of assembled lines
    pub line_count: u32,

    /// Number of paragraphs after splitting
    pub paragraph_count: u32,

    /// Number of paragraphs placed in the tree
    pub node_count: u32,

    /// Number of paragraphs routed to annotations
    pub annotation_count: u32,

    /// Number of paragraphs set aside as fragments
    pub fragment_count: u32,

    /// Number of layers discovered
    pub depth: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl LayoutStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &LayoutStats) {
        self.element_count += other.element_count;
        self.line_count += other.line_count;
        self.paragraph_count += other.paragraph_count;
        self.node_count += other.node_count;
        self.annotation_count += other.annotation_count;
        self.fragment_count += other.fragment_count;
        self.depth = self.depth.max(other.depth);
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_stats_count_text() {
        let mut stats = LayoutStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_layout_stats_merge() {
        let mut stats1 = LayoutStats {
            paragraph_count: 5,
            depth: 2,
            ..Default::default()
        };
        let stats2 = LayoutStats {
            paragraph_count: 3,
            annotation_count: 1,
            depth: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.paragraph_count, 8);
        assert_eq!(stats1.annotation_count, 1);
        assert_eq!(stats1.depth, 4);
    }

    #[test]
    fn test_empty_reconstruction() {
        let r = Reconstruction::empty(GlyphMetrics::new(10.0, 12.0));
        assert!(r.is_empty());
        assert_eq!(r.outlined_paragraph_count(), 0);
        assert_eq!(r.plain_text(), "");
    }
}
