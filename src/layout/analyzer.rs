//! End-to-end page layout analysis.

use crate::error::Result;
use crate::model::{GlyphMetrics, LayoutStats, Paragraph, Reconstruction, TextElement};

use super::lines::LineAssembler;
use super::options::LayoutOptions;
use super::outline::OutlineBuilder;
use super::paragraphs::ParagraphAssembler;

/// Runs words through line assembly, paragraph assembly and outline
/// building.
#[derive(Debug, Clone, Default)]
pub struct LayoutAnalyzer {
    options: LayoutOptions,
}

impl LayoutAnalyzer {
    /// Create an analyzer, rejecting unusable options.
    pub fn new(options: LayoutOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The options in use.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Reconstruct one page.
    ///
    /// Fails only when `metrics` cannot serve as a tolerance unit. Words with
    /// non-finite boxes are skipped.
    pub fn analyze(
        &self,
        elements: &[TextElement],
        metrics: GlyphMetrics,
    ) -> Result<Reconstruction> {
        metrics.validate()?;

        let mut stats = LayoutStats::new();
        let usable: Vec<TextElement> = elements
            .iter()
            .filter(|e| {
                let finite = e.bounding_box.is_finite();
                if !finite {
                    log::warn!("Skipping word {:?} with a non-finite box", e.text);
                }
                finite
            })
            .cloned()
            .collect();
        stats.element_count = usable.len() as u32;

        if usable.is_empty() {
            log::debug!("No words on page, returning an empty outline");
            let mut reconstruction = Reconstruction::empty(metrics);
            reconstruction.stats = stats;
            return Ok(reconstruction);
        }

        let lines = LineAssembler::new(metrics, &self.options).assemble(&usable);
        stats.line_count = lines.len() as u32;

        let paragraphs = ParagraphAssembler::new(metrics, &self.options).assemble(&lines);
        stats.paragraph_count = paragraphs.len() as u32;

        let min_chars = self.options.min_paragraph_chars;
        let (outlined, fragments): (Vec<Paragraph>, Vec<Paragraph>) = paragraphs
            .into_iter()
            .partition(|p| p.trimmed().chars().count() >= min_chars);

        for paragraph in &outlined {
            stats.count_text(&paragraph.text);
        }

        let built = OutlineBuilder::new(metrics, &self.options).build(outlined);
        stats.node_count = built.outline.len() as u32;
        stats.annotation_count = built.annotations.len() as u32;
        stats.fragment_count = fragments.len() as u32;
        stats.depth = built.layers as u32;

        log::debug!(
            "Page reconstructed: {} words, {} lines, {} paragraphs, {} nodes in {} layers, {} annotations",
            stats.element_count,
            stats.line_count,
            stats.paragraph_count,
            stats.node_count,
            stats.depth,
            stats.annotation_count
        );

        Ok(Reconstruction {
            metrics,
            outline: built.outline,
            annotations: built.annotations,
            fragments,
            stats,
        })
    }
}
