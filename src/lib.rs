//! # outliner
//!
//! Reading-structure reconstruction for OCR'd pages.
//!
//! Given the words an OCR service found on a page (text plus bounding box)
//! and the average glyph size, this library rebuilds the page's reading
//! structure: words become lines, lines become paragraphs, and paragraphs
//! are arranged into an indentation outline. Paragraphs that do not fit the
//! outline (sidebars, captions, page furniture) are kept aside as
//! annotations.
//!
//! ## Quick Start
//!
//! ```no_run
//! use outliner::Outliner;
//!
//! fn main() -> outliner::Result<()> {
//!     let result = Outliner::new().parse_file("page.json")?;
//!     println!("{}", result.to_text()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Geometry-only layout**: line, paragraph and outline stages use box
//!   coordinates scaled by glyph metrics, never fonts or styles
//! - **Total output**: every paragraph lands in the tree or the annotation
//!   list, never both and never neither
//! - **Multiple output formats**: plain text tree, Markdown, JSON
//! - **Language seam**: attach sentence analysis and generate
//!   fill-in-the-blank questions
//! - **Parallel processing**: Uses Rayon for multi-page documents

pub mod error;
pub mod language;
pub mod layout;
pub mod model;
pub mod ocr;
pub mod question;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use language::{LanguageAnalyzer, PlainAnalyzer, PrecomputedAnalyzer};
pub use layout::{LayoutAnalyzer, LayoutOptions};
pub use model::{
    BoundingBox, GlyphMetrics, LayoutStats, Line, NodeId, Outline, OutlineNode, Paragraph,
    Point, Reconstruction, Rect, Sentence, TextElement, Word,
};
pub use ocr::{OcrDocument, OcrOptions, OcrPage, PageInput};
pub use question::{generate_questions, FlashcardSet, Question};
pub use render::{CleanupOptions, CleanupPreset, JsonFormat, RenderOptions};

use std::path::Path;

use rayon::prelude::*;

/// Reconstruct one page from its words and glyph metrics.
///
/// # Example
///
/// ```
/// use outliner::{reconstruct, GlyphMetrics, LayoutOptions, TextElement};
///
/// let words = vec![
///     TextElement::at("Hello ", 0.0, 0.0, 60.0, 20.0),
///     TextElement::at("world", 70.0, 0.0, 50.0, 20.0),
/// ];
/// let page = reconstruct(&words, GlyphMetrics::new(10.0, 20.0), &LayoutOptions::default())?;
/// assert_eq!(page.outline.len(), 1);
/// # Ok::<(), outliner::Error>(())
/// ```
pub fn reconstruct(
    elements: &[TextElement],
    metrics: GlyphMetrics,
    options: &LayoutOptions,
) -> Result<Reconstruction> {
    LayoutAnalyzer::new(options.clone())?.analyze(elements, metrics)
}

/// Flatten an OCR page and reconstruct it.
pub fn reconstruct_page(
    page: &OcrPage,
    layout: &LayoutOptions,
    ocr: &OcrOptions,
) -> Result<Reconstruction> {
    let input = page.to_page_input(ocr)?;
    reconstruct(&input.elements, input.metrics, layout)
}

/// Reconstruct every page of an OCR document.
///
/// Pages are independent; nothing is merged across page boundaries.
pub fn reconstruct_document(
    document: &OcrDocument,
    layout: &LayoutOptions,
    ocr: &OcrOptions,
) -> Result<Vec<Reconstruction>> {
    let analyzer = LayoutAnalyzer::new(layout.clone())?;
    let run = |page: &OcrPage| -> Result<Reconstruction> {
        let input = page.to_page_input(ocr)?;
        analyzer.analyze(&input.elements, input.metrics)
    };

    if layout.parallel {
        document.pages.par_iter().map(run).collect()
    } else {
        document.pages.iter().map(run).collect()
    }
}

/// Convert an OCR JSON file to a plain text outline.
///
/// # Example
///
/// ```no_run
/// let text = outliner::to_text("page.json").unwrap();
/// println!("{}", text);
/// ```
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    Outliner::new().parse_file(path)?.to_text()
}

/// Convert an OCR JSON file to Markdown.
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    Outliner::new().parse_file(path)?.to_markdown()
}

/// Convert an OCR JSON file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    Outliner::new().parse_file(path)?.to_json(format)
}

/// Builder for reconstructing and rendering OCR documents.
///
/// # Example
///
/// ```no_run
/// use outliner::{CleanupPreset, Outliner};
///
/// let markdown = Outliner::new()
///     .with_language("en")
///     .with_max_depth(3)
///     .with_cleanup(CleanupPreset::Aggressive)
///     .parse_file("scan.json")?
///     .to_markdown()?;
/// # Ok::<(), outliner::Error>(())
/// ```
pub struct Outliner {
    layout_options: LayoutOptions,
    ocr_options: OcrOptions,
    render_options: RenderOptions,
    analyzer: Option<Box<dyn LanguageAnalyzer>>,
}

impl Outliner {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            layout_options: LayoutOptions::default(),
            ocr_options: OcrOptions::default(),
            render_options: RenderOptions::default(),
            analyzer: None,
        }
    }

    /// Replace the layout options.
    pub fn with_layout_options(mut self, options: LayoutOptions) -> Self {
        self.layout_options = options;
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Keep only words detected in this language (may be repeated).
    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.ocr_options = self.ocr_options.with_language(code);
        self
    }

    /// Limit rendered output to the first `depth` layers.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.render_options = self.render_options.with_max_depth(depth);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.render_options = self.render_options.with_cleanup_preset(preset);
        self
    }

    /// Attach sentence analysis to every outline node after reconstruction.
    pub fn with_analyzer<A: LanguageAnalyzer + 'static>(mut self, analyzer: A) -> Self {
        self.analyzer = Some(Box::new(analyzer));
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.layout_options = self.layout_options.sequential();
        self
    }

    /// Read OCR output from a JSON file and reconstruct every page.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<OutlinerResult> {
        let document = OcrDocument::from_file(path)?;
        self.parse_document(&document)
    }

    /// Parse OCR output from a JSON string and reconstruct every page.
    pub fn parse_json(self, json: &str) -> Result<OutlinerResult> {
        let document = OcrDocument::from_json(json)?;
        self.parse_document(&document)
    }

    /// Reconstruct every page of an already parsed document.
    pub fn parse_document(self, document: &OcrDocument) -> Result<OutlinerResult> {
        let mut pages = reconstruct_document(document, &self.layout_options, &self.ocr_options)?;

        if let Some(analyzer) = &self.analyzer {
            for page in &mut pages {
                page.outline
                    .attach_sentences(analyzer.as_ref(), self.layout_options.parallel)?;
            }
        }

        Ok(OutlinerResult {
            pages,
            render_options: self.render_options,
        })
    }
}

impl Default for Outliner {
    fn default() -> Self {
        Self::new()
    }
}

/// Reconstructed pages of one document.
pub struct OutlinerResult {
    /// One reconstruction per page, in page order
    pub pages: Vec<Reconstruction>,
    /// Render options to use
    render_options: RenderOptions,
}

impl OutlinerResult {
    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Convert to a plain text tree, pages separated by a blank line.
    pub fn to_text(&self) -> Result<String> {
        let rendered = self
            .pages
            .iter()
            .map(|p| render::to_text(p, &self.render_options))
            .collect::<Result<Vec<_>>>()?;
        Ok(rendered.join("\n\n"))
    }

    /// Convert to Markdown, one `# Page n` section per page when there is
    /// more than one.
    pub fn to_markdown(&self) -> Result<String> {
        if let [page] = self.pages.as_slice() {
            return render::to_markdown(page, &self.render_options);
        }

        let mut output = String::new();
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&format!("# Page {}\n\n", i + 1));
            output.push_str(&render::to_markdown(page, &self.render_options)?);
        }
        Ok(output)
    }

    /// Convert to JSON. A single page renders as an object, several pages
    /// as an array.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        match self.pages.as_slice() {
            [page] => render::to_json(page, format),
            pages => render::to_json_pages(pages, format),
        }
    }

    /// Fill-in-the-blank questions from every page, in page order.
    ///
    /// Only outlines that went through a language analyzer carry the
    /// sentence payload questions are drawn from.
    pub fn questions(&self) -> Vec<Question> {
        self.pages
            .iter()
            .flat_map(|p| generate_questions(&p.outline))
            .collect()
    }

    /// Plain text of every page without cleanup.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(Reconstruction::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Statistics summed over all pages.
    pub fn stats(&self) -> LayoutStats {
        let mut stats = LayoutStats::new();
        for page in &self.pages {
            stats.merge(&page.stats);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityType, PartOfSpeech};
    use crate::ocr::{OcrBlock, OcrParagraph, OcrSymbol, OcrWord};

    fn ocr_word(text: &str, x: f32, y: f32) -> OcrWord {
        let symbols = text
            .chars()
            .enumerate()
            .map(|(i, c)| OcrSymbol {
                text: c.to_string(),
                bounding_box: BoundingBox::from_rect(x + i as f32 * 10.0, y, 10.0, 20.0),
                property: Default::default(),
            })
            .collect();
        OcrWord {
            bounding_box: BoundingBox::from_rect(x, y, text.chars().count() as f32 * 10.0, 20.0),
            symbols,
            property: Default::default(),
        }
    }

    fn ocr_page(words: Vec<OcrWord>) -> OcrPage {
        OcrPage {
            width: 800,
            height: 600,
            blocks: vec![OcrBlock {
                paragraphs: vec![OcrParagraph { words }],
            }],
        }
    }

    fn document() -> OcrDocument {
        OcrDocument {
            pages: vec![
                ocr_page(vec![
                    ocr_word("Rome", 0.0, 0.0),
                    ocr_word("grew", 50.0, 0.0),
                    ocr_word("Trade", 100.0, 40.0),
                ]),
                ocr_page(vec![ocr_word("Second", 0.0, 0.0)]),
            ],
            text: None,
        }
    }

    #[test]
    fn test_outliner_builder() {
        let builder = Outliner::new()
            .with_language("en")
            .with_max_depth(2)
            .sequential();

        assert_eq!(builder.ocr_options.languages, vec!["en"]);
        assert_eq!(builder.render_options.max_depth, Some(2));
        assert!(!builder.layout_options.parallel);
        assert!(builder.analyzer.is_none());
    }

    #[test]
    fn test_reconstruct_document_pages_independent() {
        let pages = reconstruct_document(
            &document(),
            &LayoutOptions::default(),
            &OcrOptions::default(),
        )
        .unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].plain_text(), "Second");
        assert_eq!(
            pages[0].outlined_paragraph_count(),
            pages[0].stats.paragraph_count as usize
        );
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let doc = document();
        let parallel =
            reconstruct_document(&doc, &LayoutOptions::default(), &OcrOptions::default()).unwrap();
        let sequential = reconstruct_document(
            &doc,
            &LayoutOptions::default().sequential(),
            &OcrOptions::default(),
        )
        .unwrap();

        for (a, b) in parallel.iter().zip(&sequential) {
            assert_eq!(a.outline, b.outline);
            assert_eq!(a.annotations, b.annotations);
        }
    }

    #[test]
    fn test_empty_page_fails_fast() {
        let doc = OcrDocument {
            pages: vec![OcrPage::default()],
            text: None,
        };
        let result = Outliner::new().parse_document(&doc);
        assert!(matches!(result, Err(Error::NoGlyphs)));
    }

    #[test]
    fn test_invalid_options_fail_fast() {
        let options = LayoutOptions::default().with_anchor_lookahead(0);
        let result = reconstruct(&[], GlyphMetrics::new(10.0, 20.0), &options);
        assert!(matches!(result, Err(Error::InvalidOptions(_))));
    }

    #[test]
    fn test_result_rendering() {
        let result = Outliner::new().parse_document(&document()).unwrap();
        assert_eq!(result.page_count(), 2);

        let markdown = result.to_markdown().unwrap();
        assert!(markdown.starts_with("# Page 1\n\n"));
        assert!(markdown.contains("# Page 2"));

        let json = result.to_json(JsonFormat::Compact).unwrap();
        assert!(json.starts_with('['));

        let text = result.to_text().unwrap();
        assert!(text.contains("Second"));
        assert_eq!(result.stats().element_count, 4);
    }

    #[test]
    fn test_questions_need_an_analyzer() {
        let plain = Outliner::new().parse_document(&document()).unwrap();
        assert!(plain.questions().is_empty());

        let sentence = Sentence::new(vec![
            Word::new("Rome")
                .with_pos(PartOfSpeech::Noun)
                .with_entity(EntityType::Location, 0.9),
            Word::new("grew").with_pos(PartOfSpeech::Verb),
        ]);
        let analyzer = PrecomputedAnalyzer::new().with_sentence("Rome grew", sentence);
        let analyzed = Outliner::new()
            .with_analyzer(analyzer)
            .parse_document(&document())
            .unwrap();

        let questions = analyzed.questions();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].prompt, "____ grew");
        assert_eq!(questions[0].answer, "Rome");
    }
}
