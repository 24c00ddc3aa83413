//! OCR service output.
//!
//! Models the hierarchical full-text annotation returned by a document text
//! detection service (pages, blocks, paragraphs, words, symbols) and flattens
//! one page into the word list and glyph metrics the layout engine consumes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{BoundingBox, GlyphMetrics, TextElement};

/// Kind of break the OCR service detected after a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakType {
    #[default]
    Unknown,
    Space,
    SureSpace,
    EolSureSpace,
    Hyphen,
    LineBreak,
}

impl BreakType {
    /// Whether the break should become a space in the word text.
    pub fn is_space(&self) -> bool {
        matches!(self, BreakType::Space | BreakType::EolSureSpace)
    }
}

/// Break detected after a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedBreak {
    /// Break kind
    #[serde(rename = "type", default)]
    pub break_type: BreakType,
    /// Whether the break precedes the symbol
    #[serde(default)]
    pub is_prefix: bool,
}

/// Language detected for a piece of text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedLanguage {
    /// BCP-47 language code
    pub language_code: String,
    /// Detection confidence
    #[serde(default)]
    pub confidence: f32,
}

/// Extra information attached to OCR entities.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextProperty {
    /// Detected languages, most likely first
    pub detected_languages: Vec<DetectedLanguage>,
    /// Break after the entity
    pub detected_break: Option<DetectedBreak>,
}

/// A single recognized glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrSymbol {
    /// Glyph text
    pub text: String,
    /// Glyph box
    pub bounding_box: BoundingBox,
    /// Attached properties
    #[serde(default)]
    pub property: TextProperty,
}

impl OcrSymbol {
    /// Break detected after this symbol.
    pub fn detected_break(&self) -> BreakType {
        self.property
            .detected_break
            .map(|b| b.break_type)
            .unwrap_or_default()
    }
}

/// A recognized word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrWord {
    /// Word box
    pub bounding_box: BoundingBox,
    /// Glyphs in reading order
    #[serde(default)]
    pub symbols: Vec<OcrSymbol>,
    /// Attached properties
    #[serde(default)]
    pub property: TextProperty,
}

impl OcrWord {
    /// Detected language codes, most likely first.
    pub fn languages(&self) -> impl Iterator<Item = &str> + '_ {
        self.property
            .detected_languages
            .iter()
            .map(|l| l.language_code.as_str())
    }

    /// Word text with OCR-reported spaces kept as trailing spaces.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for symbol in &self.symbols {
            text.push_str(&symbol.text);
            if symbol.detected_break().is_space() {
                text.push(' ');
            }
        }
        text
    }
}

/// A paragraph as segmented by the OCR service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrParagraph {
    /// Words in reading order
    #[serde(default)]
    pub words: Vec<OcrWord>,
}

/// A block of text as segmented by the OCR service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrBlock {
    /// Paragraphs in reading order
    #[serde(default)]
    pub paragraphs: Vec<OcrParagraph>,
}

/// One recognized page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrPage {
    /// Page width in pixels
    #[serde(default)]
    pub width: u32,
    /// Page height in pixels
    #[serde(default)]
    pub height: u32,
    /// Blocks in reading order
    #[serde(default)]
    pub blocks: Vec<OcrBlock>,
}

/// Options for flattening OCR output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrOptions {
    /// Keep only words whose primary language is listed (empty keeps all)
    pub languages: Vec<String>,
}

impl OcrOptions {
    /// Create options that keep every word.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one more language.
    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.languages.push(code.into());
        self
    }

    /// Check whether a word passes the language filter.
    pub fn accepts(&self, word: &OcrWord) -> bool {
        if self.languages.is_empty() {
            return true;
        }
        word.languages()
            .next()
            .map(|code| self.languages.iter().any(|l| l == code))
            .unwrap_or(false)
    }
}

/// Flattened page ready for layout reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct PageInput {
    /// Words in OCR reading order
    pub elements: Vec<TextElement>,
    /// Glyph metrics averaged over every symbol of the page
    pub metrics: GlyphMetrics,
    /// Page width in pixels
    pub width: u32,
    /// Page height in pixels
    pub height: u32,
}

impl OcrPage {
    /// All words in reading order.
    pub fn words(&self) -> impl Iterator<Item = &OcrWord> + '_ {
        self.blocks
            .iter()
            .flat_map(|b| b.paragraphs.iter())
            .flat_map(|p| p.words.iter())
    }

    /// Flatten into a word list and glyph metrics.
    ///
    /// Metrics cover the symbols of filtered-out words too. Fails with
    /// [`Error::NoGlyphs`] for a page without symbols.
    pub fn to_page_input(&self, options: &OcrOptions) -> Result<PageInput> {
        let metrics = GlyphMetrics::from_glyph_boxes(
            self.words()
                .flat_map(|w| w.symbols.iter())
                .map(|s| &s.bounding_box),
        )?;

        let mut skipped = 0usize;
        let elements: Vec<TextElement> = self
            .words()
            .filter(|w| {
                let keep = options.accepts(w);
                if !keep {
                    skipped += 1;
                }
                keep
            })
            .map(|w| TextElement::new(w.text().nfc().collect::<String>(), w.bounding_box))
            .collect();

        if skipped > 0 {
            log::debug!("Language filter dropped {} words", skipped);
        }

        Ok(PageInput {
            elements,
            metrics,
            width: self.width,
            height: self.height,
        })
    }
}

/// A full-text OCR annotation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrDocument {
    /// Pages in order
    #[serde(default)]
    pub pages: Vec<OcrPage>,
    /// Plain text of the whole document, if the service included it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Accepted top-level shapes: the annotation itself or an API response
/// wrapping it.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope {
    Response {
        #[serde(rename = "fullTextAnnotation")]
        full_text_annotation: OcrDocument,
    },
    Batch {
        responses: Vec<Envelope>,
    },
    Annotation(OcrDocument),
}

impl Envelope {
    fn into_document(self) -> OcrDocument {
        match self {
            Envelope::Response {
                full_text_annotation,
            } => full_text_annotation,
            Envelope::Annotation(doc) => doc,
            Envelope::Batch { responses } => {
                let mut pages = Vec::with_capacity(responses.len());
                for (index, response) in responses.into_iter().enumerate() {
                    let document = response.into_document();
                    if document.pages.is_empty() {
                        log::warn!(
                            "Response {} has no recognized text; later pages are renumbered",
                            index + 1
                        );
                    }
                    pages.extend(document.pages);
                }
                OcrDocument { pages, text: None }
            }
        }
    }
}

impl OcrDocument {
    /// Parse OCR output from JSON.
    ///
    /// Accepts a bare annotation, a single response carrying
    /// `fullTextAnnotation`, or a batch of `responses`.
    pub fn from_json(json: &str) -> Result<Self> {
        let envelope: Envelope = serde_json::from_str(json)?;
        Ok(envelope.into_document())
    }

    /// Read OCR output from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by 1-indexed number.
    pub fn page(&self, number: u32) -> Result<&OcrPage> {
        number
            .checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .ok_or(Error::PageOutOfRange(number, self.page_count()))
    }

    /// Total number of words across pages.
    pub fn word_count(&self) -> usize {
        self.pages.iter().map(|p| p.words().count()).sum()
    }
}
