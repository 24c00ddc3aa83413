//! Error types for the outliner library.

use std::io;
use thiserror::Error;

/// Result type alias for outliner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing a page.
///
/// The layout engine itself never fails: geometric ambiguity is resolved by
/// routing paragraphs to the annotation list. These errors come from the
/// entry points that accept caller-supplied files, metrics and options.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON input (OCR annotation, options, NLP payload).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Glyph metrics were requested from an empty set of glyph boxes.
    #[error("Cannot compute glyph metrics: no glyphs on the page")]
    NoGlyphs,

    /// Glyph metrics are unusable as a tolerance unit.
    #[error("Invalid glyph metrics: average width {0}, average height {1}")]
    InvalidMetrics(f32, f32),

    /// Layout options failed validation.
    #[error("Invalid layout options: {0}")]
    InvalidOptions(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// The language analysis collaborator failed.
    #[error("Language analysis error: {0}")]
    Language(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoGlyphs;
        assert_eq!(
            err.to_string(),
            "Cannot compute glyph metrics: no glyphs on the page"
        );

        let err = Error::PageOutOfRange(3, 1);
        assert_eq!(
            err.to_string(),
            "Page 3 is out of range (document has 1 pages)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
