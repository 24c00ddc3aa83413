//! Recognized words and the glyph metrics used as the tolerance unit.

use serde::{Deserialize, Serialize};

use super::geometry::{width_height, BoundingBox};
use crate::error::{Error, Result};

/// A single recognized word with its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    /// Word text, possibly with a trailing space reported by OCR
    pub text: String,
    /// Word bounding box
    pub bounding_box: BoundingBox,
}

impl TextElement {
    /// Create a new text element.
    pub fn new(text: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bounding_box,
        }
    }

    /// Create an element with an axis-aligned box.
    pub fn at(text: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(text, BoundingBox::from_rect(x, y, width, height))
    }

    /// Top-left x.
    pub fn left(&self) -> f32 {
        self.bounding_box.top_left().x
    }

    /// Top-left y.
    pub fn top(&self) -> f32 {
        self.bounding_box.top_left().y
    }

    /// Bottom-right x.
    pub fn right(&self) -> f32 {
        self.bounding_box.bottom_right().x
    }

    /// Bottom-right y.
    pub fn bottom(&self) -> f32 {
        self.bounding_box.bottom_right().y
    }

    /// Box width.
    pub fn width(&self) -> f32 {
        self.bounding_box.width()
    }

    /// Text without surrounding whitespace.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// Average glyph size on a page.
///
/// Every geometric threshold in the engine is a multiple of these values, so
/// reconstruction does not depend on image resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphMetrics {
    /// Average glyph width in pixels
    pub avg_width: f32,
    /// Average glyph height in pixels
    pub avg_height: f32,
}

impl GlyphMetrics {
    /// Create metrics from known averages.
    pub const fn new(avg_width: f32, avg_height: f32) -> Self {
        Self {
            avg_width,
            avg_height,
        }
    }

    /// Average the sizes of individual glyph boxes.
    ///
    /// Fails with [`Error::NoGlyphs`] when there is nothing to average; the
    /// engine must not be invoked without metrics.
    pub fn from_glyph_boxes<'a, I>(boxes: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a BoundingBox>,
    {
        let mut count = 0usize;
        let mut total_width = 0.0f64;
        let mut total_height = 0.0f64;

        for b in boxes {
            let (w, h) = width_height(b);
            total_width += w as f64;
            total_height += h as f64;
            count += 1;
        }

        if count == 0 {
            return Err(Error::NoGlyphs);
        }

        let metrics = Self::new(
            (total_width / count as f64) as f32,
            (total_height / count as f64) as f32,
        );
        metrics.validate()?;
        Ok(metrics)
    }

    /// Check that both averages are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.avg_width.is_finite()
            && self.avg_height.is_finite()
            && self.avg_width > 0.0
            && self.avg_height > 0.0
    }

    /// Validate, returning [`Error::InvalidMetrics`] on failure.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::InvalidMetrics(self.avg_width, self.avg_height))
        }
    }

    /// Horizontal distance of `factor` average glyph widths.
    pub fn widths(&self, factor: f32) -> f32 {
        self.avg_width * factor
    }

    /// Vertical distance of `factor` average glyph heights.
    pub fn heights(&self, factor: f32) -> f32 {
        self.avg_height * factor
    }
}
