//! Layout options and configuration.
//!
//! Every distance is a multiple of the page's average glyph width or height.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tunable thresholds for line, paragraph and outline reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// How far past the previous word's right edge the next word may start
    /// (glyph widths)
    pub word_gap: f32,

    /// How far before the previous word's right edge the next word may start
    /// (glyph widths)
    pub word_overlap: f32,

    /// Minimum rise of the next word's top above the previous word's bottom
    /// (glyph heights)
    pub line_rise_min: f32,

    /// Maximum rise of the next word's top above the previous word's bottom
    /// (glyph heights)
    pub line_rise_max: f32,

    /// Horizontal drift allowed for a continuation line (glyph widths)
    pub indent_tolerance: f32,

    /// Horizontal drift allowed when the paragraph opened with a marker
    /// (glyph widths)
    pub marked_indent_tolerance: f32,

    /// How far a continuation line may start above the previous line's
    /// bottom (glyph heights)
    pub line_overlap: f32,

    /// How far a continuation line may start below the previous line's
    /// bottom (glyph heights)
    pub line_spacing: f32,

    /// Width ratio above which a short line followed by a long one is
    /// treated as a heading
    pub heading_width_ratio: f32,

    /// Longest text still treated as a bullet glyph
    pub bullet_max_chars: usize,

    /// Gap after a bullet glyph that excludes it from the left edge
    /// (glyph widths)
    pub bullet_gap: f32,

    /// Paragraphs with fewer visible characters become fragments
    pub min_paragraph_chars: usize,

    /// Number of leading pool paragraphs searched for a layer anchor
    pub anchor_lookahead: usize,

    /// Half-width of the band around the running layer x (glyph widths)
    pub layer_tolerance: f32,

    /// Weight of each new member in the running layer x
    pub layer_smoothing: f32,

    /// Anchor shift beyond which the rest of the page leaves the hierarchy
    /// (glyph widths)
    pub jump_threshold: f32,

    /// Slack when matching a child to a parent above it (glyph heights)
    pub parent_tolerance: f32,

    /// Whether to use parallel processing for batches and analysis
    pub parallel: bool,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON file; missing fields take defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse options from JSON; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Set the anchor lookahead window.
    pub fn with_anchor_lookahead(mut self, lookahead: usize) -> Self {
        self.anchor_lookahead = lookahead;
        self
    }

    /// Set the layer tolerance band.
    pub fn with_layer_tolerance(mut self, widths: f32) -> Self {
        self.layer_tolerance = widths;
        self
    }

    /// Set the hierarchy-exit jump threshold.
    pub fn with_jump_threshold(mut self, widths: f32) -> Self {
        self.jump_threshold = widths;
        self
    }

    /// Set the word gap for line assembly.
    pub fn with_word_gap(mut self, widths: f32) -> Self {
        self.word_gap = widths;
        self
    }

    /// Set the indentation tolerance for paragraph assembly.
    pub fn with_indent_tolerance(mut self, widths: f32) -> Self {
        self.indent_tolerance = widths;
        self
    }

    /// Set the minimum paragraph length.
    pub fn with_min_paragraph_chars(mut self, chars: usize) -> Self {
        self.min_paragraph_chars = chars;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check that every threshold is usable.
    pub fn validate(&self) -> Result<()> {
        let distances = [
            ("word_gap", self.word_gap),
            ("word_overlap", self.word_overlap),
            ("line_rise_min", self.line_rise_min),
            ("line_rise_max", self.line_rise_max),
            ("indent_tolerance", self.indent_tolerance),
            ("marked_indent_tolerance", self.marked_indent_tolerance),
            ("line_overlap", self.line_overlap),
            ("line_spacing", self.line_spacing),
            ("heading_width_ratio", self.heading_width_ratio),
            ("bullet_gap", self.bullet_gap),
            ("layer_tolerance", self.layer_tolerance),
            ("jump_threshold", self.jump_threshold),
            ("parent_tolerance", self.parent_tolerance),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidOptions(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.line_rise_min > self.line_rise_max {
            return Err(Error::InvalidOptions(format!(
                "line_rise_min ({}) exceeds line_rise_max ({})",
                self.line_rise_min, self.line_rise_max
            )));
        }

        if self.anchor_lookahead == 0 {
            return Err(Error::InvalidOptions(
                "anchor_lookahead must be at least 1".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.layer_smoothing) {
            return Err(Error::InvalidOptions(format!(
                "layer_smoothing must be within [0, 1], got {}",
                self.layer_smoothing
            )));
        }

        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            word_gap: 4.0,
            word_overlap: 0.25,
            line_rise_min: 0.25,
            line_rise_max: 1.25,
            indent_tolerance: 3.0,
            marked_indent_tolerance: 5.0,
            line_overlap: 0.25,
            line_spacing: 1.0,
            heading_width_ratio: 15.0,
            bullet_max_chars: 3,
            bullet_gap: 2.0,
            min_paragraph_chars: 2,
            anchor_lookahead: 5,
            layer_tolerance: 3.0,
            layer_smoothing: 0.25,
            jump_threshold: 20.0,
            parent_tolerance: 0.5,
            parallel: true,
        }
    }
}
