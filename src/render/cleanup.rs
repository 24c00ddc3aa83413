//! Text cleanup for rendered paragraph text.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Minimal cleanup: Unicode NFC normalization only
    Minimal,
    /// Standard cleanup: NFC + bullets + whitespace
    #[default]
    Standard,
    /// Aggressive cleanup: standard plus hyphenation repair
    Aggressive,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Standardize bullet characters (●, ○, ■ → •)
    pub standardize_bullets: bool,

    /// Rejoin words hyphenated across OCR line breaks
    pub fix_hyphenation: bool,

    /// Collapse whitespace runs into single spaces
    pub normalize_whitespace: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal preset: only Unicode normalization.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            standardize_bullets: false,
            fix_hyphenation: false,
            normalize_whitespace: false,
        }
    }

    /// Standard preset: safe for any OCR text.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            standardize_bullets: true,
            fix_hyphenation: false,
            normalize_whitespace: true,
        }
    }

    /// Aggressive preset: also rejoins hyphenated words.
    pub fn aggressive() -> Self {
        Self {
            fix_hyphenation: true,
            ..Self::standard()
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
pub struct CleanupPipeline {
    options: CleanupOptions,
    hyphenation_regex: Regex,
    whitespace_regex: Regex,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self {
            options,
            hyphenation_regex: Regex::new(r"(\p{L})-\s+(\p{Ll})").expect("valid hyphenation regex"),
            whitespace_regex: Regex::new(r"\s+").expect("valid whitespace regex"),
        }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.standardize_bullets {
            result = standardize_bullets(&result);
        }

        if self.options.fix_hyphenation {
            result = self
                .hyphenation_regex
                .replace_all(&result, "$1$2")
                .into_owned();
        }

        if self.options.normalize_whitespace {
            result = self.whitespace_regex.replace_all(&result, " ").into_owned();
        }

        result.trim().to_string()
    }
}

fn standardize_bullets(text: &str) -> String {
    let bullets = ['●', '○', '■', '□', '◆', '◇', '▪', '▫', '►', '▻', '·'];
    text.chars()
        .map(|c| if bullets.contains(&c) { '•' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_only_normalizes() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        assert_eq!(pipeline.process("cafe\u{0301}  ● x"), "caf\u{00e9}  ● x");
    }

    #[test]
    fn test_standard_cleanup() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(pipeline.process("○  first   point "), "• first point");
        assert_eq!(pipeline.process("\u{FB01}ne"), "\u{FB01}ne");
    }

    #[test]
    fn test_hyphenation_only_when_aggressive() {
        let standard = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(standard.process("infor- mation"), "infor- mation");

        let aggressive = CleanupPipeline::from_preset(CleanupPreset::Aggressive);
        assert_eq!(aggressive.process("infor- mation"), "information");
        assert_eq!(aggressive.process("well-known"), "well-known");
        assert_eq!(aggressive.process("North- America"), "North- America");
    }
}
