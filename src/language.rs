//! Seam to the language analysis service.
//!
//! The layout engine never calls out to NLP itself. Once an outline exists,
//! a [`LanguageAnalyzer`] turns each node's paragraph text into tagged
//! [`Sentence`]s, which question generation then consumes.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Sentence, Word};

/// Pronouns that take over the previous sentence's subject.
const CARRY_OVER: &[&str] = &["this", "it", "he", "she", "his", "her"];

/// Turns paragraph text into analyzed sentences.
pub trait LanguageAnalyzer: Send + Sync {
    /// Analyze one paragraph.
    fn analyze(&self, text: &str) -> Result<Vec<Sentence>>;
}

/// Split text on periods and line breaks, dropping empty pieces.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Offline analyzer: whitespace tokens with no tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainAnalyzer;

impl PlainAnalyzer {
    /// Create a new plain analyzer.
    pub fn new() -> Self {
        Self
    }

    fn sentence(text: &str) -> Sentence {
        Sentence::new(text.split_whitespace().map(Word::new).collect())
    }
}

impl LanguageAnalyzer for PlainAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Sentence>> {
        Ok(split_sentences(text)
            .into_iter()
            .map(Self::sentence)
            .collect())
    }
}

/// Analyzer backed by sentences an external NLP service produced earlier.
///
/// Lookups are keyed by the trimmed sentence text; unknown sentences fall
/// back to [`PlainAnalyzer`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrecomputedAnalyzer {
    sentences: HashMap<String, Sentence>,
}

impl PrecomputedAnalyzer {
    /// Create an empty analyzer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the analysis for one sentence.
    pub fn with_sentence(mut self, text: impl Into<String>, sentence: Sentence) -> Self {
        self.insert(text, sentence);
        self
    }

    /// Register the analysis for one sentence.
    pub fn insert(&mut self, text: impl Into<String>, sentence: Sentence) {
        self.sentences.insert(text.into().trim().to_string(), sentence);
    }

    /// Parse a JSON object mapping sentence text to its analysis.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, Sentence> = serde_json::from_str(json)
            .map_err(|e| Error::Language(format!("invalid analysis file: {}", e)))?;
        let mut analyzer = Self::new();
        for (text, sentence) in raw {
            analyzer.insert(text, sentence);
        }
        Ok(analyzer)
    }

    /// Load from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Number of known sentences.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Check if no sentences are known.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

impl LanguageAnalyzer for PrecomputedAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Sentence>> {
        Ok(split_sentences(text)
            .into_iter()
            .map(|s| match self.sentences.get(s) {
                Some(sentence) => sentence.clone(),
                None => {
                    log::trace!("No precomputed analysis for {:?}", s);
                    PlainAnalyzer::sentence(s)
                }
            })
            .collect())
    }
}

/// Assign a subject to each sentence and drop sentences without one.
///
/// The subject is the first noun or pronoun. A leading carry-over pronoun
/// (`it`, `he`, ...) inherits the previous sentence's subject: its text is
/// rewritten to the subject's text and its tags are left untouched; otherwise the subject is the first nominal that is an
/// entity. Sentences with no nominal, or with no subject to inherit or take,
/// are removed.
pub fn resolve_subjects(sentences: Vec<Sentence>) -> Vec<Sentence> {
    let mut previous: Option<String> = None;
    let mut resolved = Vec::with_capacity(sentences.len());

    for mut sentence in sentences {
        let Some(first) = sentence.words.iter().position(Word::is_nominal) else {
            continue;
        };

        let lowered = sentence.words[first].content.to_lowercase();
        if CARRY_OVER.contains(&lowered.as_str()) {
            let Some(subject) = previous.clone() else {
                continue;
            };
            sentence.words[first].content = subject;
            sentence.subject = Some(first);
        } else {
            let Some(entity) = sentence
                .words
                .iter()
                .position(|w| w.is_nominal() && w.is_entity())
            else {
                continue;
            };
            sentence.subject = Some(entity);
            previous = Some(sentence.words[entity].content.clone());
        }
        resolved.push(sentence);
    }

    resolved
}
