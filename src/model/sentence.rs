//! Sentence payload attached to outline nodes by a language analyzer.

use serde::{Deserialize, Serialize};

/// Part-of-speech tag assigned by the language analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartOfSpeech {
    Adj,
    Adp,
    Adv,
    Conj,
    Det,
    Noun,
    Num,
    Pron,
    Prt,
    Punct,
    Verb,
    X,
    Affix,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Entity category assigned by the language analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Person,
    Location,
    Organization,
    Event,
    WorkOfArt,
    ConsumerGood,
    Other,
    #[default]
    #[serde(other)]
    Unknown,
}

/// An analyzed word (or a merged multi-word entity mention).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Surface text
    pub content: String,
    /// Part-of-speech tag, if the analyzer produced one
    #[serde(default)]
    pub part_of_speech: Option<PartOfSpeech>,
    /// Entity category when the word is an entity mention
    #[serde(default)]
    pub entity: Option<EntityType>,
    /// Entity salience in `[0, 1]`
    #[serde(default)]
    pub salience: f32,
    /// Encyclopedia link for the entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wiki: Option<String>,
}

impl Word {
    /// Create an untagged word.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            part_of_speech: None,
            entity: None,
            salience: 0.0,
            wiki: None,
        }
    }

    /// Set the part-of-speech tag.
    pub fn with_pos(mut self, pos: PartOfSpeech) -> Self {
        self.part_of_speech = Some(pos);
        self
    }

    /// Mark the word as an entity mention.
    pub fn with_entity(mut self, entity: EntityType, salience: f32) -> Self {
        self.entity = Some(entity);
        self.salience = salience;
        self
    }

    /// Check whether the word is a noun or pronoun.
    pub fn is_nominal(&self) -> bool {
        matches!(
            self.part_of_speech,
            Some(PartOfSpeech::Noun) | Some(PartOfSpeech::Pron)
        )
    }

    /// Check whether the word is an entity mention.
    pub fn is_entity(&self) -> bool {
        self.entity.is_some()
    }
}

/// A sentence as a sequence of analyzed words.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sentence {
    /// Words in order
    pub words: Vec<Word>,
    /// Index into `words` of the resolved subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<usize>,
}

impl Sentence {
    /// Create a sentence from words.
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            subject: None,
        }
    }

    /// The sentence as a space-separated string.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.content.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Resolved subject word.
    pub fn subject_word(&self) -> Option<&Word> {
        self.subject.and_then(|i| self.words.get(i))
    }

    /// Check whether any word is tagged as a verb.
    pub fn has_verb(&self) -> bool {
        self.words
            .iter()
            .any(|w| w.part_of_speech == Some(PartOfSpeech::Verb))
    }

    /// Highest salience of any word.
    pub fn max_salience(&self) -> f32 {
        self.words.iter().map(|w| w.salience).fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_text() {
        let s = Sentence::new(vec![Word::new("Socrates"), Word::new("was"), Word::new("Greek")]);
        assert_eq!(s.text(), "Socrates was Greek");
    }

    #[test]
    fn test_word_tags_roundtrip_names() {
        let w = Word::new("Paris")
            .with_pos(PartOfSpeech::Noun)
            .with_entity(EntityType::Location, 0.8);
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.contains("\"NOUN\""));
        assert!(json.contains("\"LOCATION\""));
        assert!(w.is_nominal());
        assert!(w.is_entity());
    }

    #[test]
    fn test_max_salience_and_verb() {
        let s = Sentence::new(vec![
            Word::new("Rome").with_entity(EntityType::Location, 0.6),
            Word::new("fell").with_pos(PartOfSpeech::Verb),
        ]);
        assert!((s.max_salience() - 0.6).abs() < f32::EPSILON);
        assert!(s.has_verb());
    }
}
