//! Fill-in-the-blank questions and flashcard export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::language::resolve_subjects;
use crate::model::{Outline, Sentence};

/// Placeholder that replaces the answer in a question.
pub const BLANK: &str = "____";

/// Minimum salience for a sentence to be worth asking about.
const MIN_SALIENCE: f32 = 0.1;

/// A fill-in-the-blank question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Sentence text with the answer blanked out
    pub prompt: String,
    /// The blanked entity
    pub answer: String,
    /// Encyclopedia link of the answer, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wiki: Option<String>,
    /// Label of the outline node the sentence came from
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
}

impl Question {
    /// Check whether a sentence can become a question: it has an entity
    /// longer than one character, more than one word, a verb, and at least
    /// one word with salience of 0.1 or more.
    pub fn is_candidate(sentence: &Sentence) -> bool {
        sentence.words.iter().any(|w| w.is_entity())
            && sentence.words.len() > 1
            && sentence.max_salience() >= MIN_SALIENCE
            && sentence.has_verb()
            && answer_index(sentence).is_some()
    }

    /// Blank out the most salient entity of a sentence.
    pub fn from_sentence(sentence: &Sentence) -> Option<Self> {
        let answer = answer_index(sentence)?;
        let prompt = sentence
            .words
            .iter()
            .enumerate()
            .map(|(i, w)| if i == answer { BLANK } else { w.content.as_str() })
            .collect::<Vec<_>>()
            .join(" ");
        let word = &sentence.words[answer];

        Some(Self {
            prompt,
            answer: word.content.clone(),
            wiki: word.wiki.clone(),
            source: String::new(),
        })
    }

    /// Set the source node label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Prompt and answer as a pair.
    pub fn export(&self) -> (&str, &str) {
        (&self.prompt, &self.answer)
    }
}

/// Index of the most salient entity word longer than one character.
fn answer_index(sentence: &Sentence) -> Option<usize> {
    sentence
        .words
        .iter()
        .enumerate()
        .filter(|(_, w)| w.is_entity() && w.content.chars().count() > 1)
        .fold(None, |best: Option<(usize, f32)>, (i, w)| match best {
            Some((_, s)) if s >= w.salience => best,
            _ => Some((i, w.salience)),
        })
        .map(|(i, _)| i)
}

/// Generate questions from every node of an outline, in pre-order.
///
/// Each node's sentences go through subject resolution first, so pronoun
/// subjects are replaced by the entity they refer to.
pub fn generate_questions(outline: &Outline) -> Vec<Question> {
    let mut questions = Vec::new();
    for node in outline.pre_order() {
        for sentence in resolve_subjects(node.sentences.clone()) {
            if !Question::is_candidate(&sentence) {
                continue;
            }
            if let Some(question) = Question::from_sentence(&sentence) {
                questions.push(question.with_source(node.label.clone()));
            }
        }
    }
    log::debug!("Generated {} questions", questions.len());
    questions
}

/// A study set built from questions, in the shape flashcard services accept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardSet {
    /// Set title
    pub title: String,
    /// Card fronts (question prompts)
    pub terms: Vec<String>,
    /// Card backs (answers)
    pub definitions: Vec<String>,
    /// Language of the terms
    pub lang_terms: String,
    /// Language of the definitions
    pub lang_definitions: String,
    /// Creation time
    pub created: DateTime<Utc>,
}

impl FlashcardSet {
    /// Build a set from questions.
    pub fn from_questions(title: impl Into<String>, questions: &[Question]) -> Self {
        Self {
            title: title.into(),
            terms: questions.iter().map(|q| q.prompt.clone()).collect(),
            definitions: questions.iter().map(|q| q.answer.clone()).collect(),
            lang_terms: "en".to_string(),
            lang_definitions: "en".to_string(),
            created: Utc::now(),
        }
    }

    /// Set both term and definition language.
    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.lang_terms = code.clone();
        self.lang_definitions = code;
        self
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the set has no cards.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Form fields for a set-creation request, with repeated `terms[]` and
    /// `definitions[]` keys.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![("title".to_string(), self.title.clone())];
        for term in &self.terms {
            fields.push(("terms[]".to_string(), term.clone()));
        }
        for definition in &self.definitions {
            fields.push(("definitions[]".to_string(), definition.clone()));
        }
        fields.push(("lang_terms".to_string(), self.lang_terms.clone()));
        fields.push(("lang_definitions".to_string(), self.lang_definitions.clone()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::PrecomputedAnalyzer;
    use crate::model::{EntityType, Paragraph, PartOfSpeech, Point, Rect, Word};

    fn socrates() -> Sentence {
        Sentence::new(vec![
            Word::new("Socrates")
                .with_pos(PartOfSpeech::Noun)
                .with_entity(EntityType::Person, 0.8),
            Word::new("was").with_pos(PartOfSpeech::Verb),
            Word::new("a").with_pos(PartOfSpeech::Det),
            Word::new("Greek")
                .with_pos(PartOfSpeech::Adj)
                .with_entity(EntityType::Location, 0.2),
            Word::new("philosopher").with_pos(PartOfSpeech::Noun),
        ])
    }

    #[test]
    fn test_candidate_rules() {
        assert!(Question::is_candidate(&socrates()));

        let no_verb = Sentence::new(vec![
            Word::new("Socrates").with_entity(EntityType::Person, 0.8),
            Word::new("again"),
        ]);
        assert!(!Question::is_candidate(&no_verb));

        let single = Sentence::new(vec![Word::new("Rome").with_entity(EntityType::Location, 1.0)]);
        assert!(!Question::is_candidate(&single));

        let mut low = socrates();
        low.words[0].salience = 0.05;
        low.words[3].salience = 0.05;
        assert!(!Question::is_candidate(&low));

        let short = Sentence::new(vec![
            Word::new("X").with_entity(EntityType::Other, 0.9),
            Word::new("marks").with_pos(PartOfSpeech::Verb),
        ]);
        assert!(!Question::is_candidate(&short));
    }

    #[test]
    fn test_from_sentence_blanks_most_salient() {
        let q = Question::from_sentence(&socrates()).unwrap();
        assert_eq!(q.prompt, "____ was a Greek philosopher");
        assert_eq!(q.answer, "Socrates");
        assert_eq!(q.export(), ("____ was a Greek philosopher", "Socrates"));
    }

    #[test]
    fn test_generate_questions_from_outline() {
        let mut outline = Outline::new();
        let paragraph = Paragraph {
            text: "Socrates was a Greek philosopher".to_string(),
            bounding_box: Rect::new(Point::new(0.0, 0.0), Point::new(100.0, 10.0)),
            members: Vec::new(),
            line_count: 1,
        };
        outline
            .add_child(Outline::ROOT, paragraph, 1, "layer 1, child 0")
            .unwrap();
        assert!(generate_questions(&outline).is_empty());

        let analyzer = PrecomputedAnalyzer::new()
            .with_sentence("Socrates was a Greek philosopher", socrates());
        outline.attach_sentences(&analyzer, false).unwrap();

        let questions = generate_questions(&outline);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].source, "layer 1, child 0");
    }

    #[test]
    fn test_carried_pronoun_is_not_an_answer() {
        let mut outline = Outline::new();
        let paragraph = Paragraph {
            text: "Rome grew. It burned".to_string(),
            bounding_box: Rect::new(Point::new(0.0, 0.0), Point::new(100.0, 10.0)),
            members: Vec::new(),
            line_count: 1,
        };
        outline
            .add_child(Outline::ROOT, paragraph, 1, "layer 1, child 0")
            .unwrap();

        let analyzer = PrecomputedAnalyzer::new()
            .with_sentence(
                "Rome grew",
                Sentence::new(vec![
                    Word::new("Rome")
                        .with_pos(PartOfSpeech::Noun)
                        .with_entity(EntityType::Location, 0.9),
                    Word::new("grew").with_pos(PartOfSpeech::Verb),
                ]),
            )
            .with_sentence(
                "It burned",
                Sentence::new(vec![
                    Word::new("It").with_pos(PartOfSpeech::Pron),
                    Word::new("burned").with_pos(PartOfSpeech::Verb),
                ]),
            );
        outline.attach_sentences(&analyzer, false).unwrap();

        let questions = generate_questions(&outline);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].export(), ("____ grew", "Rome"));
    }

    #[test]
    fn test_flashcard_set() {
        let questions = vec![Question::from_sentence(&socrates()).unwrap()];
        let set = FlashcardSet::from_questions("Philosophy", &questions).with_language("en");

        assert_eq!(set.len(), 1);
        assert_eq!(set.definitions, vec!["Socrates"]);
        let fields = set.form_fields();
        assert!(fields.contains(&("terms[]".to_string(), "____ was a Greek philosopher".to_string())));
        assert_eq!(fields.first().map(|f| f.1.as_str()), Some("Philosophy"));
    }
}
