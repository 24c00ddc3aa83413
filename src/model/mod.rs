//! Data model for page reconstruction.
//!
//! Words come in as [`TextElement`]s, are grouped into [`Line`]s and
//! [`Paragraph`]s, and end up in an [`Outline`] or the annotation list of a
//! [`Reconstruction`]. All records are created once per run and never
//! mutated afterwards, except for the sentence payload attached to outline
//! nodes.

mod element;
mod geometry;
mod outline;
mod paragraph;
mod reconstruction;
mod sentence;

pub use element::{GlyphMetrics, TextElement};
pub use geometry::{width_height, within, within_tolerance, BoundingBox, Point, Rect};
pub use outline::{Ancestors, NodeId, Outline, OutlineEntry, OutlineNode, PreOrder};
pub use paragraph::{join_words, Line, Paragraph};
pub use reconstruction::{LayoutStats, Reconstruction};
pub use sentence::{EntityType, PartOfSpeech, Sentence, Word};
