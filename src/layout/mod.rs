//! Layout reconstruction engine.
//!
//! Words flow through three stages, each consuming the full output of the
//! previous one:
//!
//! 1. [`LineAssembler`] groups words into lines by adjacency.
//! 2. [`ParagraphAssembler`] groups lines by indentation and spacing, then
//!    splits list items and glued-on headings apart.
//! 3. [`OutlineBuilder`] layers paragraphs by indentation into a tree;
//!    anything it cannot place becomes an annotation.
//!
//! All thresholds live in [`LayoutOptions`] and are multiples of the page's
//! [`GlyphMetrics`](crate::model::GlyphMetrics). The stages never fail;
//! [`LayoutAnalyzer`] validates its inputs up front and runs them in order.

mod analyzer;
mod lines;
mod markers;
mod options;
mod outline;
mod paragraphs;

pub use analyzer::LayoutAnalyzer;
pub use lines::{assemble_lines, LineAssembler};
pub use markers::{is_bullet_marker, is_enumeration_marker, is_indent_marker};
pub use options::LayoutOptions;
pub use outline::{build_outline, BuiltOutline, OutlineBuilder};
pub use paragraphs::{assemble_paragraphs, ParagraphAssembler};
