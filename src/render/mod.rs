//! Rendering module for converting reconstructions to output formats.

mod cleanup;
mod json;
mod markdown;
mod options;
mod text;
pub mod visitor;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use json::{to_json, to_json_pages, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_visitor, MarkdownRenderer};
pub use options::RenderOptions;
pub use text::{to_text, to_text_with_visitor};
pub use visitor::{
    CompositeVisitor, DefaultVisitor, MaxDepthVisitor, OutlineVisitor, SkipAnnotationsVisitor,
    VisitorAction,
};
