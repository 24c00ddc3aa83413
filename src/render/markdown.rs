//! Markdown rendering for reconstructed pages.

use crate::error::Result;
use crate::model::{NodeId, Outline, Paragraph, Reconstruction};

use super::visitor::{visible_children, DefaultVisitor, OutlineVisitor, VisitorAction};
use super::{CleanupPipeline, RenderOptions};

/// Convert a reconstruction to Markdown.
pub fn to_markdown(reconstruction: &Reconstruction, options: &RenderOptions) -> Result<String> {
    MarkdownRenderer::new(options.clone()).render(reconstruction)
}

/// Convert a reconstruction to Markdown with a custom visitor.
pub fn to_markdown_with_visitor<V: OutlineVisitor + 'static>(
    reconstruction: &Reconstruction,
    options: &RenderOptions,
    visitor: V,
) -> Result<String> {
    MarkdownRenderer::new(options.clone())
        .with_visitor(visitor)
        .render(reconstruction)
}

/// Markdown renderer.
///
/// The outline becomes a nested bullet list, one item per node, nested by
/// tree depth. Annotations and fragments follow under their own headings.
pub struct MarkdownRenderer {
    options: RenderOptions,
    pipeline: Option<CleanupPipeline>,
    visitor: Box<dyn OutlineVisitor>,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        let pipeline = options.cleanup.clone().map(CleanupPipeline::new);
        Self {
            options,
            pipeline,
            visitor: Box::new(DefaultVisitor),
        }
    }

    /// Replace the visitor consulted for every element.
    pub fn with_visitor<V: OutlineVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitor = Box::new(visitor);
        self
    }

    /// Render a reconstruction to Markdown.
    pub fn render(mut self, reconstruction: &Reconstruction) -> Result<String> {
        let mut output = String::new();

        self.render_children(&mut output, &reconstruction.outline, Outline::ROOT, 0);

        if self.options.include_annotations {
            let items = self.collect_items(&reconstruction.annotations, |v, p| {
                v.visit_annotation(p)
            });
            self.render_section(&mut output, "Annotations", items);
        }

        if self.options.include_fragments {
            let items =
                self.collect_items(&reconstruction.fragments, |v, p| v.visit_fragment(p));
            self.render_section(&mut output, "Fragments", items);
        }

        let trimmed = output.trim_end();
        if trimmed.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{}\n", trimmed))
    }

    fn clean(&self, text: &str) -> String {
        match &self.pipeline {
            Some(pipeline) => pipeline.process(text),
            None => text.trim().to_string(),
        }
    }

    fn render_children(&mut self, output: &mut String, outline: &Outline, id: NodeId, depth: usize) {
        let children = visible_children(outline, id, &self.options, self.visitor.as_mut());
        let indent = " ".repeat(self.options.indent_width * depth);

        for child in children {
            let text = match child.replacement {
                Some(text) => text,
                None => self.clean(child.node.text()),
            };

            output.push_str(&indent);
            output.push(self.options.list_marker);
            output.push(' ');
            if self.options.show_labels {
                output.push_str(&format!("**{}** ", child.node.label));
            }
            output.push_str(&escape_line_start(&text));
            output.push('\n');

            self.render_children(output, outline, child.node.id, depth + 1);
        }
    }

    fn collect_items<F>(&mut self, paragraphs: &[Paragraph], mut visit: F) -> Vec<String>
    where
        F: FnMut(&mut dyn OutlineVisitor, &Paragraph) -> VisitorAction,
    {
        let mut items = Vec::new();
        for paragraph in paragraphs {
            match visit(self.visitor.as_mut(), paragraph) {
                VisitorAction::Skip => {}
                VisitorAction::Replace(text) => items.push(text),
                VisitorAction::Continue => items.push(self.clean(&paragraph.text)),
            }
        }
        items
    }

    fn render_section(&self, output: &mut String, title: &str, items: Vec<String>) {
        if items.is_empty() {
            return;
        }
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str("## ");
        output.push_str(title);
        output.push_str("\n\n");
        for item in items {
            output.push(self.options.list_marker);
            output.push(' ');
            output.push_str(&escape_line_start(&item));
            output.push('\n');
        }
    }
}

/// Escape characters that would turn a list item's text into a heading or
/// another list marker.
fn escape_line_start(text: &str) -> String {
    match text.chars().next() {
        Some('#') | Some('>') | Some('+') | Some('*') => format!("\\{}", text),
        Some('-') if text.chars().nth(1).map_or(true, char::is_whitespace) => {
            format!("\\{}", text)
        }
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GlyphMetrics, OutlineNode, Point, Rect};
    use crate::render::MaxDepthVisitor;

    fn para(text: &str) -> Paragraph {
        Paragraph {
            text: text.to_string(),
            bounding_box: Rect::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0)),
            members: Vec::new(),
            line_count: 1,
        }
    }

    fn sample() -> Reconstruction {
        let mut r = Reconstruction::empty(GlyphMetrics::new(10.0, 20.0));
        let header = r
            .outline
            .add_child(Outline::ROOT, para("Header"), 1, "layer 1, child 0")
            .unwrap();
        r.outline.add_child(header, para("Point A"), 2, "layer 2, child 0").unwrap();
        r.annotations.push(para("Sidebar"));
        r.fragments.push(para("x"));
        r
    }

    #[test]
    fn test_nested_list() {
        let md = to_markdown(&sample(), &RenderOptions::default()).unwrap();
        assert_eq!(md, "- Header\n  - Point A\n\n## Annotations\n\n- Sidebar\n");
    }

    #[test]
    fn test_fragments_and_marker() {
        let options = RenderOptions::new()
            .with_fragments(true)
            .with_list_marker('*')
            .with_indent_width(4);
        let md = to_markdown(&sample(), &options).unwrap();
        assert!(md.contains("    * Point A"));
        assert!(md.contains("## Fragments\n\n* x"));
    }

    #[test]
    fn test_with_visitor() {
        let md = to_markdown_with_visitor(&sample(), &RenderOptions::default(), MaxDepthVisitor::new(1))
            .unwrap();
        assert!(md.contains("- Header"));
        assert!(!md.contains("Point A"));
    }

    #[test]
    fn test_replacement_and_labels() {
        struct Upper;
        impl OutlineVisitor for Upper {
            fn visit_node(&mut self, node: &OutlineNode) -> VisitorAction {
                VisitorAction::Replace(node.text().to_uppercase())
            }
        }

        let options = RenderOptions::new().with_labels(true).with_annotations(false);
        let md = to_markdown_with_visitor(&sample(), &options, Upper).unwrap();
        assert_eq!(md, "- **layer 1, child 0** HEADER\n  - **layer 2, child 0** POINT A\n");
    }

    #[test]
    fn test_escape_line_start() {
        assert_eq!(escape_line_start("# Title"), "\\# Title");
        assert_eq!(escape_line_start("- dash"), "\\- dash");
        assert_eq!(escape_line_start("-5 degrees"), "-5 degrees");
        assert_eq!(escape_line_start("plain"), "plain");
    }

    #[test]
    fn test_empty() {
        let r = Reconstruction::empty(GlyphMetrics::new(10.0, 20.0));
        assert_eq!(to_markdown(&r, &RenderOptions::default()).unwrap(), "");
    }
}
