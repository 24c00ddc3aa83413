//! Plain text rendering: a box-drawing tree followed by annotations.

use crate::error::Result;
use crate::model::{NodeId, Outline, Paragraph, Reconstruction};

use super::visitor::{visible_children, DefaultVisitor, OutlineVisitor, VisitorAction};
use super::{CleanupPipeline, RenderOptions};

/// Convert a reconstruction to plain text.
pub fn to_text(reconstruction: &Reconstruction, options: &RenderOptions) -> Result<String> {
    to_text_with_visitor(reconstruction, options, &mut DefaultVisitor)
}

/// Convert a reconstruction to plain text, consulting a visitor for every
/// element.
pub fn to_text_with_visitor(
    reconstruction: &Reconstruction,
    options: &RenderOptions,
    visitor: &mut dyn OutlineVisitor,
) -> Result<String> {
    let renderer = TextRenderer::new(options);
    let mut output = String::new();

    output.push_str("root\n");
    renderer.render_children(
        &mut output,
        &reconstruction.outline,
        Outline::ROOT,
        "",
        visitor,
    );

    if options.include_annotations {
        renderer.render_list(&mut output, "Annotations", &reconstruction.annotations, |p| {
            visitor.visit_annotation(p)
        });
    }
    if options.include_fragments {
        renderer.render_list(&mut output, "Fragments", &reconstruction.fragments, |p| {
            visitor.visit_fragment(p)
        });
    }

    Ok(output.trim_end().to_string())
}

struct TextRenderer<'a> {
    options: &'a RenderOptions,
    pipeline: Option<CleanupPipeline>,
}

impl<'a> TextRenderer<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            pipeline: options.cleanup.clone().map(CleanupPipeline::new),
        }
    }

    fn clean(&self, text: &str) -> String {
        match &self.pipeline {
            Some(pipeline) => pipeline.process(text),
            None => text.trim().to_string(),
        }
    }

    fn render_children(
        &self,
        output: &mut String,
        outline: &Outline,
        id: NodeId,
        prefix: &str,
        visitor: &mut dyn OutlineVisitor,
    ) {
        let children = visible_children(outline, id, self.options, visitor);
        let count = children.len();

        for (i, child) in children.into_iter().enumerate() {
            let last = i + 1 == count;
            let (branch, continuation) = if last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };

            let text = match child.replacement {
                Some(text) => text,
                None => self.clean(child.node.text()),
            };

            output.push_str(prefix);
            output.push_str(branch);
            if self.options.show_labels {
                output.push_str(&format!("[{}] ", child.node.label));
            }
            output.push_str(&text);
            output.push('\n');

            let nested = format!("{}{}", prefix, continuation);
            self.render_children(output, outline, child.node.id, &nested, visitor);
        }
    }

    fn render_list<F>(&self, output: &mut String, title: &str, paragraphs: &[Paragraph], mut visit: F)
    where
        F: FnMut(&Paragraph) -> VisitorAction,
    {
        let mut lines = Vec::new();
        for paragraph in paragraphs {
            match visit(paragraph) {
                VisitorAction::Skip => continue,
                VisitorAction::Replace(text) => lines.push(text),
                VisitorAction::Continue => lines.push(self.clean(&paragraph.text)),
            }
        }
        if lines.is_empty() {
            return;
        }

        output.push('\n');
        output.push_str(title);
        output.push_str(":\n");
        let indent = " ".repeat(self.options.indent_width);
        for line in lines {
            output.push_str(&indent);
            output.push_str("• ");
            output.push_str(&line);
            output.push('\n');
        }
    }
}
