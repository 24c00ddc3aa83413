//! Visitor pattern for customizing outline rendering.
//!
//! The visitor pattern allows users to customize how nodes, annotations and
//! fragments are rendered without modifying the core rendering logic.
//!
//! # Example
//!
//! ```
//! use outliner::model::OutlineNode;
//! use outliner::render::visitor::{OutlineVisitor, VisitorAction};
//!
//! struct ShoutingVisitor;
//!
//! impl OutlineVisitor for ShoutingVisitor {
//!     fn visit_node(&mut self, node: &OutlineNode) -> VisitorAction {
//!         VisitorAction::Replace(node.text().to_uppercase())
//!     }
//! }
//! ```

use crate::model::{NodeId, Outline, OutlineNode, Paragraph};

use super::RenderOptions;

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the element's text with custom output.
    Replace(String),

    /// Skip this element entirely (for nodes, including the subtree).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the element should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting outline elements during rendering.
///
/// Implement this trait to customize how specific elements are rendered.
/// All methods have default implementations that return
/// `VisitorAction::Continue`.
pub trait OutlineVisitor {
    /// Visit a tree node. Siblings are visited before their subtrees are
    /// rendered.
    fn visit_node(&mut self, node: &OutlineNode) -> VisitorAction {
        let _ = node;
        VisitorAction::Continue
    }

    /// Visit a paragraph from the annotation list.
    fn visit_annotation(&mut self, paragraph: &Paragraph) -> VisitorAction {
        let _ = paragraph;
        VisitorAction::Continue
    }

    /// Visit a fragment.
    fn visit_fragment(&mut self, paragraph: &Paragraph) -> VisitorAction {
        let _ = paragraph;
        VisitorAction::Continue
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl OutlineVisitor for DefaultVisitor {}

/// Visitor that drops every node below a layer.
#[derive(Debug, Clone)]
pub struct MaxDepthVisitor {
    max_layer: usize,
}

impl MaxDepthVisitor {
    /// Create a visitor that keeps layers `1..=max_layer`.
    pub fn new(max_layer: usize) -> Self {
        Self {
            max_layer: max_layer.max(1),
        }
    }
}

impl OutlineVisitor for MaxDepthVisitor {
    fn visit_node(&mut self, node: &OutlineNode) -> VisitorAction {
        if node.layer > self.max_layer {
            VisitorAction::Skip
        } else {
            VisitorAction::Continue
        }
    }
}

/// Visitor that hides annotations and fragments.
#[derive(Debug, Clone, Default)]
pub struct SkipAnnotationsVisitor;

impl OutlineVisitor for SkipAnnotationsVisitor {
    fn visit_annotation(&mut self, _paragraph: &Paragraph) -> VisitorAction {
        VisitorAction::Skip
    }

    fn visit_fragment(&mut self, _paragraph: &Paragraph) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn OutlineVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: OutlineVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    /// Number of chained visitors.
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Check if no visitors are chained.
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    fn first_action<F>(&mut self, mut visit: F) -> VisitorAction
    where
        F: FnMut(&mut dyn OutlineVisitor) -> VisitorAction,
    {
        for visitor in &mut self.visitors {
            let action = visit(visitor.as_mut());
            if action != VisitorAction::Continue {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineVisitor for CompositeVisitor {
    fn visit_node(&mut self, node: &OutlineNode) -> VisitorAction {
        self.first_action(|v| v.visit_node(node))
    }

    fn visit_annotation(&mut self, paragraph: &Paragraph) -> VisitorAction {
        self.first_action(|v| v.visit_annotation(paragraph))
    }

    fn visit_fragment(&mut self, paragraph: &Paragraph) -> VisitorAction {
        self.first_action(|v| v.visit_fragment(paragraph))
    }
}

/// A node that survived the visitor, with its replacement text if any.
pub(crate) struct VisibleNode<'a> {
    pub node: &'a OutlineNode,
    pub replacement: Option<String>,
}

/// Children of `id` that the options and visitor let through, in order.
pub(crate) fn visible_children<'a>(
    outline: &'a Outline,
    id: NodeId,
    options: &RenderOptions,
    visitor: &mut dyn OutlineVisitor,
) -> Vec<VisibleNode<'a>> {
    outline
        .children(id)
        .filter(|n| options.includes_layer(n.layer))
        .filter_map(|node| match visitor.visit_node(node) {
            VisitorAction::Skip => None,
            VisitorAction::Replace(text) => Some(VisibleNode {
                node,
                replacement: Some(text),
            }),
            VisitorAction::Continue => Some(VisibleNode {
                node,
                replacement: None,
            }),
        })
        .collect()
}
