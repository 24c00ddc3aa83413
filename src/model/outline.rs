//! The reconstructed outline tree.
//!
//! Nodes live in an arena owned by [`Outline`]; parent links are indices
//! into that arena rather than pointers. Node 0 is the synthetic root and is
//! the only node without a paragraph.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Paragraph, Rect, Sentence};
use crate::error::Result;
use crate::language::LanguageAnalyzer;

/// Index of a node in the outline arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// A node of the outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Position in the arena
    pub id: NodeId,
    /// Human-readable label, e.g. `layer 2, child 0`
    pub label: String,
    /// Layer the node was discovered in (0 for the root)
    pub layer: usize,
    /// The paragraph this node stands for; `None` only for the root
    pub paragraph: Option<Paragraph>,
    /// Parent node; `None` only for the root
    pub parent: Option<NodeId>,
    /// Children in left-to-right layer order
    pub children: Vec<NodeId>,
    /// Sentence payload attached after construction
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sentences: Vec<Sentence>,
}

impl OutlineNode {
    /// Check if this is the synthetic root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Paragraph text, empty for the root.
    pub fn text(&self) -> &str {
        self.paragraph.as_ref().map(|p| p.text.as_str()).unwrap_or("")
    }
}

/// Rooted outline tree stored as an arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    nodes: Vec<OutlineNode>,
}

impl Outline {
    /// Id of the synthetic root.
    pub const ROOT: NodeId = NodeId(0);

    /// Create an outline holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![OutlineNode {
                id: Self::ROOT,
                label: "root".to_string(),
                layer: 0,
                paragraph: None,
                parent: None,
                children: Vec::new(),
                sentences: Vec::new(),
            }],
        }
    }

    /// Append a paragraph as the last child of `parent`.
    ///
    /// Hands the paragraph back if `parent` is not in this outline.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        paragraph: Paragraph,
        layer: usize,
        label: impl Into<String>,
    ) -> std::result::Result<NodeId, Paragraph> {
        if parent.0 >= self.nodes.len() {
            return Err(paragraph);
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(OutlineNode {
            id,
            label: label.into(),
            layer,
            paragraph: Some(paragraph),
            parent: Some(parent),
            children: Vec::new(),
            sentences: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// The synthetic root.
    pub fn root(&self) -> &OutlineNode {
        &self.nodes[Self::ROOT.0]
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&OutlineNode> {
        self.nodes.get(id.0)
    }

    /// All nodes in creation order, root first.
    pub fn nodes(&self) -> &[OutlineNode] {
        &self.nodes
    }

    /// Number of nodes excluding the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Check if the root has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of layers (deepest node layer).
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.layer).max().unwrap_or(0)
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<&OutlineNode> {
        self.get(id)
            .and_then(|n| n.parent)
            .and_then(|p| self.get(p))
    }

    /// Children of a node in order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &OutlineNode> + '_ {
        self.get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |c| self.get(*c))
    }

    /// Ancestor chain from the parent up to and including the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            outline: self,
            next: self.get(id).and_then(|n| n.parent),
        }
    }

    /// The other children of this node's parent, in order.
    pub fn siblings(&self, id: NodeId) -> Vec<&OutlineNode> {
        match self.get(id).and_then(|n| n.parent) {
            Some(parent) => self.children(parent).filter(|n| n.id != id).collect(),
            None => Vec::new(),
        }
    }

    /// Pre-order traversal of every node except the root.
    pub fn pre_order(&self) -> PreOrder<'_> {
        let mut stack: Vec<NodeId> = self.root().children.clone();
        stack.reverse();
        PreOrder {
            outline: self,
            stack,
        }
    }

    /// Paragraphs in pre-order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> + '_ {
        self.pre_order().filter_map(|n| n.paragraph.as_ref())
    }

    /// Convert the arena into a nested tree of entries under the root.
    pub fn to_entries(&self) -> Vec<OutlineEntry> {
        self.children(Self::ROOT)
            .map(|n| self.entry_for(n))
            .collect()
    }

    fn entry_for(&self, node: &OutlineNode) -> OutlineEntry {
        OutlineEntry {
            label: node.label.clone(),
            layer: node.layer,
            text: node.text().to_string(),
            bounding_box: node.paragraph.as_ref().map(|p| p.bounding_box).unwrap_or_default(),
            sentences: node.sentences.clone(),
            children: self.children(node.id).map(|c| self.entry_for(c)).collect(),
        }
    }

    /// Run a language analyzer over every node's paragraph text and store
    /// the resulting sentences on the node.
    pub fn attach_sentences(
        &mut self,
        analyzer: &dyn LanguageAnalyzer,
        parallel: bool,
    ) -> Result<()> {
        let jobs: Vec<(NodeId, String)> = self
            .nodes
            .iter()
            .filter_map(|n| n.paragraph.as_ref().map(|p| (n.id, p.text.clone())))
            .collect();

        let analyzed: Vec<(NodeId, Vec<Sentence>)> = if parallel {
            jobs.par_iter()
                .map(|(id, text)| analyzer.analyze(text).map(|s| (*id, s)))
                .collect::<Result<Vec<_>>>()?
        } else {
            jobs.iter()
                .map(|(id, text)| analyzer.analyze(text).map(|s| (*id, s)))
                .collect::<Result<Vec<_>>>()?
        };

        for (id, sentences) in analyzed {
            self.nodes[id.0].sentences = sentences;
        }
        Ok(())
    }
}

impl Default for Outline {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's ancestors, nearest first.
pub struct Ancestors<'a> {
    outline: &'a Outline,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a OutlineNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.outline.get(self.next?)?;
        self.next = node.parent;
        Some(node)
    }
}

/// Depth-first pre-order iterator.
pub struct PreOrder<'a> {
    outline: &'a Outline,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a OutlineNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.outline.get(self.stack.pop()?)?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Nested, serialisable view of an outline node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Node label
    pub label: String,
    /// Layer number
    pub layer: usize,
    /// Paragraph text
    pub text: String,
    /// Paragraph extent
    pub bounding_box: Rect,
    /// Attached sentences
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sentences: Vec<Sentence>,
    /// Child entries
    pub children: Vec<OutlineEntry>,
}

impl OutlineEntry {
    /// Number of entries in this subtree, including this one.
    pub fn total_entries(&self) -> usize {
        1 + self.children.iter().map(|c| c.total_entries()).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;

    fn para(text: &str, x: f32, y: f32) -> Paragraph {
        Paragraph {
            text: text.to_string(),
            bounding_box: Rect::new(Point::new(x, y), Point::new(x + 100.0, y + 10.0)),
            members: Vec::new(),
            line_count: 1,
        }
    }

    fn sample() -> (Outline, NodeId, NodeId, NodeId, NodeId) {
        let mut outline = Outline::new();
        let a = outline.add_child(Outline::ROOT, para("A", 0.0, 0.0), 1, "a").unwrap();
        let a1 = outline.add_child(a, para("A1", 20.0, 20.0), 2, "a1").unwrap();
        let a2 = outline.add_child(a, para("A2", 20.0, 40.0), 2, "a2").unwrap();
        let b = outline.add_child(Outline::ROOT, para("B", 0.0, 60.0), 1, "b").unwrap();
        (outline, a, a1, a2, b)
    }

    #[test]
    fn test_new_outline_is_empty() {
        let outline = Outline::new();
        assert!(outline.is_empty());
        assert!(outline.root().is_root());
        assert_eq!(outline.depth(), 0);
        assert_eq!(outline.pre_order().count(), 0);
    }

    #[test]
    fn test_pre_order() {
        let (outline, ..) = sample();
        let texts: Vec<&str> = outline.pre_order().map(|n| n.text()).collect();
        assert_eq!(texts, vec!["A", "A1", "A2", "B"]);
        assert_eq!(outline.len(), 4);
        assert_eq!(outline.depth(), 2);
    }

    #[test]
    fn test_ancestors_and_siblings() {
        let (outline, a, a1, a2, b) = sample();
        let chain: Vec<NodeId> = outline.ancestors(a2).map(|n| n.id).collect();
        assert_eq!(chain, vec![a, Outline::ROOT]);

        let sibs: Vec<NodeId> = outline.siblings(a1).iter().map(|n| n.id).collect();
        assert_eq!(sibs, vec![a2]);

        let top: Vec<NodeId> = outline.siblings(b).iter().map(|n| n.id).collect();
        assert_eq!(top, vec![a]);
        assert!(outline.siblings(Outline::ROOT).is_empty());
    }

    #[test]
    fn test_add_child_unknown_parent() {
        let mut outline = Outline::new();
        let rejected = outline.add_child(NodeId(7), para("x", 0.0, 0.0), 1, "x");
        assert_eq!(rejected.unwrap_err().text, "x");
        assert!(outline.is_empty());
    }

    #[test]
    fn test_to_entries() {
        let (outline, ..) = sample();
        let entries = outline.to_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].children.len(), 2);
        let total: usize = entries.iter().map(|e| e.total_entries()).sum();
        assert_eq!(total, 4);
    }
}
