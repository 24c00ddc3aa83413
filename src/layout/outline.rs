//! Outline construction from indentation layers.
//!
//! The builder repeatedly picks the leftmost paragraph near the front of the
//! pool as the anchor of a new layer, gathers every paragraph at about the
//! same indentation, and hangs each of them under the closest paragraph of
//! the previous layer that starts above it. Whatever cannot be placed goes to
//! the annotation list, so every input paragraph is accounted for exactly
//! once.

use crate::model::{within_tolerance, GlyphMetrics, NodeId, Outline, Paragraph};

use super::options::LayoutOptions;

/// Tree and annotation list produced by [`OutlineBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct BuiltOutline {
    /// The outline tree
    pub outline: Outline,
    /// Paragraphs that could not be placed, in the order they were rejected
    pub annotations: Vec<Paragraph>,
    /// Number of layers that produced at least one node
    pub layers: usize,
}

/// Paragraph pool consumed by marking slots empty instead of removing them.
struct Pool {
    slots: Vec<Option<Paragraph>>,
    remaining: usize,
}

impl Pool {
    fn new(paragraphs: Vec<Paragraph>) -> Self {
        let remaining = paragraphs.len();
        Self {
            slots: paragraphs.into_iter().map(Some).collect(),
            remaining,
        }
    }

    fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Unconsumed paragraphs with their slot index, in input order.
    fn iter(&self) -> impl Iterator<Item = (usize, &Paragraph)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|p| (i, p)))
    }

    fn take(&mut self, index: usize) -> Option<Paragraph> {
        let paragraph = self.slots.get_mut(index)?.take()?;
        self.remaining -= 1;
        Some(paragraph)
    }

    fn drain(&mut self) -> Vec<Paragraph> {
        self.remaining = 0;
        self.slots.iter_mut().filter_map(Option::take).collect()
    }
}

/// A paragraph of the previous layer, as seen by the parent matcher.
#[derive(Debug, Clone, Copy)]
struct LayerMember {
    node: NodeId,
    top: f32,
}

/// Builds an outline tree from an ordered paragraph list.
#[derive(Debug, Clone, Copy)]
pub struct OutlineBuilder<'a> {
    metrics: GlyphMetrics,
    options: &'a LayoutOptions,
}

impl<'a> OutlineBuilder<'a> {
    /// Create a builder scaled by the page metrics.
    pub fn new(metrics: GlyphMetrics, options: &'a LayoutOptions) -> Self {
        Self { metrics, options }
    }

    /// Build the outline.
    ///
    /// Never fails: paragraphs that cannot be placed are returned as
    /// annotations. Each iteration consumes at least the anchor, so the loop
    /// runs at most once per paragraph.
    pub fn build(&self, paragraphs: Vec<Paragraph>) -> BuiltOutline {
        let w = self.metrics.avg_width;
        let h = self.metrics.avg_height;

        let mut pool = Pool::new(paragraphs);
        let mut result = BuiltOutline::default();
        let mut layer = 1usize;
        let mut previous: Vec<LayerMember> = Vec::new();
        let mut prev_anchor: Option<f32> = None;

        while !pool.is_empty() {
            let Some((anchor, anchor_x)) = self.select_anchor(&pool, prev_anchor) else {
                log::debug!(
                    "Layer {}: no paragraph right of the previous anchor, {} left as annotations",
                    layer,
                    pool.remaining
                );
                result.annotations.extend(pool.drain());
                break;
            };

            if let Some(prev_x) = prev_anchor {
                if anchor_x > prev_x + self.options.jump_threshold * w {
                    log::debug!(
                        "Layer {}: anchor jumped from x={:.1} to x={:.1}, {} left as annotations",
                        layer,
                        prev_x,
                        anchor_x,
                        pool.remaining
                    );
                    result.annotations.extend(pool.drain());
                    break;
                }
            }

            let members = self.collect_layer(&pool, anchor, anchor_x);
            log::debug!(
                "Layer {}: anchor x={:.1}, {} members",
                layer,
                anchor_x,
                members.len()
            );

            let mut accepted: Vec<LayerMember> = Vec::new();
            for index in members {
                let Some(paragraph) = pool.take(index) else {
                    continue;
                };

                let parent = if previous.is_empty() {
                    Some(Outline::ROOT)
                } else {
                    let limit = paragraph.top() + self.options.parent_tolerance * h;
                    previous
                        .iter()
                        .rev()
                        .find(|m| m.top <= limit)
                        .map(|m| m.node)
                };

                let Some(parent) = parent else {
                    log::debug!(
                        "Layer {}: no parent above y={:.1}, annotation {:?}",
                        layer,
                        paragraph.top(),
                        paragraph.trimmed()
                    );
                    result.annotations.push(paragraph);
                    continue;
                };

                let top = paragraph.top();
                let label = format!("layer {}, child {}", layer, accepted.len());
                match result.outline.add_child(parent, paragraph, layer, label) {
                    Ok(node) => accepted.push(LayerMember { node, top }),
                    Err(paragraph) => result.annotations.push(paragraph),
                }
            }

            if accepted.is_empty() {
                log::debug!(
                    "Layer {}: nothing attached, {} left as annotations",
                    layer,
                    pool.remaining
                );
                result.annotations.extend(pool.drain());
                break;
            }

            result.layers = layer;
            previous = accepted;
            prev_anchor = Some(anchor_x);
            layer += 1;
        }

        result
    }

    /// Leftmost paragraph among the first `anchor_lookahead` unconsumed
    /// paragraphs that do not sit left of the previous anchor.
    fn select_anchor(&self, pool: &Pool, prev_anchor: Option<f32>) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (index, paragraph) in pool
            .iter()
            .filter(|(_, p)| prev_anchor.map_or(true, |x| p.left() >= x))
            .take(self.options.anchor_lookahead)
        {
            let x = paragraph.left();
            if best.map_or(true, |(_, bx)| x < bx) {
                best = Some((index, x));
            }
        }
        best
    }

    /// Slot indices of the layer seeded at `anchor`, in pool order.
    ///
    /// The band follows a moving average of the accepted members' x, so a
    /// column that drifts slightly stays in one layer.
    fn collect_layer(&self, pool: &Pool, anchor: usize, anchor_x: f32) -> Vec<usize> {
        let tolerance = self.options.layer_tolerance * self.metrics.avg_width;
        let smoothing = self.options.layer_smoothing;
        let mut running_x = anchor_x;
        let mut members = Vec::new();

        for (index, paragraph) in pool.iter() {
            if index == anchor {
                members.push(index);
                continue;
            }
            let x = paragraph.left();
            if within_tolerance(x, running_x, tolerance) {
                members.push(index);
                running_x += (x - running_x) * smoothing;
            }
        }
        members
    }
}

/// Build an outline from an ordered paragraph list.
pub fn build_outline(
    paragraphs: Vec<Paragraph>,
    metrics: GlyphMetrics,
    options: &LayoutOptions,
) -> BuiltOutline {
    OutlineBuilder::new(metrics, options).build(paragraphs)
}
