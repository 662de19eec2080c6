//! Depth-first walks over layout trees.
//!
//! Every walk is pre-order (a split before its `a` subtree, `a` before `b`),
//! read-only, and collects into a [`FrameArena`] vector so callers can hold
//! the result while they decide what to mutate.

use dock_core::geometry::Rect;
use dock_render::arena::{ArenaVec, FrameArena};

use crate::geometry::{layer_rect, split_child_rects};
use crate::layer::LayerStack;
use crate::node::{Node, NodeArena, NodeId, Slot};

/// One node reached by [`traverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeVisit {
    pub id: NodeId,
    /// Rect the node occupies.
    pub rect: Rect,
    /// Where the node hangs.
    pub slot: Slot,
}

impl NodeVisit {
    #[must_use]
    pub fn has_split_parent(&self) -> bool {
        self.slot.split_parent().is_some()
    }
}

/// Walk the tree under `root`, giving each node its share of `rect`.
///
/// `root_slot` is reported for `root` itself; descendants report the split
/// they hang from.
pub fn traverse<'a>(
    nodes: &NodeArena,
    root: NodeId,
    root_slot: Slot,
    rect: Rect,
    arena: &'a FrameArena,
) -> ArenaVec<'a, NodeVisit> {
    let mut visits = arena.vec();
    let mut stack = arena.vec();
    stack.push(NodeVisit {
        id: root,
        rect,
        slot: root_slot,
    });
    while let Some(visit) = stack.pop() {
        if let Node::Split(split) = nodes.node(visit.id) {
            let (a_rect, b_rect) = split_child_rects(visit.rect, split.ratio(), split.axis);
            // b first so a pops first.
            stack.push(NodeVisit {
                id: split.b,
                rect: b_rect,
                slot: Slot::SplitB(visit.id),
            });
            stack.push(NodeVisit {
                id: split.a,
                rect: a_rect,
                slot: Slot::SplitA(visit.id),
            });
        }
        visits.push(visit);
    }
    visits
}

/// Walk the tree of the layer at `index`, sized to its effective rect.
pub fn traverse_layer<'a>(
    nodes: &NodeArena,
    layers: &LayerStack,
    index: usize,
    container: Rect,
    arena: &'a FrameArena,
) -> ArenaVec<'a, NodeVisit> {
    let rect = layer_rect(layers.as_slice(), index, container);
    let root = layers.as_slice()[index].root;
    traverse(nodes, root, Slot::LayerRoot(index), rect, arena)
}

/// Node ids under `root`, pre-order, without geometry.
pub fn traverse_ids<'a>(nodes: &NodeArena, root: NodeId, arena: &'a FrameArena) -> ArenaVec<'a, NodeId> {
    let mut ids = arena.vec();
    let mut stack = arena.vec();
    stack.push(root);
    while let Some(id) = stack.pop() {
        if let Node::Split(split) = nodes.node(id) {
            stack.push(split.b);
            stack.push(split.a);
        }
        ids.push(id);
    }
    ids
}

/// Slot of `target` across every layer, searched front to back.
#[must_use]
pub fn find_parent_slot(
    nodes: &NodeArena,
    layers: &LayerStack,
    target: NodeId,
    arena: &FrameArena,
) -> Option<Slot> {
    for (index, layer) in layers.iter().enumerate() {
        if layer.root == target {
            return Some(Slot::LayerRoot(index));
        }
        if let Some(slot) = find_in_tree(nodes, layer.root, target, arena) {
            return Some(slot);
        }
    }
    None
}

fn find_in_tree(nodes: &NodeArena, root: NodeId, target: NodeId, arena: &FrameArena) -> Option<Slot> {
    let mut stack = arena.vec();
    stack.push(root);
    while let Some(id) = stack.pop() {
        if let Node::Split(split) = nodes.node(id) {
            if split.a == target {
                return Some(Slot::SplitA(id));
            }
            if split.b == target {
                return Some(Slot::SplitB(id));
            }
            stack.push(split.b);
            stack.push(split.a);
        }
    }
    None
}

/// The split `target` hangs from, if any.
#[must_use]
pub fn find_split_parent(
    nodes: &NodeArena,
    layers: &LayerStack,
    target: NodeId,
    arena: &FrameArena,
) -> Option<NodeId> {
    find_parent_slot(nodes, layers, target, arena).and_then(Slot::split_parent)
}

/// Index of the layer whose tree contains `target`.
#[must_use]
pub fn find_layer_index(
    nodes: &NodeArena,
    layers: &LayerStack,
    target: NodeId,
    arena: &FrameArena,
) -> Option<usize> {
    layers.iter().position(|layer| {
        layer.root == target || find_in_tree(nodes, layer.root, target, arena).is_some()
    })
}

/// Layer index and rect of `target`, laid out in `container`.
#[must_use]
pub fn find_node_rect(
    nodes: &NodeArena,
    layers: &LayerStack,
    target: NodeId,
    container: Rect,
    arena: &FrameArena,
) -> Option<(usize, Rect)> {
    let index = find_layer_index(nodes, layers, target, arena)?;
    traverse_layer(nodes, layers, index, container, arena)
        .iter()
        .find(|visit| visit.id == target)
        .map(|visit| (index, visit.rect))
}
