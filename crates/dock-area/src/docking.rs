//! Structural edits: docking, untabbing, and layer reordering.
//!
//! These run only in the apply phase. Each leaves the trees valid on return;
//! a missing target means the caller built a bad op and is a panic.

use dock_core::geometry::{Extent, Position, Rect};
use dock_render::arena::FrameArena;

use crate::interaction::{DockJob, DockTarget};
use crate::layer::{Layer, LayerStack};
use crate::node::{Node, NodeArena, NodeId, Slot, SplitNode, WindowNode};
use crate::traverse::{find_parent_slot, traverse_ids};

/// Point `slot` at `node`.
pub fn replace_in_slot(nodes: &mut NodeArena, layers: &mut LayerStack, slot: Slot, node: NodeId) {
    match slot {
        Slot::LayerRoot(index) => layers.set_root(index, node),
        Slot::SplitA(split) => nodes.split_mut(split).a = node,
        Slot::SplitB(split) => nodes.split_mut(split).b = node,
    }
}

/// Dock the front layer's tree into `job.target`.
///
/// A center dock merges every tab of the source tree into the target window
/// and frees the source nodes. A directional dock puts the source and the
/// target side by side under a new split that takes the target's slot.
/// Either way the front layer is removed.
///
/// # Panics
///
/// Panics if there is no floating layer, if the target is not live in a
/// lower layer, or on a center dock into the back layer.
pub fn dock(nodes: &mut NodeArena, layers: &mut LayerStack, job: DockJob, arena: &FrameArena) {
    assert!(
        layers.len() >= 2,
        "dock needs a floating layer, found {} layers",
        layers.len()
    );
    let source = layers.remove(0).root;

    let Some(axis) = job.gizmo.split_axis() else {
        let DockTarget::Window(target) = job.target else {
            panic!("center dock into the back layer");
        };
        merge_tabs(nodes, source, target, arena);
        tracing::debug!(
            target: "dock_area",
            op = "dock",
            source = %source,
            window = %target,
            gizmo = ?job.gizmo,
            "merged front layer tabs"
        );
        return;
    };

    let target = match job.target {
        DockTarget::Window(window) => window,
        DockTarget::Outer => layers
            .get(layers.len() - 1)
            .map(|layer| layer.root)
            .unwrap_or_else(|| panic!("outer dock without a back layer")),
    };
    let slot = find_parent_slot(nodes, layers, target, arena)
        .unwrap_or_else(|| panic!("dock target {target} is not in any layer"));
    let (a, b) = if job.gizmo.incoming_first() {
        (source, target)
    } else {
        (target, source)
    };
    let split = nodes.insert(Node::Split(SplitNode::new(a, b, axis)));
    replace_in_slot(nodes, layers, slot, split);
    tracing::debug!(
        target: "dock_area",
        op = "dock",
        source = %source,
        target_node = %target,
        split = %split,
        gizmo = ?job.gizmo,
        "split target around front layer"
    );
}

/// Move every tab under `source` into `target`, then free `source`.
///
/// The target activates the tab that was active in the first source window.
fn merge_tabs(nodes: &mut NodeArena, source: NodeId, target: NodeId, arena: &FrameArena) {
    let mut windows = arena.vec();
    for id in traverse_ids(nodes, source, arena) {
        if matches!(nodes.node(id), Node::Window(_)) {
            windows.push(id);
        }
    }
    let first_active = windows
        .first()
        .map_or(0, |&window| nodes.window(window).active_tab());
    let previous = nodes.window(target).tab_count();
    for &window in &windows {
        let tabs = nodes.window_mut(window).take_tabs();
        nodes.window_mut(target).extend_tabs(tabs);
    }
    nodes.window_mut(target).set_active_tab(previous + first_active);
    nodes.free_subtree(source, arena);
}

/// Tear the active tab of `window` off into a new front layer at
/// `layer_position`. Returns the new window.
///
/// If `window` is left empty it disappears: its sibling takes over the
/// parent split's slot, or, for a layer root, the layer goes away.
///
/// # Panics
///
/// Panics if `window` is not live in any layer.
pub fn untab(
    nodes: &mut NodeArena,
    layers: &mut LayerStack,
    window: NodeId,
    layer_position: Position,
    extent: Extent,
    arena: &FrameArena,
) -> NodeId {
    let slot = find_parent_slot(nodes, layers, window, arena)
        .unwrap_or_else(|| panic!("untab source {window} is not in any layer"));
    let source = nodes.window_mut(window);
    let tab = source.remove_tab(source.active_tab());
    let tab_id = tab.id;

    if nodes.window(window).tab_count() == 0 {
        match slot {
            Slot::LayerRoot(index) => {
                layers.remove(index);
            }
            Slot::SplitA(parent) | Slot::SplitB(parent) => {
                let sibling = nodes
                    .split(parent)
                    .sibling_of(window)
                    .unwrap_or_else(|| panic!("split {parent} lost child {window}"));
                let parent_slot = find_parent_slot(nodes, layers, parent, arena)
                    .unwrap_or_else(|| panic!("split {parent} is not in any layer"));
                replace_in_slot(nodes, layers, parent_slot, sibling);
                nodes.remove(parent);
            }
        }
        nodes.remove(window);
    }

    let new_window = nodes.insert(Node::Window(WindowNode::new(tab)));
    layers.insert_front(Layer {
        root: new_window,
        rect: Rect::from_parts(layer_position, extent),
    });
    tracing::debug!(
        target: "dock_area",
        op = "untab",
        source = %window,
        window = %new_window,
        tab = tab_id.get(),
        "tab torn off into new layer"
    );
    new_window
}

/// Move the layer at `index` in front of every other layer.
pub fn push_layer_to_front(layers: &mut LayerStack, index: usize) {
    layers.push_to_front(index);
    tracing::debug!(target: "dock_area", op = "push_front", layer = index, "layer raised");
}

/// Drop the front layer and its whole tree. Returns the number of nodes freed.
///
/// # Panics
///
/// Panics if the only layer left is the back layer.
pub fn delete_front_layer(
    nodes: &mut NodeArena,
    layers: &mut LayerStack,
    arena: &FrameArena,
) -> usize {
    assert!(
        layers.len() >= 2,
        "cannot delete the back layer ({} layers)",
        layers.len()
    );
    let root = layers.remove(0).root;
    let freed = nodes.free_subtree(root, arena);
    tracing::debug!(target: "dock_area", op = "delete_layer", root = %root, freed, "front layer deleted");
    freed
}
