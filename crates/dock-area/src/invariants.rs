//! Structural checks over a dock area's trees and gesture state.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::error::DockInvariantError;
use crate::interaction::InteractionState;
use crate::layer::LayerStack;
use crate::node::{MAX_SPLIT_RATIO, MIN_SPLIT_RATIO, Node, NodeArena, NodeId};

/// Check every layout invariant, returning the first violation found.
///
/// Layers are walked front to back, each tree depth-first. A node seen twice
/// (shared, or part of a cycle) is reported on its second visit.
pub fn check(
    nodes: &NodeArena,
    layers: &LayerStack,
    state: &InteractionState,
) -> Result<(), DockInvariantError> {
    let mut seen = FxHashSet::default();
    for (index, layer) in layers.iter().enumerate() {
        if !nodes.contains(layer.root) {
            return Err(DockInvariantError::MissingLayerRoot {
                layer: index,
                root: layer.root,
            });
        }
        check_tree(nodes, layer.root, &mut seen)?;
    }

    if let Some((node, _)) = nodes.iter().find(|(id, _)| !seen.contains(id)) {
        return Err(DockInvariantError::OrphanNode { node });
    }

    check_state(nodes, layers, state, &seen)
}

fn check_tree(
    nodes: &NodeArena,
    root: NodeId,
    seen: &mut FxHashSet<NodeId>,
) -> Result<(), DockInvariantError> {
    // Runs without a frame arena; depth stays inline for typical layouts.
    let mut stack: SmallVec<[NodeId; 16]> = SmallVec::new();
    stack.push(root);
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            return Err(DockInvariantError::SharedNode { node: id });
        }
        match nodes.node(id) {
            Node::Window(window) => {
                if window.tab_count() == 0 {
                    return Err(DockInvariantError::EmptyWindow { window: id });
                }
                if window.active_tab() >= window.tab_count() {
                    return Err(DockInvariantError::ActiveTabOutOfRange {
                        window: id,
                        active: window.active_tab(),
                        tabs: window.tab_count(),
                    });
                }
            }
            Node::Split(split) => {
                let ratio = split.ratio();
                if !(MIN_SPLIT_RATIO..=MAX_SPLIT_RATIO).contains(&ratio) {
                    return Err(DockInvariantError::SplitRatioOutOfRange { split: id, ratio });
                }
                for child in [split.a, split.b] {
                    if !nodes.contains(child) {
                        return Err(DockInvariantError::DanglingChild {
                            parent: Some(id),
                            child,
                        });
                    }
                    stack.push(child);
                }
            }
        }
    }
    Ok(())
}

fn check_state(
    nodes: &NodeArena,
    layers: &LayerStack,
    state: &InteractionState,
    reachable: &FxHashSet<NodeId>,
) -> Result<(), DockInvariantError> {
    let expect = |node: NodeId, expected: &'static str| {
        let ok = reachable.contains(&node)
            && match expected {
                "window" => nodes.get(node).and_then(Node::as_window).is_some(),
                _ => nodes.get(node).and_then(Node::as_split).is_some(),
            };
        if ok {
            Ok(())
        } else {
            Err(DockInvariantError::StaleStateReference { node, expected })
        }
    };
    match *state {
        InteractionState::Normal => Ok(()),
        InteractionState::Moving { .. } if layers.len() < 2 => {
            Err(DockInvariantError::MovingWithoutFloatingLayer {
                layers: layers.len(),
            })
        }
        InteractionState::Moving { .. } => Ok(()),
        InteractionState::ResizingSplit { split, .. } => expect(split, "split"),
        InteractionState::HoldingTab { window, .. } => expect(window, "window"),
    }
}
