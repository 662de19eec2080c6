//! Pointer interaction: the gesture state machine and content dispatch.
//!
//! Pointer handling runs in two phases. The read phase walks the layers with
//! shared borrows and describes what should change as a list of
//! [`PendingOp`]s. The apply phase (in [`DockArea`](crate::DockArea)) then
//! runs each op exactly once, ordered by [`PendingOp::phase`]. Nothing in
//! this module mutates a tree.
//!
//! # States
//!
//! ```text
//!            titlebar press (floating layer)          release
//!   Normal ─────────────────────────────────▶ Moving ─────────▶ Normal
//!     │  ╲      handle press          release    ▲               (dock / delete)
//!     │   ╲──────────────▶ ResizingSplit ──────▶ Normal
//!     │ tab press                                 │ dragged out of the titlebar band
//!     └──────────────────▶ HoldingTab ────────────┘ (untab)
//!                              └──── release ───▶ Normal
//! ```

use dock_core::event::{PointerId, PointerMove, PointerPress};
use dock_core::geometry::{Position, Rect, Vec2};
use dock_render::arena::{ArenaVec, FrameArena};
use dock_render::text::TextManager;
use smallvec::SmallVec;

use crate::config::DockConfig;
use crate::geometry::{
    LayoutMetrics, OuterGizmo, InnerGizmo, hit_delete_gizmo, hit_inner_gizmo, hit_outer_gizmo,
    hit_rect_index, layer_rect, resize_handle_rect, window_chrome, window_primary_rects,
};
use crate::layer::LayerStack;
use crate::node::{Node, NodeArena, NodeId, SplitAxis};
use crate::traverse::{find_node_rect, traverse_layer};

/// Gizmo under the pointer while a layer is being moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoveredGizmo {
    Outer(OuterGizmo),
    Delete,
    /// Pointer is over a window of a lower layer, optionally on one of its
    /// inner gizmos.
    Window {
        window: NodeId,
        gizmo: Option<InnerGizmo>,
    },
}

/// Current pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Normal,
    /// The front layer follows `pointer`.
    Moving {
        pointer: PointerId,
        /// Pointer position relative to the layer's top-left corner.
        pointer_offset: Vec2,
        hovered: Option<HoveredGizmo>,
    },
    ResizingSplit {
        split: NodeId,
        pointer: PointerId,
        /// The split lives in the back layer rather than the front one.
        resizing_back: bool,
    },
    /// A tab was pressed and may be torn off its window.
    HoldingTab {
        window: NodeId,
        tab_index: usize,
        pointer: PointerId,
        /// Pointer position relative to the tab's top-left corner.
        pointer_offset: Vec2,
    },
}

impl InteractionState {
    /// Pointer driving the gesture, if any.
    #[must_use]
    pub fn pointer(&self) -> Option<PointerId> {
        match *self {
            Self::Normal => None,
            Self::Moving { pointer, .. }
            | Self::ResizingSplit { pointer, .. }
            | Self::HoldingTab { pointer, .. } => Some(pointer),
        }
    }

    #[must_use]
    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Moving { .. } => "moving",
            Self::ResizingSplit { .. } => "resizing_split",
            Self::HoldingTab { .. } => "holding_tab",
        }
    }
}

/// What the front layer is docked into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockTarget {
    Window(NodeId),
    /// The back layer, through an outer gizmo.
    Outer,
}

/// Dock the front layer's tree into `target` on `gizmo`'s side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockJob {
    pub gizmo: InnerGizmo,
    pub target: DockTarget,
}

/// A deferred mutation produced by the read phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingOp {
    PushLayerToFront(usize),
    Dock(DockJob),
    ChangeState(InteractionState),
    SetActiveTab { window: NodeId, index: usize },
    /// New container-relative position of the front layer.
    MoveFrontLayer(Position),
    AdjustSplitRatio { split: NodeId, ratio: f32 },
    Untab {
        window: NodeId,
        layer_position: Position,
    },
    DeleteFrontLayer,
}

impl PendingOp {
    /// Apply order: tab jobs, structural jobs, layer order, layer position,
    /// ratios, then the state change.
    #[must_use]
    pub fn phase(&self) -> u8 {
        match self {
            Self::SetActiveTab { .. } | Self::Untab { .. } => 0,
            Self::Dock(_) | Self::DeleteFrontLayer => 1,
            Self::PushLayerToFront(_) => 2,
            Self::MoveFrontLayer(_) => 3,
            Self::AdjustSplitRatio { .. } => 4,
            Self::ChangeState(_) => 5,
        }
    }
}

pub type PendingOps = SmallVec<[PendingOp; 4]>;

/// Result of the read phase for one event.
#[derive(Debug, Default)]
pub struct Transition {
    pub ops: PendingOps,
    /// The event is consumed (press) or occluded (move) by the dock area.
    pub handled: bool,
}

impl Transition {
    /// Ops in apply order.
    #[must_use]
    pub fn into_sorted_ops(mut self) -> PendingOps {
        self.ops.sort_by_key(PendingOp::phase);
        self.ops
    }
}

/// Shared view of a dock area for the read phase.
pub struct InteractionCx<'c> {
    pub nodes: &'c NodeArena,
    pub layers: &'c LayerStack,
    pub config: &'c DockConfig,
    pub metrics: LayoutMetrics,
    pub text: &'c mut dyn TextManager,
    pub arena: &'c FrameArena,
    pub widget_rect: Rect,
    pub visible_rect: Rect,
}

impl InteractionCx<'_> {
    fn layer_rect(&self, index: usize) -> Rect {
        layer_rect(self.layers.as_slice(), index, self.widget_rect)
    }

    fn pointer_visible(&self, point: Vec2) -> bool {
        self.widget_rect.contains_point(point) && self.visible_rect.contains_point(point)
    }

    /// Container-relative front-layer position for a pointer at `point`
    /// holding the layer at `offset`.
    fn layer_position_for(&self, point: Vec2, offset: Vec2) -> Position {
        (point - offset).round() - self.widget_rect.position()
    }

    /// Window of layer `index` under `point`, preferring one whose inner
    /// gizmo is hit.
    fn hit_layer_inner_gizmo(&self, index: usize, point: Vec2) -> Option<HoveredGizmo> {
        let gizmo_size = self.config.gizmo_px();
        let factor = self.config.gizmo_offset_factor;
        let mut containing = None;
        for visit in &traverse_layer(self.nodes, self.layers, index, self.widget_rect, self.arena) {
            if !matches!(self.nodes.node(visit.id), Node::Window(_)) {
                continue;
            }
            if let Some(gizmo) = hit_inner_gizmo(visit.rect, gizmo_size, factor, point) {
                return Some(HoveredGizmo::Window {
                    window: visit.id,
                    gizmo: Some(gizmo),
                });
            }
            if containing.is_none() && visit.rect.contains_point(point) {
                containing = Some(visit.id);
            }
        }
        containing.map(|window| HoveredGizmo::Window {
            window,
            gizmo: None,
        })
    }

    /// First floating-or-back layer below the front one that contains `point`.
    fn lower_layer_at(&self, point: Vec2) -> Option<usize> {
        (1..self.layers.len()).find(|&index| self.layer_rect(index).contains_point(point))
    }
}

/// Read phase of a pointer press.
///
/// `consumed` is set when something in front of the dock area already took
/// the press. It starts no gesture then, but still ends the one in progress.
pub fn evaluate_press(
    cx: &mut InteractionCx<'_>,
    state: &InteractionState,
    event: PointerPress,
    consumed: bool,
) -> Transition {
    match *state {
        InteractionState::Normal => press_normal(cx, event, consumed),
        InteractionState::Moving { pointer, .. } => {
            let mut transition = Transition {
                handled: consumed || cx.pointer_visible(event.position),
                ..Transition::default()
            };
            if event.id == pointer && !event.pressed {
                release_moving(cx, event.position, &mut transition.ops);
            }
            transition
        }
        InteractionState::ResizingSplit { pointer, .. }
        | InteractionState::HoldingTab { pointer, .. } => {
            let mut transition = Transition {
                handled: consumed || cx.pointer_visible(event.position),
                ..Transition::default()
            };
            if event.id == pointer && !event.pressed {
                transition
                    .ops
                    .push(PendingOp::ChangeState(InteractionState::Normal));
            }
            transition
        }
    }
}

/// Read phase of a pointer move.
pub fn evaluate_move(
    cx: &mut InteractionCx<'_>,
    state: &InteractionState,
    event: PointerMove,
    occluded: bool,
) -> Transition {
    let mut transition = Transition {
        handled: occluded || cx.pointer_visible(event.position),
        ..Transition::default()
    };
    match *state {
        InteractionState::Normal => {}
        InteractionState::Moving {
            pointer,
            pointer_offset,
            hovered,
        } => {
            if event.id == pointer {
                move_moving(cx, event.position, pointer, pointer_offset, hovered, &mut transition);
            }
        }
        InteractionState::ResizingSplit { split, pointer, .. } => {
            if event.id == pointer {
                move_resizing(cx, event.position, split, &mut transition.ops);
            }
        }
        InteractionState::HoldingTab {
            window,
            pointer,
            pointer_offset,
            ..
        } => {
            if event.id == pointer {
                move_holding_tab(cx, event.position, window, pointer, pointer_offset, &mut transition.ops);
            }
        }
    }
    transition
}

fn press_normal(cx: &mut InteractionCx<'_>, event: PointerPress, already_consumed: bool) -> Transition {
    let mut transition = Transition {
        handled: already_consumed,
        ..Transition::default()
    };
    if !event.pressed {
        return transition;
    }
    let point = event.position;
    let Some(back) = cx.layers.back_index() else {
        return transition;
    };
    let thickness = cx.config.resize_handle_thickness_px();
    let length = cx.config.resize_handle_length_px();
    let visible = cx.pointer_visible(point);
    let mut consumed = already_consumed;
    let mut scheduled_push = false;

    for index in 0..cx.layers.len() {
        let layer_rect = cx.layer_rect(index);
        let in_layer = visible && layer_rect.contains_point(point);
        if consumed || !in_layer {
            consumed |= in_layer;
            continue;
        }
        if index != 0 && index != back && !scheduled_push {
            transition.ops.push(PendingOp::PushLayerToFront(index));
            scheduled_push = true;
        }

        let visits = traverse_layer(cx.nodes, cx.layers, index, cx.widget_rect, cx.arena);
        let handle_hit = visits.iter().find_map(|visit| match cx.nodes.node(visit.id) {
            Node::Split(split) => resize_handle_rect(visit.rect, thickness, length, split.ratio(), split.axis)
                .contains_point(point)
                .then_some(visit.id),
            Node::Window(_) => None,
        });
        if let Some(split) = handle_hit {
            transition
                .ops
                .push(PendingOp::ChangeState(InteractionState::ResizingSplit {
                    split,
                    pointer: event.id,
                    resizing_back: index == back,
                }));
            consumed = true;
            continue;
        }

        for visit in &visits {
            let Node::Window(window) = cx.nodes.node(visit.id) else {
                continue;
            };
            if !window_primary_rects(visit.rect, cx.metrics.titlebar_height)
                .titlebar
                .contains_point(point)
            {
                continue;
            }
            let chrome = window_chrome(window, visit.rect, cx.metrics, &mut *cx.text, cx.arena);
            let tab_hit = hit_rect_index(&chrome.tabs, point)
                .filter(|_| window.tab_count() > 1 || visit.has_split_parent());
            if let Some(tab_index) = tab_hit {
                transition.ops.push(PendingOp::SetActiveTab {
                    window: visit.id,
                    index: tab_index,
                });
                transition
                    .ops
                    .push(PendingOp::ChangeState(InteractionState::HoldingTab {
                        window: visit.id,
                        tab_index,
                        pointer: event.id,
                        pointer_offset: point - chrome.tabs[tab_index].position().to_vec2(),
                    }));
            } else if index != back {
                transition
                    .ops
                    .push(PendingOp::ChangeState(InteractionState::Moving {
                        pointer: event.id,
                        pointer_offset: point - layer_rect.position().to_vec2(),
                        hovered: None,
                    }));
            }
            break;
        }
        consumed = true;
    }

    transition.handled = consumed;
    transition
}

fn move_moving(
    cx: &mut InteractionCx<'_>,
    point: Vec2,
    pointer: PointerId,
    pointer_offset: Vec2,
    previous: Option<HoveredGizmo>,
    transition: &mut Transition,
) {
    let gizmo_size = cx.config.gizmo_px();
    let mut hovered = if hit_delete_gizmo(cx.widget_rect, gizmo_size, point) {
        Some(HoveredGizmo::Delete)
    } else {
        hit_outer_gizmo(cx.widget_rect, gizmo_size, point).map(HoveredGizmo::Outer)
    };

    let front = cx.layer_rect(0);
    let target = cx.layer_position_for(point, pointer_offset);
    let max_x = (cx.widget_rect.width as i32 - front.width as i32).max(0);
    let max_y = (cx.widget_rect.height as i32 - front.height as i32).max(0);
    transition.ops.push(PendingOp::MoveFrontLayer(Position::new(
        target.x.clamp(0, max_x),
        target.y.clamp(0, max_y),
    )));
    transition.handled = true;

    if hovered.is_none()
        && let Some(index) = cx.lower_layer_at(point)
    {
        hovered = cx.hit_layer_inner_gizmo(index, point);
    }

    if hovered != previous {
        transition
            .ops
            .push(PendingOp::ChangeState(InteractionState::Moving {
                pointer,
                pointer_offset,
                hovered,
            }));
    }
}

fn release_moving(cx: &mut InteractionCx<'_>, point: Vec2, ops: &mut PendingOps) {
    let gizmo_size = cx.config.gizmo_px();
    if hit_delete_gizmo(cx.widget_rect, gizmo_size, point) {
        ops.push(PendingOp::DeleteFrontLayer);
    } else if let Some(outer) = hit_outer_gizmo(cx.widget_rect, gizmo_size, point) {
        ops.push(PendingOp::Dock(DockJob {
            gizmo: outer.to_inner(),
            target: DockTarget::Outer,
        }));
    } else if let Some(index) = cx.lower_layer_at(point)
        && let Some(HoveredGizmo::Window {
            window,
            gizmo: Some(gizmo),
        }) = cx.hit_layer_inner_gizmo(index, point)
    {
        ops.push(PendingOp::Dock(DockJob {
            gizmo,
            target: DockTarget::Window(window),
        }));
    }
    ops.push(PendingOp::ChangeState(InteractionState::Normal));
}

fn move_resizing(cx: &mut InteractionCx<'_>, point: Vec2, split: NodeId, ops: &mut PendingOps) {
    let Some((_, rect)) = find_node_rect(cx.nodes, cx.layers, split, cx.widget_rect, cx.arena) else {
        panic!("resizing split {split} is not in any layer");
    };
    let ratio = match cx.nodes.split(split).axis {
        SplitAxis::Horizontal if rect.width > 0 => (point.x - rect.x as f32) / rect.width as f32,
        SplitAxis::Vertical if rect.height > 0 => (point.y - rect.y as f32) / rect.height as f32,
        _ => return,
    };
    ops.push(PendingOp::AdjustSplitRatio { split, ratio });
}

fn move_holding_tab(
    cx: &mut InteractionCx<'_>,
    point: Vec2,
    window: NodeId,
    pointer: PointerId,
    pointer_offset: Vec2,
    ops: &mut PendingOps,
) {
    let Some((_, rect)) = find_node_rect(cx.nodes, cx.layers, window, cx.widget_rect, cx.arena) else {
        panic!("held tab's window {window} is not in any layer");
    };
    let titlebar = window_primary_rects(rect, cx.metrics.titlebar_height).titlebar;
    let threshold = cx
        .config
        .undock_threshold_px()
        .unwrap_or(cx.metrics.titlebar_height) as f32;
    let top = titlebar.y as f32 - threshold;
    let bottom = titlebar.bottom() as f32 + threshold;
    if point.y >= top && point.y <= bottom {
        return;
    }
    ops.push(PendingOp::Untab {
        window,
        layer_position: cx.layer_position_for(point, pointer_offset),
    });
    ops.push(PendingOp::ChangeState(InteractionState::Moving {
        pointer,
        pointer_offset,
        hovered: None,
    }));
}

/// Content rects of every window's active widget for one pointer position,
/// front layer first, with the flag passed on to the widget.
#[allow(clippy::too_many_arguments)]
fn content_targets<'a>(
    nodes: &NodeArena,
    layers: &LayerStack,
    config: &DockConfig,
    metrics: LayoutMetrics,
    arena: &'a FrameArena,
    widget_rect: Rect,
    visible_rect: Rect,
    point: Vec2,
    mut flag: bool,
) -> ArenaVec<'a, (NodeId, Rect, Rect, bool)> {
    let thickness = config.resize_handle_thickness_px();
    let length = config.resize_handle_length_px();
    let mut targets = arena.vec();
    for index in 0..layers.len() {
        let layer_rect = layer_rect(layers.as_slice(), index, widget_rect);
        let visits = traverse_layer(nodes, layers, index, widget_rect, arena);
        let over_handle = visits.iter().any(|visit| match nodes.node(visit.id) {
            Node::Split(split) => resize_handle_rect(visit.rect, thickness, length, split.ratio(), split.axis)
                .contains_point(point),
            Node::Window(_) => false,
        });
        for visit in &visits {
            if !matches!(nodes.node(visit.id), Node::Window(_)) {
                continue;
            }
            let primary = window_primary_rects(visit.rect, metrics.titlebar_height);
            let blocked = flag || over_handle || primary.titlebar.contains_point(point);
            targets.push((
                visit.id,
                primary.content,
                primary.content.intersection(&visible_rect),
                blocked,
            ));
        }
        flag |= layer_rect.contains_point(point);
    }
    targets
}

/// Forward a press to every window's active widget. Returns `true` if any
/// widget consumed it. Every widget sees the press as blocked when `consumed`
/// is already set.
#[allow(clippy::too_many_arguments)]
pub fn dispatch_press(
    nodes: &mut NodeArena,
    layers: &LayerStack,
    config: &DockConfig,
    metrics: LayoutMetrics,
    arena: &FrameArena,
    widget_rect: Rect,
    visible_rect: Rect,
    event: PointerPress,
    consumed: bool,
) -> bool {
    let targets = content_targets(
        nodes,
        layers,
        config,
        metrics,
        arena,
        widget_rect,
        visible_rect,
        event.position,
        consumed,
    );
    let mut consumed = false;
    for &(window, content, visible, blocked) in &targets {
        let widget = &mut nodes.window_mut(window).active_mut().widget;
        consumed |= widget.pointer_press(event, content, visible, blocked);
    }
    consumed
}

/// Forward a move to every window's active widget. Returns `true` if any
/// widget occludes the pointer.
#[allow(clippy::too_many_arguments)]
pub fn dispatch_move(
    nodes: &mut NodeArena,
    layers: &LayerStack,
    config: &DockConfig,
    metrics: LayoutMetrics,
    arena: &FrameArena,
    widget_rect: Rect,
    visible_rect: Rect,
    event: PointerMove,
    occluded: bool,
) -> bool {
    let targets = content_targets(
        nodes,
        layers,
        config,
        metrics,
        arena,
        widget_rect,
        visible_rect,
        event.position,
        occluded,
    );
    let mut widget_occluded = false;
    for &(window, content, visible, blocked) in &targets {
        let widget = &mut nodes.window_mut(window).active_mut().widget;
        widget_occluded |= widget.pointer_move(event, content, visible, blocked);
    }
    widget_occluded
}
