//! The dock area: owner of the layout trees and entry point for every event.
//!
//! # Event flow
//!
//! Each pointer entry point runs the same pipeline:
//!
//! 1. forward the event to every window's active content widget,
//! 2. evaluate the current [`InteractionState`] read-only, producing
//!    [`PendingOp`]s,
//! 3. apply the ops in phase order,
//! 4. re-check the layout invariants.
//!
//! Scratch memory for all four steps comes from the caller's [`FrameArena`],
//! which the host resets between calls.

use dock_core::event::{
    CharRemoveEvent, CursorMoveEvent, CursorPressEvent, EndTextInputSessionEvent, PointerMove,
    PointerPress, TextInputEvent, TouchMoveEvent, TouchPressEvent,
};
use dock_core::geometry::{Position, Rect};
use dock_render::arena::FrameArena;
use dock_render::color::Rgba;
use dock_render::draw::DrawSink;
use dock_render::text::TextManager;

use crate::config::DockConfig;
use crate::docking;
use crate::error::{DockConfigError, DockInvariantError};
use crate::geometry::{LayoutMetrics, layer_rect, window_primary_rects};
use crate::interaction::{self, InteractionCx, InteractionState, PendingOp, PendingOps};
use crate::invariants;
use crate::layer::{Layer, LayerStack};
use crate::node::{Node, NodeArena, NodeId, Tab, TabId, WindowNode};
use crate::rect_collection::{RectCollection, RectPair};
use crate::render::{self, RenderCx};
use crate::traverse::traverse_layer;
use crate::widget::{DockWidget, SizeHint};

/// Per-call collaborators and placement of the dock area.
pub struct FrameCx<'a> {
    pub text: &'a mut dyn TextManager,
    pub arena: &'a FrameArena,
    /// Full rect of the dock area.
    pub widget_rect: Rect,
    /// Part of `widget_rect` that is on screen.
    pub visible_rect: Rect,
}

/// Tabbed windows in split trees, stacked in floating layers.
pub struct DockArea {
    nodes: NodeArena,
    layers: LayerStack,
    state: InteractionState,
    config: DockConfig,
    next_tab_id: u64,
}

impl Default for DockArea {
    fn default() -> Self {
        Self::new()
    }
}

impl DockArea {
    /// An empty dock area with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: NodeArena::new(),
            layers: LayerStack::new(),
            state: InteractionState::Normal,
            config: DockConfig::default(),
            next_tab_id: 1,
        }
    }

    /// An empty dock area with `config`, rejected if it does not validate.
    pub fn with_config(config: DockConfig) -> Result<Self, DockConfigError> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(DockConfigError::Validation(errors));
        }
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    // -- accessors ---------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    #[must_use]
    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn nodes(&self) -> &NodeArena {
        &self.nodes
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Effective rect of the layer at `index` inside `container`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn layer_rect(&self, index: usize, container: Rect) -> Rect {
        layer_rect(self.layers.as_slice(), index, container)
    }

    /// Window holding `tab`, and the tab's index in it.
    #[must_use]
    pub fn find_tab(&self, tab: TabId) -> Option<(NodeId, usize)> {
        self.nodes.iter().find_map(|(id, node)| {
            node.as_window()?
                .tabs()
                .iter()
                .position(|t| t.id == tab)
                .map(|index| (id, index))
        })
    }

    /// Check every layout invariant.
    pub fn validate(&self) -> Result<(), DockInvariantError> {
        invariants::check(&self.nodes, &self.layers, &self.state)
    }

    fn assert_valid(&self) {
        if let Err(err) = self.validate() {
            panic!("dock area invariant violated: {err}");
        }
    }

    // -- structure ---------------------------------------------------------

    /// Open `widget` in a new single-tab window on a new front layer.
    ///
    /// New layers spawn at the container origin, shifted by the spawn offset
    /// when the current front floating layer already sits there. Any gesture
    /// in progress is cancelled.
    pub fn add_window(
        &mut self,
        title: impl Into<String>,
        color: Rgba,
        widget: Box<dyn DockWidget>,
    ) -> TabId {
        if !self.state.is_normal() {
            self.set_state(InteractionState::Normal);
        }
        let id = TabId::new(self.next_tab_id);
        self.next_tab_id += 1;
        let title = title.into();

        let mut position = Position::default();
        if self.layers.len() >= 2
            && self.layers.get(0).map(|layer| layer.rect.position()) == Some(position)
        {
            position += self.config.spawn_offset_px();
        }

        tracing::debug!(
            target: "dock_area",
            op = "add_window",
            tab = id.get(),
            title = %title,
            x = position.x,
            y = position.y,
            "window added"
        );
        let root = self.nodes.insert(Node::Window(WindowNode::new(Tab {
            id,
            title,
            color,
            widget,
        })));
        self.layers.insert_front(Layer {
            root,
            rect: Rect::from_parts(position, self.config.default_layer_extent_px()),
        });
        self.assert_valid();
        id
    }

    // -- pointer input -----------------------------------------------------

    pub fn cursor_move(&mut self, event: CursorMoveEvent, occluded: bool, cx: &mut FrameCx<'_>) -> bool {
        self.pointer_move(event.into(), occluded, cx)
    }

    pub fn cursor_press(&mut self, event: CursorPressEvent, consumed: bool, cx: &mut FrameCx<'_>) -> bool {
        self.pointer_press(event.into(), consumed, cx)
    }

    pub fn touch_move(&mut self, event: TouchMoveEvent, occluded: bool, cx: &mut FrameCx<'_>) -> bool {
        self.pointer_move(event.into(), occluded, cx)
    }

    pub fn touch_press(&mut self, event: TouchPressEvent, consumed: bool, cx: &mut FrameCx<'_>) -> bool {
        self.pointer_press(event.into(), consumed, cx)
    }

    /// Handle a pointer move. Returns `true` if the dock area or one of its
    /// widgets occludes the pointer.
    pub fn pointer_move(&mut self, event: PointerMove, occluded: bool, cx: &mut FrameCx<'_>) -> bool {
        let _span = tracing::debug_span!(
            "dock_area.pointer_move",
            pointer = event.id.get(),
            state = self.state.name(),
        )
        .entered();

        let metrics = LayoutMetrics::measure(&self.config, &mut *cx.text);
        let widget_occluded = interaction::dispatch_move(
            &mut self.nodes,
            &self.layers,
            &self.config,
            metrics,
            cx.arena,
            cx.widget_rect,
            cx.visible_rect,
            event,
            occluded,
        );
        let transition = {
            let mut icx = self.interaction_cx(metrics, cx);
            interaction::evaluate_move(&mut icx, &self.state, event, occluded)
        };
        let handled = transition.handled || widget_occluded;
        self.apply(transition.into_sorted_ops(), cx.arena);
        self.assert_valid();
        handled
    }

    /// Handle a pointer press or release. Returns `true` if the press was
    /// already `consumed` in front of the dock area, or if the dock area or
    /// one of its widgets consumed it.
    ///
    /// A consumed press reaches widgets as blocked and starts no gesture.
    pub fn pointer_press(&mut self, event: PointerPress, consumed: bool, cx: &mut FrameCx<'_>) -> bool {
        let _span = tracing::debug_span!(
            "dock_area.pointer_press",
            pointer = event.id.get(),
            pressed = event.pressed,
            consumed,
            state = self.state.name(),
        )
        .entered();

        let metrics = LayoutMetrics::measure(&self.config, &mut *cx.text);
        let widget_consumed = interaction::dispatch_press(
            &mut self.nodes,
            &self.layers,
            &self.config,
            metrics,
            cx.arena,
            cx.widget_rect,
            cx.visible_rect,
            event,
            consumed,
        );
        let transition = {
            let mut icx = self.interaction_cx(metrics, cx);
            interaction::evaluate_press(&mut icx, &self.state, event, consumed)
        };
        let handled = consumed || transition.handled || widget_consumed;
        self.apply(transition.into_sorted_ops(), cx.arena);
        self.assert_valid();
        handled
    }

    fn interaction_cx<'c>(&'c self, metrics: LayoutMetrics, cx: &'c mut FrameCx<'_>) -> InteractionCx<'c> {
        InteractionCx {
            nodes: &self.nodes,
            layers: &self.layers,
            config: &self.config,
            metrics,
            text: &mut *cx.text,
            arena: cx.arena,
            widget_rect: cx.widget_rect,
            visible_rect: cx.visible_rect,
        }
    }

    fn apply(&mut self, ops: PendingOps, arena: &FrameArena) {
        for op in ops {
            match op {
                PendingOp::SetActiveTab { window, index } => {
                    self.nodes.window_mut(window).set_active_tab(index);
                }
                PendingOp::Untab {
                    window,
                    layer_position,
                } => {
                    docking::untab(
                        &mut self.nodes,
                        &mut self.layers,
                        window,
                        layer_position,
                        self.config.default_layer_extent_px(),
                        arena,
                    );
                }
                PendingOp::Dock(job) => {
                    docking::dock(&mut self.nodes, &mut self.layers, job, arena);
                }
                PendingOp::DeleteFrontLayer => {
                    docking::delete_front_layer(&mut self.nodes, &mut self.layers, arena);
                }
                PendingOp::PushLayerToFront(index) => {
                    docking::push_layer_to_front(&mut self.layers, index);
                }
                PendingOp::MoveFrontLayer(position) => {
                    if let Some(front) = self.layers.front_mut() {
                        front.rect.x = position.x;
                        front.rect.y = position.y;
                    }
                }
                PendingOp::AdjustSplitRatio { split, ratio } => {
                    self.nodes.split_mut(split).set_ratio(ratio);
                }
                PendingOp::ChangeState(state) => self.set_state(state),
            }
        }
    }

    fn set_state(&mut self, state: InteractionState) {
        tracing::trace!(
            target: "dock_area",
            from = self.state.name(),
            to = state.name(),
            "interaction state changed"
        );
        self.state = state;
    }

    /// Abort any gesture and tell every widget its pointers are gone.
    pub fn input_connection_lost(&mut self, arena: &FrameArena) {
        if !self.state.is_normal() {
            self.set_state(InteractionState::Normal);
        }
        self.for_each_active_widget(arena, |widget| widget.input_connection_lost());
        self.assert_valid();
    }

    // -- text input --------------------------------------------------------

    /// Forward committed text to every window's active widget.
    pub fn text_input(&mut self, event: &TextInputEvent, arena: &FrameArena) {
        self.for_each_active_widget(arena, |widget| widget.text_input(event));
    }

    pub fn end_text_input_session(&mut self, event: EndTextInputSessionEvent, arena: &FrameArena) {
        self.for_each_active_widget(arena, |widget| widget.end_text_input_session(event));
    }

    pub fn char_remove(&mut self, event: CharRemoveEvent, arena: &FrameArena) {
        self.for_each_active_widget(arena, |widget| widget.char_remove(event));
    }

    /// Call `f` on each active widget, front layer first.
    fn for_each_active_widget(&mut self, arena: &FrameArena, mut f: impl FnMut(&mut dyn DockWidget)) {
        let mut windows = arena.vec();
        for index in 0..self.layers.len() {
            for visit in &traverse_layer(&self.nodes, &self.layers, index, Rect::default(), arena) {
                if matches!(self.nodes.node(visit.id), Node::Window(_)) {
                    windows.push(visit.id);
                }
            }
        }
        for &window in &windows {
            f(self.nodes.window_mut(window).active_mut().widget.as_mut());
        }
    }

    // -- layout and drawing ------------------------------------------------

    /// Preferred size, and the text metrics later layout calls need.
    pub fn size_hint(&self, text: &mut dyn TextManager) -> (SizeHint, LayoutMetrics) {
        let hint = SizeHint {
            minimum: self.config.min_size_px(),
            expand_x: true,
            expand_y: true,
        };
        (hint, LayoutMetrics::measure(&self.config, text))
    }

    /// Lay out every window's active widget, recording its rects in `rects`.
    pub fn build_child_rects(
        &self,
        metrics: LayoutMetrics,
        widget_rect: Rect,
        visible_rect: Rect,
        rects: &mut RectCollection,
        arena: &FrameArena,
    ) {
        for index in 0..self.layers.len() {
            for visit in &traverse_layer(&self.nodes, &self.layers, index, widget_rect, arena) {
                let Node::Window(window) = self.nodes.node(visit.id) else {
                    continue;
                };
                let content = window_primary_rects(visit.rect, metrics.titlebar_height).content;
                let visible = content.intersection(&visible_rect);
                let active = window.active();
                rects.insert(
                    active.id,
                    RectPair {
                        widget_rect: content,
                        visible_rect: visible,
                    },
                );
                active.widget.build_child_rects(content, visible);
            }
        }
    }

    /// Draw the dock area.
    pub fn render(&self, draw: &mut dyn DrawSink, metrics: LayoutMetrics, cx: &mut FrameCx<'_>) {
        let mut rcx = RenderCx {
            nodes: &self.nodes,
            layers: &self.layers,
            config: &self.config,
            state: &self.state,
            metrics,
            text: &mut *cx.text,
            arena: cx.arena,
            widget_rect: cx.widget_rect,
            visible_rect: cx.visible_rect,
        };
        render::render(&mut rcx, draw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::InnerGizmo;
    use crate::interaction::HoveredGizmo;
    use crate::node::SplitAxis;
    use crate::widget::EmptyWidget;
    use dock_core::event::PointerId;
    use dock_core::geometry::{Extent, Vec2};
    use dock_render::draw::DrawList;
    use dock_render::text::MonospaceText;
    use tracing_test::traced_test;

    const CONTAINER: Rect = Rect::new(0, 0, 1000, 800);

    fn area_with(titles: &[&str]) -> DockArea {
        let mut area = DockArea::new();
        for title in titles {
            area.add_window(*title, Rgba::WHITE, Box::new(EmptyWidget));
        }
        area
    }

    fn press(area: &mut DockArea, x: f32, y: f32, pressed: bool) -> bool {
        let arena = FrameArena::default();
        let mut text = MonospaceText;
        let mut cx = FrameCx {
            text: &mut text,
            arena: &arena,
            widget_rect: CONTAINER,
            visible_rect: CONTAINER,
        };
        area.cursor_press(
            CursorPressEvent {
                position: Vec2::new(x, y),
                pressed,
            },
            false,
            &mut cx,
        )
    }

    fn drag(area: &mut DockArea, x: f32, y: f32) -> bool {
        let arena = FrameArena::default();
        let mut text = MonospaceText;
        let mut cx = FrameCx {
            text: &mut text,
            arena: &arena,
            widget_rect: CONTAINER,
            visible_rect: CONTAINER,
        };
        area.cursor_move(
            CursorMoveEvent {
                position: Vec2::new(x, y),
            },
            false,
            &mut cx,
        )
    }

    #[test]
    fn add_window_spawns_with_offset_only_on_collision() {
        let area = area_with(&["A", "B", "C", "D"]);
        assert_eq!(area.layer_count(), 4);
        let positions: Vec<Position> = area.layers().iter().map(|l| l.rect.position()).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 0),
                Position::new(150, 150),
                Position::new(0, 0),
                Position::new(0, 0),
            ]
        );
        assert_eq!(area.layers().get(0).map(|l| l.rect.extent()), Some(Extent::new(400, 400)));
        assert_eq!(area.validate(), Ok(()));
    }

    #[test]
    fn tab_ids_are_unique_and_findable() {
        let mut area = DockArea::new();
        let a = area.add_window("a", Rgba::WHITE, Box::new(EmptyWidget));
        let b = area.add_window("b", Rgba::WHITE, Box::new(EmptyWidget));
        assert_ne!(a, b);
        let (window, index) = area.find_tab(b).expect("tab b");
        assert_eq!(index, 0);
        assert_eq!(area.layers().get(0).map(|l| l.root), Some(window));
    }

    #[test]
    fn with_config_rejects_invalid_config() {
        let config = DockConfig {
            gizmo_size: 0,
            ..DockConfig::default()
        };
        assert!(matches!(
            DockArea::with_config(config),
            Err(DockConfigError::Validation(errors)) if errors.len() == 1
        ));
        assert!(DockArea::with_config(DockConfig::default()).is_ok());
    }

    #[test]
    fn titlebar_drag_moves_front_layer() {
        let mut area = area_with(&["back", "front"]);
        assert!(press(&mut area, 100.0, 10.0, true));
        assert!(matches!(
            area.state(),
            InteractionState::Moving { pointer_offset, .. } if *pointer_offset == Vec2::new(100.0, 10.0)
        ));
        drag(&mut area, 400.0, 300.0);
        assert_eq!(area.layers().get(0).map(|l| l.rect.position()), Some(Position::new(300, 290)));
        press(&mut area, 400.0, 300.0, false);
        assert!(area.state().is_normal());
        assert_eq!(area.layer_count(), 2);
    }

    #[test]
    fn consumed_press_starts_no_gesture() {
        let mut area = area_with(&["back", "front"]);
        let arena = FrameArena::default();
        let mut text = MonospaceText;
        let mut cx = FrameCx {
            text: &mut text,
            arena: &arena,
            widget_rect: CONTAINER,
            visible_rect: CONTAINER,
        };
        let event = CursorPressEvent {
            position: Vec2::new(100.0, 10.0),
            pressed: true,
        };
        assert!(area.cursor_press(event, true, &mut cx));
        assert!(area.state().is_normal());
        assert!(area.cursor_press(event, false, &mut cx));
        assert!(matches!(area.state(), InteractionState::Moving { .. }));
    }

    #[test]
    fn dock_left_creates_horizontal_split() {
        let mut area = area_with(&["back", "front"]);
        let back_root = area.layers().get(1).expect("back").root;
        let front_root = area.layers().get(0).expect("front").root;
        press(&mut area, 100.0, 10.0, true);
        // Left inner gizmo of the back window (container center 500,400).
        drag(&mut area, 437.0, 400.0);
        assert!(matches!(
            area.state(),
            InteractionState::Moving {
                hovered: Some(HoveredGizmo::Window { gizmo: Some(InnerGizmo::Left), .. }),
                ..
            }
        ));
        press(&mut area, 437.0, 400.0, false);

        assert_eq!(area.layer_count(), 1);
        let root = area.layers().get(0).expect("back").root;
        let Some(Node::Split(split)) = area.node(root) else {
            panic!("expected split root");
        };
        assert_eq!(split.axis, SplitAxis::Horizontal);
        assert_eq!((split.a, split.b), (front_root, back_root));
    }

    #[test]
    fn input_connection_lost_cancels_gesture() {
        let mut area = area_with(&["back", "front"]);
        press(&mut area, 100.0, 10.0, true);
        assert!(!area.state().is_normal());
        area.input_connection_lost(&FrameArena::default());
        assert!(area.state().is_normal());
        assert_eq!(area.state().pointer(), None::<PointerId>);
    }

    #[test]
    fn add_window_during_gesture_resets_state() {
        let mut area = area_with(&["back", "front"]);
        press(&mut area, 100.0, 10.0, true);
        area.add_window("late", Rgba::WHITE, Box::new(EmptyWidget));
        assert!(area.state().is_normal());
        assert_eq!(area.validate(), Ok(()));
    }

    #[test]
    fn build_child_rects_records_active_tabs() {
        let area = area_with(&["back", "front"]);
        let arena = FrameArena::default();
        let mut text = MonospaceText;
        let (hint, metrics) = area.size_hint(&mut text);
        assert_eq!(hint.minimum, Extent::new(400, 400));
        assert!(hint.expand_x && hint.expand_y);

        let mut rects = RectCollection::new();
        area.build_child_rects(metrics, CONTAINER, CONTAINER, &mut rects, &arena);
        assert_eq!(rects.len(), 2);
        let (front_window, _) = area.find_tab(TabId::new(2)).expect("front tab");
        assert_eq!(area.layers().get(0).map(|l| l.root), Some(front_window));
        assert_eq!(
            rects.get(TabId::new(2)),
            Some(RectPair {
                widget_rect: Rect::new(0, 36, 400, 364),
                visible_rect: Rect::new(0, 36, 400, 364),
            })
        );
        assert_eq!(
            rects.get(TabId::new(1)).map(|pair| pair.widget_rect),
            Some(Rect::new(0, 36, 1000, 764))
        );
    }

    #[test]
    fn render_balances_scissors() {
        let area = area_with(&["back", "front"]);
        let arena = FrameArena::default();
        let mut text = MonospaceText;
        let (_, metrics) = area.size_hint(&mut text);
        let mut cx = FrameCx {
            text: &mut text,
            arena: &arena,
            widget_rect: CONTAINER,
            visible_rect: CONTAINER,
        };
        let mut list = DrawList::new();
        area.render(&mut list, metrics, &mut cx);
        assert_eq!(list.scissor_depth(), 0);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["back", "front"]);
    }

    #[test]
    #[traced_test]
    fn structural_operations_are_logged() {
        let mut area = area_with(&["back", "front"]);
        assert!(logs_contain("window added"));
        press(&mut area, 100.0, 10.0, true);
        press(&mut area, 100.0, 10.0, false);
        assert!(logs_contain("interaction state changed"));
        // Outer top gizmo: (463, 0, 75, 75).
        press(&mut area, 100.0, 10.0, true);
        drag(&mut area, 500.0, 30.0);
        press(&mut area, 500.0, 30.0, false);
        assert!(logs_contain("split target around front layer"));
        assert_eq!(area.layer_count(), 1);
    }

    #[test]
    #[traced_test]
    fn delete_gizmo_drop_is_logged() {
        let mut area = area_with(&["back", "front"]);
        press(&mut area, 100.0, 10.0, true);
        // Delete gizmo: (463, 650, 75, 75).
        drag(&mut area, 500.0, 680.0);
        press(&mut area, 500.0, 680.0, false);
        assert!(logs_contain("front layer deleted"));
        assert_eq!(area.layer_count(), 1);
        assert_eq!(area.nodes().len(), 1);
    }
}
