//! Content widget capability set.
//!
//! Tabs own their content as `Box<dyn DockWidget>`. The dock area never looks
//! inside a widget: it forwards pointer and text events, asks for size hints,
//! and hands it a content rect to draw into. Every method has a no-op default
//! so simple panels only implement what they use.

use dock_core::event::{
    CharRemoveEvent, EndTextInputSessionEvent, PointerMove, PointerPress, TextInputEvent,
};
use dock_core::geometry::{Extent, Rect};
use dock_render::draw::DrawSink;
use dock_render::text::TextManager;
use serde::{Deserialize, Serialize};

/// Preferred size of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SizeHint {
    pub minimum: Extent,
    pub expand_x: bool,
    pub expand_y: bool,
}

/// Something that can live in a tab.
pub trait DockWidget {
    /// Preferred size.
    fn size_hint(&self, _text: &mut dyn TextManager) -> SizeHint {
        SizeHint::default()
    }

    /// Lay out any children inside `widget_rect`.
    fn build_child_rects(&self, _widget_rect: Rect, _visible_rect: Rect) {}

    /// Draw into `widget_rect`, clipped by the caller to `visible_rect`.
    fn render(
        &self,
        _draw: &mut dyn DrawSink,
        _text: &mut dyn TextManager,
        _widget_rect: Rect,
        _visible_rect: Rect,
    ) {
    }

    /// A pointer moved. Returns `true` if the widget occludes the pointer.
    fn pointer_move(
        &mut self,
        _event: PointerMove,
        _widget_rect: Rect,
        _visible_rect: Rect,
        _occluded: bool,
    ) -> bool {
        false
    }

    /// A pointer went down or up. Returns `true` if the widget consumed it.
    fn pointer_press(
        &mut self,
        _event: PointerPress,
        _widget_rect: Rect,
        _visible_rect: Rect,
        _consumed: bool,
    ) -> bool {
        false
    }

    fn text_input(&mut self, _event: &TextInputEvent) {}

    fn end_text_input_session(&mut self, _event: EndTextInputSessionEvent) {}

    fn char_remove(&mut self, _event: CharRemoveEvent) {}

    /// The platform dropped every pointer (window lost focus, touch cancel).
    fn input_connection_lost(&mut self) {}
}

/// A widget that draws and handles nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyWidget;

impl DockWidget for EmptyWidget {}
