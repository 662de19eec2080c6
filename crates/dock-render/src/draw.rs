//! Immediate-mode draw command sink.
//!
//! Widgets describe a frame by pushing filled quads, text runs, and scissor
//! rects into a [`DrawSink`]. The GPU backend that consumes the commands
//! lives outside this workspace; [`DrawList`] is the in-memory recorder used
//! by headless hosts and tests.
//!
//! # Scissor discipline
//!
//! Every [`DrawSink::push_scissor`] must be balanced by a
//! [`DrawSink::pop_scissor`]. [`ScopedScissor`] makes that structural: it
//! pushes on construction, pops on drop, and derefs to the sink in between.

use crate::color::Rgba;
use crate::text::FontSize;
use dock_core::geometry::{Position, Rect};
use std::ops::{Deref, DerefMut};

/// Per-corner rounding radii in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CornerRadii {
    pub top_left: u32,
    pub top_right: u32,
    pub bottom_left: u32,
    pub bottom_right: u32,
}

impl CornerRadii {
    /// Square corners.
    pub const ZERO: Self = Self::uniform(0);

    /// The same radius on every corner.
    pub const fn uniform(radius: u32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_left: radius,
            bottom_right: radius,
        }
    }
}

/// Destination for draw commands.
pub trait DrawSink {
    /// Fill `rect` with `color`.
    fn push_filled_quad(&mut self, rect: Rect, color: Rgba, radii: CornerRadii);

    /// Draw `text` on one line with its top-left corner at `position`.
    fn push_text(&mut self, font: FontSize, text: &str, position: Position, color: Rgba);

    /// Restrict subsequent commands to `rect` (intersected with any active scissor).
    fn push_scissor(&mut self, rect: Rect);

    /// Undo the most recent [`push_scissor`](Self::push_scissor).
    fn pop_scissor(&mut self);

    /// Fill `rect` with square corners.
    fn push_filled_rect(&mut self, rect: Rect, color: Rgba) {
        self.push_filled_quad(rect, color, CornerRadii::ZERO);
    }
}

/// RAII scissor: pushed on construction, popped on drop.
pub struct ScopedScissor<'a, S: DrawSink + ?Sized> {
    sink: &'a mut S,
}

impl<'a, S: DrawSink + ?Sized> ScopedScissor<'a, S> {
    /// Push `rect` as the scissor for the guard's lifetime.
    pub fn new(sink: &'a mut S, rect: Rect) -> Self {
        sink.push_scissor(rect);
        Self { sink }
    }

    /// Push the intersection of two rects (e.g. a widget rect and its visible rect).
    pub fn intersecting(sink: &'a mut S, a: Rect, b: Rect) -> Self {
        Self::new(sink, a.intersection(&b))
    }
}

impl<S: DrawSink + ?Sized> Deref for ScopedScissor<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.sink
    }
}

impl<S: DrawSink + ?Sized> DerefMut for ScopedScissor<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.sink
    }
}

impl<S: DrawSink + ?Sized> Drop for ScopedScissor<'_, S> {
    fn drop(&mut self) {
        self.sink.pop_scissor();
    }
}

// ---------------------------------------------------------------------------
// DrawList: recording sink
// ---------------------------------------------------------------------------

/// One recorded draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Quad {
        rect: Rect,
        color: Rgba,
        radii: CornerRadii,
        /// Scissor in effect when the quad was pushed.
        clip: Option<Rect>,
    },
    Text {
        font: FontSize,
        text: String,
        position: Position,
        color: Rgba,
        clip: Option<Rect>,
    },
}

/// Records draw commands in submission order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCmd>,
    scissors: Vec<Rect>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands, oldest first.
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Number of scissors currently pushed.
    pub fn scissor_depth(&self) -> usize {
        self.scissors.len()
    }

    /// The active (effective) scissor, if any.
    pub fn current_scissor(&self) -> Option<Rect> {
        self.scissors.last().copied()
    }

    /// Iterate recorded quads as `(rect, color)`.
    pub fn quads(&self) -> impl Iterator<Item = (Rect, Rgba)> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Quad { rect, color, .. } => Some((*rect, *color)),
            DrawCmd::Text { .. } => None,
        })
    }

    /// Iterate recorded text runs.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            DrawCmd::Quad { .. } => None,
        })
    }

    /// Drop all commands, keeping allocations.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.scissors.clear();
    }
}

impl DrawSink for DrawList {
    fn push_filled_quad(&mut self, rect: Rect, color: Rgba, radii: CornerRadii) {
        let clip = self.current_scissor();
        self.commands.push(DrawCmd::Quad {
            rect,
            color,
            radii,
            clip,
        });
    }

    fn push_text(&mut self, font: FontSize, text: &str, position: Position, color: Rgba) {
        let clip = self.current_scissor();
        self.commands.push(DrawCmd::Text {
            font,
            text: text.to_owned(),
            position,
            color,
            clip,
        });
    }

    fn push_scissor(&mut self, rect: Rect) {
        let effective = match self.scissors.last() {
            Some(outer) => outer.intersection(&rect),
            None => rect,
        };
        self.scissors.push(effective);
    }

    fn pop_scissor(&mut self) {
        let popped = self.scissors.pop();
        debug_assert!(popped.is_some(), "pop_scissor without matching push");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_scissor_balances_and_nests() {
        let mut list = DrawList::new();
        {
            let mut outer = ScopedScissor::new(&mut list, Rect::new(0, 0, 100, 100));
            {
                let mut inner = ScopedScissor::new(&mut *outer, Rect::new(50, 50, 100, 100));
                assert_eq!(inner.current_scissor(), Some(Rect::new(50, 50, 50, 50)));
                inner.push_filled_rect(Rect::new(60, 60, 5, 5), Rgba::WHITE);
            }
            assert_eq!(outer.scissor_depth(), 1);
        }
        assert_eq!(list.scissor_depth(), 0);
        match &list.commands()[0] {
            DrawCmd::Quad { clip, .. } => assert_eq!(*clip, Some(Rect::new(50, 50, 50, 50))),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn intersecting_scissor_uses_overlap() {
        let mut list = DrawList::new();
        let guard = ScopedScissor::intersecting(
            &mut list,
            Rect::new(0, 0, 10, 10),
            Rect::new(5, 0, 10, 10),
        );
        assert_eq!(guard.current_scissor(), Some(Rect::new(5, 0, 5, 10)));
    }

    #[test]
    fn records_text_and_quads_in_order() {
        let mut list = DrawList::new();
        list.push_filled_rect(Rect::new(0, 0, 4, 4), Rgba::BLACK);
        list.push_text(FontSize(16), "Scene", Position::new(1, 2), Rgba::WHITE);
        assert_eq!(list.quads().count(), 1);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["Scene"]);
        list.clear();
        assert!(list.commands().is_empty());
    }

    #[test]
    fn works_through_trait_objects() {
        let mut list = DrawList::new();
        {
            let sink: &mut dyn DrawSink = &mut list;
            let mut scoped = ScopedScissor::new(sink, Rect::new(0, 0, 8, 8));
            scoped.push_filled_quad(Rect::new(0, 0, 8, 8), Rgba::WHITE, CornerRadii::uniform(2));
        }
        assert_eq!(list.scissor_depth(), 0);
        assert_eq!(list.commands().len(), 1);
    }
}
