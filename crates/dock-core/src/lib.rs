#![forbid(unsafe_code)]

//! Core: geometry primitives and input event payloads for the dock workspace.
//!
//! # Role in the workspace
//! `dock-core` is the leaf crate. It owns the integer rectangle model used for
//! layout and hit testing, and the normalized pointer/text events that the
//! dock area consumes. Neither rendering (`dock-render`) nor layout state
//! (`dock-area`) live here, so both can depend on it without pulling each
//! other in.

pub mod event;
pub mod geometry;

pub use event::{
    CharRemoveEvent, CursorMoveEvent, CursorPressEvent, EndTextInputSessionEvent, PointerId,
    PointerMove, PointerPress, TextInputEvent, TouchMoveEvent, TouchPressEvent,
};
pub use geometry::{Extent, Position, Rect, Vec2};
