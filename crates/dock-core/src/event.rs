#![forbid(unsafe_code)]

//! Pointer and text input event payloads.
//!
//! The host event loop translates platform input into these values before
//! handing them to a widget tree. Cursor and touch events share one pointer
//! model: each event is resolved to a [`PointerMove`] or [`PointerPress`]
//! carrying a [`PointerId`], so downstream state machines can track several
//! pointers at once without caring where they came from.
//!
//! # Design Notes
//!
//! - Positions are fractional window coordinates (touch screens report
//!   sub-pixel positions; cursors are widened from integers).
//! - The cursor owns the reserved id [`PointerId::CURSOR`], which lies outside
//!   the `u8` range of touch hardware ids.

use crate::geometry::Vec2;
use serde::{Deserialize, Serialize};

/// Identity of a pointer (the mouse cursor or one touch contact).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointerId(u16);

impl PointerId {
    /// Reserved id of the mouse cursor.
    pub const CURSOR: Self = Self(u16::MAX);

    /// Pointer id for a touch contact. Every `u8` hardware id is valid.
    #[must_use]
    pub const fn touch(id: u8) -> Self {
        Self(id as u16)
    }

    /// Raw id value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Whether this is the cursor.
    #[must_use]
    pub const fn is_cursor(self) -> bool {
        self.0 == u16::MAX
    }
}

/// The cursor moved.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CursorMoveEvent {
    pub position: Vec2,
}

/// A cursor button changed state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorPressEvent {
    pub position: Vec2,
    /// `true` on button down, `false` on release.
    pub pressed: bool,
}

/// A touch contact moved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchMoveEvent {
    /// Hardware contact id.
    pub id: u8,
    pub position: Vec2,
}

/// A touch contact went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPressEvent {
    /// Hardware contact id.
    pub id: u8,
    pub position: Vec2,
    pub pressed: bool,
}

/// A pointer moved, independent of its source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerMove {
    pub id: PointerId,
    pub position: Vec2,
}

/// A pointer went down or up, independent of its source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPress {
    pub id: PointerId,
    pub position: Vec2,
    pub pressed: bool,
}

impl From<CursorMoveEvent> for PointerMove {
    fn from(event: CursorMoveEvent) -> Self {
        Self {
            id: PointerId::CURSOR,
            position: event.position,
        }
    }
}

impl From<TouchMoveEvent> for PointerMove {
    fn from(event: TouchMoveEvent) -> Self {
        Self {
            id: PointerId::touch(event.id),
            position: event.position,
        }
    }
}

impl From<CursorPressEvent> for PointerPress {
    fn from(event: CursorPressEvent) -> Self {
        Self {
            id: PointerId::CURSOR,
            position: event.position,
            pressed: event.pressed,
        }
    }
}

impl From<TouchPressEvent> for PointerPress {
    fn from(event: TouchPressEvent) -> Self {
        Self {
            id: PointerId::touch(event.id),
            position: event.position,
            pressed: event.pressed,
        }
    }
}

/// Text committed by the platform text-input session.
///
/// `old_index..old_index + old_count` is the range of previously committed
/// text that `text` replaces.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextInputEvent {
    pub old_index: u64,
    pub old_count: u64,
    pub text: String,
}

/// The platform closed the active text-input session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EndTextInputSessionEvent;

/// A single character was removed (backspace on a soft keyboard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CharRemoveEvent;
