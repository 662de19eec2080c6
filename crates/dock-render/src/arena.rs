//! Per-call scratch arena.
//!
//! [`FrameArena`] wraps [`bumpalo::Bump`] and hands out the short-lived
//! vectors that tree traversals, tab-rect builders, and hit tests need while
//! one event or render call is in flight. The host owns the arena and resets
//! it between calls; nothing allocated from it may outlive the call that
//! produced it.
//!
//! # Usage
//!
//! ```
//! use dock_render::arena::FrameArena;
//!
//! let mut arena = FrameArena::new(4 * 1024);
//! let mut stack = arena.vec::<u32>();
//! stack.push(7);
//! stack.push(9);
//! assert_eq!(stack.as_slice(), &[7, 9]);
//! drop(stack);
//!
//! arena.reset(); // reclaims every allocation in O(1)
//! ```
//!
//! # Drop semantics
//!
//! `bumpalo` does not run `Drop` for values placed in the arena when it is
//! reset. Arena vectors do run element destructors when the vector itself is
//! dropped, but their backing memory is only reclaimed by [`FrameArena::reset`].
//! Keep arena contents to plain data (ids, rects, indices).

use bumpalo::Bump;
use bumpalo::collections::Vec as BumpVec;

/// Default initial capacity (16 KB). Docking trees hold tens of nodes.
pub const DEFAULT_ARENA_CAPACITY: usize = 16 * 1024;

/// Arena-backed vector handed out by [`FrameArena::vec`].
pub type ArenaVec<'a, T> = BumpVec<'a, T>;

/// A bump allocator scoped to one event-handling or render call.
#[derive(Debug)]
pub struct FrameArena {
    bump: Bump,
}

impl FrameArena {
    /// Create a new arena with the given initial capacity in bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Create a new arena with [`DEFAULT_ARENA_CAPACITY`].
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_ARENA_CAPACITY)
    }

    /// Reset the arena, reclaiming all memory for reuse.
    ///
    /// Requires `&mut self`, so no arena vector or slice can still be alive.
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    /// Start an empty arena vector.
    pub fn vec<T>(&self) -> ArenaVec<'_, T> {
        BumpVec::new_in(&self.bump)
    }

    /// Start an arena vector with room for `capacity` elements.
    pub fn vec_with_capacity<T>(&self, capacity: usize) -> ArenaVec<'_, T> {
        BumpVec::with_capacity_in(capacity, &self.bump)
    }
}

impl Default for FrameArena {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
