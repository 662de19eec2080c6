#![forbid(unsafe_code)]

//! Render seams: draw sink, text measurement, colors, and the per-call arena.
//!
//! # Role in the workspace
//! `dock-render` defines the collaborator interfaces a widget consumes while
//! drawing or laying itself out. Concrete GPU and font backends stay outside
//! the workspace; the in-crate [`DrawList`] and [`MonospaceText`] are
//! deterministic stand-ins for headless hosts and tests.

pub mod arena;
pub mod color;
pub mod draw;
pub mod text;

pub use arena::{ArenaVec, FrameArena};
pub use color::Rgba;
pub use draw::{CornerRadii, DrawCmd, DrawList, DrawSink, ScopedScissor};
pub use text::{FontSize, MonospaceText, TextManager};
