#![forbid(unsafe_code)]

//! Docking window-layout manager.
//!
//! # Role in the workspace
//! `dock-area` owns the layout state: tabbed windows arranged in binary split
//! trees, stacked in layers. The back layer always fills the container; every
//! layer in front of it floats and can be dragged by its titlebar, docked into
//! a lower layer through a gizmo, or deleted. Tabs can be torn off into new
//! floating layers and split ratios dragged by their handles.
//!
//! Rendering and text measurement go through the seams in `dock-render`;
//! input arrives as the normalized events of `dock-core`.
//!
//! # Example
//!
//! ```
//! use dock_area::{DockArea, EmptyWidget};
//! use dock_render::Rgba;
//!
//! let mut area = DockArea::new();
//! area.add_window("Scene", Rgba::rgb(0.2, 0.2, 0.25), Box::new(EmptyWidget));
//! area.add_window("Inspector", Rgba::rgb(0.25, 0.2, 0.2), Box::new(EmptyWidget));
//! assert_eq!(area.layer_count(), 2);
//! assert!(area.validate().is_ok());
//! ```

pub mod config;
pub mod dock_area;
pub mod docking;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod invariants;
pub mod layer;
pub mod node;
pub mod rect_collection;
pub mod render;
pub mod traverse;
pub mod widget;

pub use config::{DockColors, DockConfig};
pub use dock_area::{DockArea, FrameCx};
pub use error::{DockConfigError, DockInvariantError};
pub use geometry::{InnerGizmo, LayoutMetrics, OuterGizmo};
pub use interaction::{HoveredGizmo, InteractionState};
pub use layer::{Layer, LayerStack};
pub use node::{
    MAX_SPLIT_RATIO, MIN_SPLIT_RATIO, Node, NodeArena, NodeId, SplitAxis, SplitNode, Tab, TabId,
    WindowNode,
};
pub use rect_collection::{RectCollection, RectPair};
pub use widget::{DockWidget, EmptyWidget, SizeHint};
