//! Error types.
//!
//! Structural problems in the layout trees are programmer errors: the dock
//! area panics with a [`DockInvariantError`] message when one is detected.
//! [`DockArea::validate`](crate::DockArea::validate) exposes the same check as
//! a `Result` for hosts and tests. Loading configuration is the only
//! recoverable failure path ([`DockConfigError`]).

use std::fmt;

use crate::node::NodeId;

/// A broken layout-tree invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum DockInvariantError {
    /// A reachable window has no tabs.
    EmptyWindow { window: NodeId },
    ActiveTabOutOfRange {
        window: NodeId,
        active: usize,
        tabs: usize,
    },
    SplitRatioOutOfRange { split: NodeId, ratio: f32 },
    /// A split or layer refers to a node that is not live.
    DanglingChild { parent: Option<NodeId>, child: NodeId },
    /// A node is reachable from two places (or from itself).
    SharedNode { node: NodeId },
    /// A live node no layer reaches.
    OrphanNode { node: NodeId },
    /// A layer root is not live.
    MissingLayerRoot { layer: usize, root: NodeId },
    /// The interaction state names a node that is gone or has the wrong kind.
    StaleStateReference { node: NodeId, expected: &'static str },
    /// The moving state requires a floating front layer.
    MovingWithoutFloatingLayer { layers: usize },
}

impl fmt::Display for DockInvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWindow { window } => write!(f, "window {window} has no tabs"),
            Self::ActiveTabOutOfRange {
                window,
                active,
                tabs,
            } => write!(
                f,
                "window {window} active tab {active} out of range for {tabs} tabs"
            ),
            Self::SplitRatioOutOfRange { split, ratio } => {
                write!(f, "split {split} ratio {ratio} outside [0.1, 0.9]")
            }
            Self::DanglingChild {
                parent: Some(parent),
                child,
            } => write!(f, "split {parent} references missing child {child}"),
            Self::DanglingChild {
                parent: None,
                child,
            } => write!(f, "layer references missing node {child}"),
            Self::SharedNode { node } => write!(f, "node {node} is reachable more than once"),
            Self::OrphanNode { node } => write!(f, "node {node} is live but unreachable"),
            Self::MissingLayerRoot { layer, root } => {
                write!(f, "layer {layer} root {root} is not live")
            }
            Self::StaleStateReference { node, expected } => write!(
                f,
                "interaction state references {node}, which is not a reachable {expected}"
            ),
            Self::MovingWithoutFloatingLayer { layers } => write!(
                f,
                "moving state requires at least two layers, found {layers}"
            ),
        }
    }
}

impl std::error::Error for DockInvariantError {}

/// Errors that can occur when loading a dock configuration.
#[derive(Debug)]
pub enum DockConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-files")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config-files")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl fmt::Display for DockConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-files")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config-files")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for DockConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-files")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-files")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
