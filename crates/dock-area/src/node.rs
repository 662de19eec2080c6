//! Layout tree nodes and the slot arena that owns them.
//!
//! A dock area's trees are stored flat: every [`Node`] lives in one
//! [`NodeArena`] and parents refer to children by [`NodeId`]. Removing a
//! subtree returns its slots to a free list, so ids held across the
//! compute/apply boundary of an event never dangle into freed memory. They
//! can only point at an empty slot, which lookups report as a missing node.

use std::fmt;

use dock_render::arena::FrameArena;
use dock_render::color::Rgba;
use serde::{Deserialize, Serialize};

use crate::widget::DockWidget;

/// Lower bound of a split ratio.
pub const MIN_SPLIT_RATIO: f32 = 0.1;
/// Upper bound of a split ratio.
pub const MAX_SPLIT_RATIO: f32 = 0.9;

/// Index of a node slot in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Raw slot index.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable identity of a tab, preserved when the tab moves between windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(u64);

impl TabId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Orientation of a split node.
///
/// `Horizontal` lays the children out left/right, `Vertical` top/bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitAxis {
    Horizontal,
    Vertical,
}

/// A titled, colored container for one content widget.
pub struct Tab {
    pub id: TabId,
    pub title: String,
    pub color: Rgba,
    pub widget: Box<dyn DockWidget>,
}

impl fmt::Debug for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

/// Leaf node: an ordered tab row with one active tab.
#[derive(Debug)]
pub struct WindowNode {
    tabs: Vec<Tab>,
    active_tab: usize,
}

impl WindowNode {
    /// A window holding a single tab.
    #[must_use]
    pub fn new(tab: Tab) -> Self {
        Self {
            tabs: vec![tab],
            active_tab: 0,
        }
    }

    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    #[must_use]
    pub fn active_tab(&self) -> usize {
        self.active_tab
    }

    /// The tab currently shown.
    ///
    /// # Panics
    ///
    /// Panics if the window is empty, which only happens transiently inside a
    /// structural operation.
    #[must_use]
    pub fn active(&self) -> &Tab {
        &self.tabs[self.active_tab]
    }

    /// Mutable access to the tab currently shown.
    pub fn active_mut(&mut self) -> &mut Tab {
        &mut self.tabs[self.active_tab]
    }

    /// Select the tab at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_active_tab(&mut self, index: usize) {
        assert!(
            index < self.tabs.len(),
            "active tab {index} out of range for window with {} tabs",
            self.tabs.len()
        );
        self.active_tab = index;
    }

    /// Append tabs, keeping their relative order.
    pub fn extend_tabs(&mut self, tabs: impl IntoIterator<Item = Tab>) {
        self.tabs.extend(tabs);
    }

    /// Remove the tab at `index`, keeping the active index on the same tab
    /// where possible and in range otherwise.
    pub fn remove_tab(&mut self, index: usize) -> Tab {
        let tab = self.tabs.remove(index);
        if index < self.active_tab {
            self.active_tab -= 1;
        } else if self.active_tab >= self.tabs.len() {
            self.active_tab = self.tabs.len().saturating_sub(1);
        }
        tab
    }

    /// Move every tab out, leaving the window empty.
    pub fn take_tabs(&mut self) -> Vec<Tab> {
        self.active_tab = 0;
        std::mem::take(&mut self.tabs)
    }
}

/// Internal node: two children sharing the node rect by `ratio`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitNode {
    pub a: NodeId,
    pub b: NodeId,
    pub axis: SplitAxis,
    ratio: f32,
}

impl SplitNode {
    /// A split with an even ratio.
    #[must_use]
    pub fn new(a: NodeId, b: NodeId, axis: SplitAxis) -> Self {
        Self {
            a,
            b,
            axis,
            ratio: 0.5,
        }
    }

    /// Fraction of the node extent given to `a`.
    #[must_use]
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Set the ratio, clamped into [`MIN_SPLIT_RATIO`]..=[`MAX_SPLIT_RATIO`].
    /// NaN is ignored.
    pub fn set_ratio(&mut self, ratio: f32) {
        if ratio.is_nan() {
            return;
        }
        self.ratio = ratio.clamp(MIN_SPLIT_RATIO, MAX_SPLIT_RATIO);
    }

    /// Replace whichever child equals `old` with `new`.
    ///
    /// Returns `false` if `old` is not a child.
    pub fn replace_child(&mut self, old: NodeId, new: NodeId) -> bool {
        if self.a == old {
            self.a = new;
        } else if self.b == old {
            self.b = new;
        } else {
            return false;
        }
        true
    }

    /// The child that is not `child`.
    #[must_use]
    pub fn sibling_of(&self, child: NodeId) -> Option<NodeId> {
        if self.a == child {
            Some(self.b)
        } else if self.b == child {
            Some(self.a)
        } else {
            None
        }
    }
}

/// A layout tree node.
#[derive(Debug)]
pub enum Node {
    Window(WindowNode),
    Split(SplitNode),
}

impl Node {
    #[must_use]
    pub fn as_window(&self) -> Option<&WindowNode> {
        match self {
            Self::Window(window) => Some(window),
            Self::Split(_) => None,
        }
    }

    pub fn as_window_mut(&mut self) -> Option<&mut WindowNode> {
        match self {
            Self::Window(window) => Some(window),
            Self::Split(_) => None,
        }
    }

    #[must_use]
    pub fn as_split(&self) -> Option<&SplitNode> {
        match self {
            Self::Split(split) => Some(split),
            Self::Window(_) => None,
        }
    }

    pub fn as_split_mut(&mut self) -> Option<&mut SplitNode> {
        match self {
            Self::Split(split) => Some(split),
            Self::Window(_) => None,
        }
    }
}

/// Where a node hangs in its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Root of the layer at this index.
    LayerRoot(usize),
    /// Child `a` of a split.
    SplitA(NodeId),
    /// Child `b` of a split.
    SplitB(NodeId),
}

impl Slot {
    /// The parent split, if the node has one.
    #[must_use]
    pub fn split_parent(self) -> Option<NodeId> {
        match self {
            Self::LayerRoot(_) => None,
            Self::SplitA(split) | Self::SplitB(split) => Some(split),
        }
    }
}

/// Slot-backed owner of every node in a dock area.
#[derive(Debug, Default)]
pub struct NodeArena {
    slots: Vec<Option<Node>>,
    free: Vec<u32>,
    live: usize,
}

impl NodeArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Store `node`, reusing a freed slot when one exists.
    pub fn insert(&mut self, node: Node) -> NodeId {
        self.live += 1;
        if let Some(slot) = self.free.pop() {
            self.slots[slot as usize] = Some(node);
            return NodeId(slot);
        }
        let id = u32::try_from(self.slots.len()).unwrap_or_else(|_| panic!("node arena exhausted"));
        self.slots.push(Some(node));
        NodeId(id)
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// The node at `id`.
    ///
    /// # Panics
    ///
    /// Panics if the slot is empty.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        self.get(id)
            .unwrap_or_else(|| panic!("node {id} is not live"))
    }

    /// The window at `id`.
    ///
    /// # Panics
    ///
    /// Panics if the slot is empty or holds a split.
    #[must_use]
    pub fn window(&self, id: NodeId) -> &WindowNode {
        match self.node(id) {
            Node::Window(window) => window,
            Node::Split(_) => panic!("node {id} is a split, expected a window"),
        }
    }

    /// Mutable access to the window at `id`.
    ///
    /// # Panics
    ///
    /// Panics if the slot is empty or holds a split.
    pub fn window_mut(&mut self, id: NodeId) -> &mut WindowNode {
        match self.get_mut(id) {
            Some(Node::Window(window)) => window,
            Some(Node::Split(_)) => panic!("node {id} is a split, expected a window"),
            None => panic!("node {id} is not live"),
        }
    }

    /// The split at `id`.
    ///
    /// # Panics
    ///
    /// Panics if the slot is empty or holds a window.
    #[must_use]
    pub fn split(&self, id: NodeId) -> &SplitNode {
        match self.node(id) {
            Node::Split(split) => split,
            Node::Window(_) => panic!("node {id} is a window, expected a split"),
        }
    }

    /// Mutable access to the split at `id`.
    ///
    /// # Panics
    ///
    /// Panics if the slot is empty or holds a window.
    pub fn split_mut(&mut self, id: NodeId) -> &mut SplitNode {
        match self.get_mut(id) {
            Some(Node::Split(split)) => split,
            Some(Node::Window(_)) => panic!("node {id} is a window, expected a split"),
            None => panic!("node {id} is not live"),
        }
    }

    /// Remove the node at `id` and return it. Children of a split stay live.
    ///
    /// # Panics
    ///
    /// Panics if the slot is empty.
    pub fn remove(&mut self, id: NodeId) -> Node {
        let node = self
            .slots
            .get_mut(id.index())
            .and_then(Option::take)
            .unwrap_or_else(|| panic!("node {id} is not live"));
        self.free.push(id.0);
        self.live -= 1;
        node
    }

    /// Remove `root` and every node below it. Returns the number of nodes freed.
    pub fn free_subtree(&mut self, root: NodeId, arena: &FrameArena) -> usize {
        let mut stack = arena.vec();
        stack.push(root);
        let mut freed = 0;
        while let Some(id) = stack.pop() {
            if let Node::Split(split) = self.remove(id) {
                stack.push(split.a);
                stack.push(split.b);
            }
            freed += 1;
        }
        freed
    }

    /// Iterate live nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|node| (NodeId(i as u32), node)))
    }
}
