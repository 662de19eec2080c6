//! Per-tab cache of the rects a content widget was last laid out in.

use dock_core::geometry::Rect;
use rustc_hash::FxHashMap;

use crate::node::TabId;

/// Full content rect and the part of it that is actually on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPair {
    pub widget_rect: Rect,
    pub visible_rect: Rect,
}

/// Rects recorded by `build_child_rects`, keyed by tab.
#[derive(Debug, Clone, Default)]
pub struct RectCollection {
    rects: FxHashMap<TabId, RectPair>,
}

impl RectCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `pair` for `tab`, replacing any earlier entry.
    pub fn insert(&mut self, tab: TabId, pair: RectPair) {
        self.rects.insert(tab, pair);
    }

    #[must_use]
    pub fn get(&self, tab: TabId) -> Option<RectPair> {
        self.rects.get(&tab).copied()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TabId, RectPair)> + '_ {
        self.rects.iter().map(|(id, pair)| (*id, *pair))
    }
}
