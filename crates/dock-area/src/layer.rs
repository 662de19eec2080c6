//! Z-ordered stack of independent layout trees.
//!
//! Index 0 is the front (interactive) layer. The last index is the back layer,
//! which always fills the container; its stored rect is kept but ignored for
//! sizing.

use dock_core::geometry::Rect;

use crate::node::NodeId;

/// One floating tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    pub root: NodeId,
    /// Position relative to the container, plus extent.
    pub rect: Rect,
}

/// Layers ordered front to back.
#[derive(Debug, Clone, Default)]
pub struct LayerStack {
    layers: Vec<Layer>,
}

impl LayerStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Layer] {
        &self.layers
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Index of the back layer.
    #[must_use]
    pub fn back_index(&self) -> Option<usize> {
        self.layers.len().checked_sub(1)
    }

    /// Insert `layer` in front of every other layer.
    pub fn insert_front(&mut self, layer: Layer) {
        self.layers.insert(0, layer);
    }

    /// Remove and return the layer at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Layer {
        assert!(
            index < self.layers.len(),
            "layer {index} out of range ({} layers)",
            self.layers.len()
        );
        self.layers.remove(index)
    }

    /// Move the layer at `index` to the front.
    pub fn push_to_front(&mut self, index: usize) {
        let layer = self.remove(index);
        self.insert_front(layer);
    }

    /// Point the layer at `index` at a new root.
    pub fn set_root(&mut self, index: usize, root: NodeId) {
        self.layers[index].root = root;
    }

    /// Mutable access to the front layer.
    pub fn front_mut(&mut self) -> Option<&mut Layer> {
        self.layers.first_mut()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }
}

impl<'a> IntoIterator for &'a LayerStack {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}
