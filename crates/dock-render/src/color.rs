//! Linear RGBA colors.

use serde::{Deserialize, Serialize};

/// A color with `f32` channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Multiply the color channels by `factor`, leaving alpha untouched.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    /// Replace the alpha channel.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Whether every channel lies in `0.0..=1.0`.
    pub fn is_normalized(&self) -> bool {
        [self.r, self.g, self.b, self.a]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }
}

#[cfg(test)]
mod tests {
    use super::Rgba;

    #[test]
    fn scaled_keeps_alpha() {
        let c = Rgba::new(0.8, 0.4, 0.2, 0.6).scaled(0.5);
        assert_eq!(c, Rgba::new(0.4, 0.2, 0.1, 0.6));
    }

    #[test]
    fn with_alpha_replaces_alpha_only() {
        assert_eq!(Rgba::WHITE.with_alpha(0.5), Rgba::new(1.0, 1.0, 1.0, 0.5));
    }

    #[test]
    fn normalized_range_check() {
        assert!(Rgba::rgb(0.0, 1.0, 0.5).is_normalized());
        assert!(!Rgba::new(1.5, 0.0, 0.0, 1.0).is_normalized());
        assert!(!Rgba::new(0.0, 0.0, 0.0, f32::NAN).is_normalized());
    }
}
