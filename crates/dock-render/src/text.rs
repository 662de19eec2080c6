//! Text measurement seam.
//!
//! Layout code never shapes text itself. It asks a [`TextManager`] for line
//! heights and outer extents, then positions tabs and titles from those
//! numbers. Hosts plug in their font backend; [`MonospaceText`] is the
//! deterministic fixed-advance backend used by headless hosts and tests.

use dock_core::geometry::Extent;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

/// Pixel size of a font request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontSize(pub u32);

impl Default for FontSize {
    fn default() -> Self {
        Self(16)
    }
}

impl FontSize {
    /// Scale by a content scale factor, rounding to whole pixels (at least 1).
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self(((self.0 as f32 * factor).round() as u32).max(1))
    }
}

/// Abstract text measurement backend.
///
/// The trait is object-safe so hosts can pass `&mut dyn TextManager`.
pub trait TextManager {
    /// Height of one line of text at `font`.
    fn line_height(&mut self, font: FontSize) -> u32;

    /// Outer extent of `text` laid out on a single line at `font`.
    fn measure_text(&mut self, text: &str, font: FontSize) -> Extent;
}

/// Fixed-advance measurer.
///
/// Each terminal column of display width (per `unicode-width`) advances by
/// half the font size, so wide CJK characters take a full font size. Line
/// height equals the font size.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceText;

impl MonospaceText {
    /// Horizontal advance of one display column.
    #[inline]
    pub fn column_advance(font: FontSize) -> u32 {
        font.0.div_ceil(2)
    }
}

impl TextManager for MonospaceText {
    fn line_height(&mut self, font: FontSize) -> u32 {
        font.0
    }

    fn measure_text(&mut self, text: &str, font: FontSize) -> Extent {
        let columns = text.width() as u32;
        Extent::new(columns * Self::column_advance(font), font.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_advances_half_font_size() {
        let mut text = MonospaceText;
        assert_eq!(
            text.measure_text("Scene", FontSize(16)),
            Extent::new(40, 16)
        );
        assert_eq!(text.line_height(FontSize(16)), 16);
    }

    #[test]
    fn wide_characters_take_two_columns() {
        let mut text = MonospaceText;
        assert_eq!(text.measure_text("日本", FontSize(10)).width, 20);
    }

    #[test]
    fn empty_text_has_line_height_but_no_width() {
        let mut text = MonospaceText;
        assert_eq!(text.measure_text("", FontSize(12)), Extent::new(0, 12));
    }

    #[test]
    fn odd_font_sizes_round_advance_up() {
        assert_eq!(MonospaceText::column_advance(FontSize(15)), 8);
    }

    #[test]
    fn font_scaling_never_reaches_zero() {
        assert_eq!(FontSize(16).scaled(1.5), FontSize(24));
        assert_eq!(FontSize(2).scaled(0.1), FontSize(1));
    }
}
