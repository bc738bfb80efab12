//! Font metrics.
//!
//! Widgets never rasterize glyphs themselves; they only need to know how wide
//! a run of text is and how tall a line is at a given character size. The
//! host supplies a [`FontMetrics`] implementation matching its renderer.

use std::fmt;
use std::rc::Rc;

use unicode_width::UnicodeWidthChar;

/// Reference character size the monospace advances are expressed at.
pub const BASE_FONT_SIZE: f32 = 14.0;

/// Advance of one display column at [`BASE_FONT_SIZE`].
pub const CHAR_WIDTH: f32 = 8.4;

/// Line height at [`BASE_FONT_SIZE`].
pub const LINE_HEIGHT: f32 = 18.0;

/// Text measurement for a font face.
pub trait FontMetrics: fmt::Debug {
    /// Width of a single line of `text` at character size `size`.
    fn text_width(&self, text: &str, size: u32) -> f32;

    /// Distance between consecutive baselines at character size `size`.
    fn line_height(&self, size: u32) -> f32;
}

/// Shared font handle. Widgets hold a clone; swapping the global font swaps
/// the handle on every widget.
pub type FontHandle = Rc<dyn FontMetrics>;

/// Fixed-advance metrics based on display column width.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceFont;

impl MonospaceFont {
    /// Sum of display columns; wide CJK characters count twice, control
    /// characters not at all.
    pub fn display_width(text: &str) -> f32 {
        text.chars()
            .map(|c| UnicodeWidthChar::width(c).unwrap_or(0) as f32)
            .sum()
    }
}

impl FontMetrics for MonospaceFont {
    fn text_width(&self, text: &str, size: u32) -> f32 {
        Self::display_width(text) * CHAR_WIDTH / BASE_FONT_SIZE * size as f32
    }

    fn line_height(&self, size: u32) -> f32 {
        LINE_HEIGHT / BASE_FONT_SIZE * size as f32
    }
}

/// The font new widgets start with.
pub fn default_font() -> FontHandle {
    Rc::new(MonospaceFont)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_scales_with_size() {
        let font = MonospaceFont;
        assert!((font.text_width("abcd", 14) - 4.0 * CHAR_WIDTH).abs() < 1e-4);
        assert!((font.text_width("abcd", 28) - 8.0 * CHAR_WIDTH).abs() < 1e-4);
        assert_eq!(font.text_width("", 20), 0.0);
    }

    #[test]
    fn wide_characters_take_two_columns() {
        assert_eq!(MonospaceFont::display_width("日本"), 4.0);
        assert_eq!(MonospaceFont::display_width("ab"), 2.0);
    }

    #[test]
    fn line_height_at_base_size() {
        assert!((MonospaceFont.line_height(14) - LINE_HEIGHT).abs() < 1e-4);
    }
}
