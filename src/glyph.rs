// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Pixel width estimation for rendered text.
//!
//! Card layout never shapes text. Instead it asks a [`GlyphWidthModel`] how
//! wide a string would be at a given font size and makes wrapping decisions
//! from that estimate. The default [`AverageGlyphWidth`] multiplies the
//! character count by a constant fraction of the font size, which is close
//! enough for the sans-serif stacks used by the cards.

/// Width factor applied per character by [`AverageGlyphWidth::default`].
pub const DEFAULT_GLYPH_FACTOR: f64 = 0.56;

/// Capability estimating the rendered width of text.
///
/// Implementations must be monotonic: appending characters or raising the
/// font size never decreases the estimate. The layout engine relies on that
/// to stop trimming as soon as a candidate fits.
pub trait GlyphWidthModel {
    /// Returns the estimated width in pixels of `text` at `font_size`.
    fn text_width(&self, text: &str, font_size: f64) -> f64;
}

impl<M> GlyphWidthModel for &M
where
    M: GlyphWidthModel + ?Sized
{
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        (**self).text_width(text, font_size)
    }
}

/// Constant-factor width model: `chars * font_size * factor`.
///
/// # Examples
///
/// ```
/// use readme_cards::{AverageGlyphWidth, GlyphWidthModel};
///
/// let model = AverageGlyphWidth::default();
/// let width = model.text_width("Hello", 10.0);
/// assert!((width - 28.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageGlyphWidth {
    factor: f64
}

impl AverageGlyphWidth {
    /// Creates a model with a custom per-character factor.
    ///
    /// Negative or non-finite factors would break monotonicity, so they fall
    /// back to [`DEFAULT_GLYPH_FACTOR`].
    pub fn new(factor: f64) -> Self {
        let factor = if factor.is_finite() && factor >= 0.0 {
            factor
        } else {
            DEFAULT_GLYPH_FACTOR
        };
        Self {
            factor
        }
    }

    /// Returns the per-character factor.
    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl Default for AverageGlyphWidth {
    fn default() -> Self {
        Self {
            factor: DEFAULT_GLYPH_FACTOR
        }
    }
}

impl GlyphWidthModel for AverageGlyphWidth {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * self.factor
    }
}
