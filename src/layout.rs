// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Greedy pixel-width text layout.
//!
//! [`TextLayoutEngine`] turns free-form text into at most `max_lines` display
//! lines that fit a pixel budget according to a [`GlyphWidthModel`]. Lines
//! are filled greedily word by word; a word wider than the whole budget gets
//! a line of its own and is clamped with an ellipsis instead of being split. When words are
//! dropped because the line budget ran out, the last line is marked with an
//! ellipsis so readers can tell content was omitted.
//!
//! An optional post-pass evens out two-line results whose second line is
//! only a stray word or two. It runs on the finished greedy result and never
//! changes which words are shown.
//!
//! All operations are total: degenerate inputs produce empty or maximally
//! truncated output rather than errors.

use crate::glyph::{AverageGlyphWidth, GlyphWidthModel};

/// Marker appended to text that was shortened to fit.
pub const ELLIPSIS: char = '…';

/// Clamping never trims text below this many characters.
pub const CLAMP_FLOOR_CHARS: usize = 4;

/// Tuning constants for the two-line balancing pass.
///
/// The defaults were picked empirically for card descriptions; they carry no
/// meaning beyond "the second line looks orphaned".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceTuning {
    /// Balancing starts when the second line is narrower than this fraction
    /// of the maximum width.
    pub shortfall_ratio: f64,
    /// Balancing stops once the second line reaches this fraction of the
    /// maximum width.
    pub target_ratio:    f64,
    /// The first line never gives up words once it would be left with this
    /// many words or fewer.
    pub min_words:       usize
}

impl Default for BalanceTuning {
    fn default() -> Self {
        Self {
            shortfall_ratio: 0.28,
            target_ratio:    0.34,
            min_words:       3
        }
    }
}

/// Text layout engine parameterized by a glyph width model.
///
/// # Examples
///
/// ```
/// use readme_cards::TextLayoutEngine;
///
/// let engine = TextLayoutEngine::new();
/// let lines = engine.wrap_pixel("Automation, landing pages and chatbots", 120.0, 12.0, 2);
/// assert!(lines.len() <= 2);
/// assert_eq!(engine.clamp_to_width("Hi", 200.0, 11.0), "Hi");
/// ```
#[derive(Debug, Clone)]
pub struct TextLayoutEngine<M = AverageGlyphWidth> {
    model:   M,
    balance: Option<BalanceTuning>
}

impl TextLayoutEngine<AverageGlyphWidth> {
    /// Creates an engine using the default constant-factor width model and
    /// no balancing pass.
    pub fn new() -> Self {
        Self::with_model(AverageGlyphWidth::default())
    }
}

impl Default for TextLayoutEngine<AverageGlyphWidth> {
    fn default() -> Self {
        Self::new()
    }
}

/// Greedy fill output before overflow marking and balancing.
struct FilledLines {
    lines:     Vec<String>,
    truncated: bool
}

impl<M> TextLayoutEngine<M>
where
    M: GlyphWidthModel
{
    /// Creates an engine backed by the provided width model.
    pub fn with_model(model: M) -> Self {
        Self {
            model,
            balance: None
        }
    }

    /// Enables the two-line balancing pass for [`wrap_pixel`](Self::wrap_pixel).
    #[must_use]
    pub fn with_balancing(mut self, tuning: BalanceTuning) -> Self {
        self.balance = Some(tuning);
        self
    }

    /// Disables the two-line balancing pass.
    #[must_use]
    pub fn without_balancing(mut self) -> Self {
        self.balance = None;
        self
    }

    /// Returns the balancing tuning if the pass is enabled.
    pub fn balancing(&self) -> Option<&BalanceTuning> {
        self.balance.as_ref()
    }

    /// Returns the width model used for measurements.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Estimated width of `text` at `font_size`.
    pub fn width(&self, text: &str, font_size: f64) -> f64 {
        self.model.text_width(text, font_size)
    }

    /// Clamps `text` to `max_width`, appending [`ELLIPSIS`] when it had to be
    /// shortened.
    ///
    /// Text that already fits is returned unchanged. Otherwise trailing
    /// characters are removed until the text plus the ellipsis fits or only
    /// [`CLAMP_FLOOR_CHARS`] characters remain; trailing whitespace is then
    /// stripped and the ellipsis appended. Below the floor the result may
    /// still exceed `max_width`.
    pub fn clamp_to_width(&self, text: &str, max_width: f64, font_size: f64) -> String {
        if self.width(text, font_size) <= max_width {
            return text.to_owned();
        }
        self.ellipsize(text, max_width, font_size)
    }

    /// Wraps `text` into at most `max_lines` lines no wider than `max_width`.
    ///
    /// Whitespace runs separate words and are collapsed to single spaces.
    /// Returns an empty vector for blank input or a zero line budget.
    pub fn wrap_pixel(
        &self,
        text: &str,
        max_width: f64,
        font_size: f64,
        max_lines: usize
    ) -> Vec<String> {
        let FilledLines {
            mut lines,
            truncated
        } = self.fill_lines(text, max_width, font_size, max_lines);

        if truncated {
            if let Some(last) = lines.last_mut() {
                *last = self.mark_overflow(last, max_width, font_size);
            }
        } else if let Some(tuning) = self.balance {
            self.balance_lines(&mut lines, max_width, font_size, &tuning);
        }

        lines
    }

    /// Moves trailing words of the first line onto a short second line.
    ///
    /// Only two-line inputs are touched, and only when the second line is
    /// narrower than `tuning.shortfall_ratio * max_width`. Each move is
    /// validated against `max_width` for both lines; a move that breaks the
    /// bound is undone and balancing stops. Word order is preserved.
    pub fn balance_lines(
        &self,
        lines: &mut [String],
        max_width: f64,
        font_size: f64,
        tuning: &BalanceTuning
    ) {
        let [first, second] = lines else {
            return;
        };
        if self.width(second, font_size) >= max_width * tuning.shortfall_ratio {
            return;
        }

        let mut head: Vec<String> = first.split(' ').map(str::to_owned).collect();
        let mut tail: Vec<String> = second.split(' ').map(str::to_owned).collect();
        let mut moved_any = false;

        while head.len() > tuning.min_words + 1 {
            let Some(word) = head.pop() else {
                break;
            };
            tail.insert(0, word);

            let head_line = head.join(" ");
            let tail_line = tail.join(" ");
            if self.width(&head_line, font_size) > max_width
                || self.width(&tail_line, font_size) > max_width
            {
                let word = tail.remove(0);
                head.push(word);
                break;
            }

            moved_any = true;
            if self.width(&tail_line, font_size) >= max_width * tuning.target_ratio {
                break;
            }
        }

        if moved_any {
            *first = head.join(" ");
            *second = tail.join(" ");
        }
    }

    fn fill_lines(
        &self,
        text: &str,
        max_width: f64,
        font_size: f64,
        max_lines: usize
    ) -> FilledLines {
        let mut lines = Vec::new();
        if max_lines == 0 {
            return FilledLines {
                lines,
                truncated: false
            };
        }

        let mut words = text.split_whitespace().peekable();
        let mut line = String::new();
        let mut truncated = false;

        while let Some(word) = words.next() {
            let candidate = if line.is_empty() {
                word.to_owned()
            } else {
                format!("{line} {word}")
            };

            if self.width(&candidate, font_size) <= max_width {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                if lines.len() >= max_lines {
                    truncated = true;
                    break;
                }
            }

            // A word wider than the budget takes a line of its own, clamped.
            if self.width(word, font_size) <= max_width {
                line = word.to_owned();
            } else {
                lines.push(self.clamp_to_width(word, max_width, font_size));
            }

            if lines.len() >= max_lines {
                truncated = !line.is_empty() || words.peek().is_some();
                break;
            }
        }

        if lines.len() < max_lines && !line.is_empty() {
            lines.push(line);
        }
        lines.truncate(max_lines);

        FilledLines {
            lines,
            truncated
        }
    }

    /// Re-fits a line so it ends in an ellipsis.
    ///
    /// The marker is dropped when even the clamp floor cannot fit it; the
    /// width bound wins over the marker.
    fn mark_overflow(&self, line: &str, max_width: f64, font_size: f64) -> String {
        if line.ends_with(ELLIPSIS) {
            return line.to_owned();
        }
        let marked = self.ellipsize(line, max_width, font_size);
        if self.width(&marked, font_size) <= max_width {
            marked
        } else {
            line.to_owned()
        }
    }

    fn ellipsize(&self, text: &str, max_width: f64, font_size: f64) -> String {
        let mut kept = text.to_owned();
        let mut remaining = kept.chars().count();
        let mut probe = String::with_capacity(kept.len() + ELLIPSIS.len_utf8());

        while remaining > CLAMP_FLOOR_CHARS {
            probe.clear();
            probe.push_str(&kept);
            probe.push(ELLIPSIS);
            if self.width(&probe, font_size) <= max_width {
                break;
            }
            kept.pop();
            remaining -= 1;
        }

        let mut clamped = kept.trim_end().to_owned();
        clamped.push(ELLIPSIS);
        clamped
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn engine() -> TextLayoutEngine {
        TextLayoutEngine::new()
    }

    fn glyph(font_size: f64) -> f64 {
        font_size * crate::glyph::DEFAULT_GLYPH_FACTOR
    }

    #[test]
    fn clamp_returns_short_text_unchanged() {
        assert_eq!(engine().clamp_to_width("Hi", 200.0, 11.0), "Hi");
    }

    #[test]
    fn clamp_returns_empty_text_unchanged() {
        assert_eq!(engine().clamp_to_width("", 10.0, 11.0), "");
    }

    #[test]
    fn clamp_shortens_phrase_and_appends_ellipsis() {
        let engine = engine();
        let clamped = engine.clamp_to_width("Open for freelance", 40.0, 11.0);
        assert_eq!(clamped, "Open…");
        assert!(engine.width(&clamped, 11.0) <= 40.0);
    }

    #[test]
    fn clamp_strips_trailing_whitespace_before_marker() {
        let engine = engine();
        let clamped = engine.clamp_to_width("Open for freelance", 6.0 * glyph(11.0), 11.0);
        assert!(!clamped.contains(" …"));
        assert!(clamped.ends_with(ELLIPSIS));
    }

    #[test]
    fn clamp_stops_at_character_floor() {
        let engine = engine();
        let clamped = engine.clamp_to_width("Supercalifragilistic", 1.0, 12.0);
        assert_eq!(clamped, "Supe…");
        assert!(engine.width(&clamped, 12.0) > 1.0);
    }

    #[test]
    fn clamp_at_floor_appends_marker_to_whole_input() {
        let engine = engine();
        assert_eq!(engine.clamp_to_width("abcd", 1.0, 12.0), "abcd…");
        assert_eq!(engine.clamp_to_width("ab", 1.0, 12.0), "ab…");
    }

    #[test]
    fn clamp_respects_multibyte_characters() {
        let engine = engine();
        let clamped = engine.clamp_to_width("Tự động hoá quy trình", 8.5 * glyph(12.0), 12.0);
        assert!(clamped.ends_with(ELLIPSIS));
        assert!(clamped.starts_with("Tự động"));
    }

    #[test]
    fn wrap_blank_input_yields_no_lines() {
        let engine = engine();
        assert!(engine.wrap_pixel("", 200.0, 12.0, 2).is_empty());
        assert!(engine.wrap_pixel("   \t\n ", 200.0, 12.0, 2).is_empty());
    }

    #[test]
    fn wrap_zero_line_budget_yields_no_lines() {
        assert!(engine().wrap_pixel("some words here", 200.0, 12.0, 0).is_empty());
    }

    #[test]
    fn wrap_vietnamese_description_into_two_lines() {
        let engine = engine();
        let text = "Tôi xây hệ thống tự động hoá";
        let lines = engine.wrap_pixel(text, 200.0, 13.0, 2);

        assert_eq!(lines, vec!["Tôi xây hệ thống tự động", "hoá"]);
        for line in &lines {
            assert!(engine.width(line, 13.0) <= 200.0);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_single_long_word_is_clamped() {
        let engine = engine();
        let word = "Supercalifragilisticexpialidocious";
        let lines = engine.wrap_pixel(word, 50.0, 12.0, 2);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], engine.clamp_to_width(word, 50.0, 12.0));
        assert_eq!(lines[0], "Superc…");
    }

    #[test]
    fn wrap_clamps_long_word_after_filled_line() {
        let engine = engine();
        let lines = engine.wrap_pixel("a Supercalifragilistic b", 50.0, 12.0, 3);

        assert_eq!(lines, vec!["a", "Superc…", "b"]);
        for line in &lines {
            assert!(engine.width(line, 12.0) <= 50.0);
        }
    }

    #[test]
    fn wrap_clamps_trailing_long_word() {
        let engine = engine();
        let lines = engine.wrap_pixel("a b Supercalifragilistic", 50.0, 12.0, 3);
        assert_eq!(lines, vec!["a b", "Superc…"]);

        let lines = engine.wrap_pixel("a b Supercalifragilistic", 50.0, 12.0, 2);
        assert_eq!(lines, vec!["a b", "Superc…"]);
    }

    #[test]
    fn wrap_long_word_on_last_allowed_line_keeps_single_marker() {
        let engine = engine();
        let lines = engine.wrap_pixel("a Supercalifragilistic b", 50.0, 12.0, 2);
        assert_eq!(lines, vec!["a", "Superc…"]);
        assert_eq!(lines[1].matches(ELLIPSIS).count(), 1);
    }

    #[test]
    fn wrap_marks_line_when_long_word_is_dropped() {
        let engine = engine();
        let lines = engine.wrap_pixel("a Supercalifragilistic b", 50.0, 12.0, 1);
        assert_eq!(lines, vec!["a…"]);
    }

    #[test]
    fn wrap_clamps_long_word_at_five_glyph_budget() {
        let engine = engine();
        let max_width = 5.0 * 8.0 * crate::glyph::DEFAULT_GLYPH_FACTOR;
        let lines = engine.wrap_pixel("ư AaAaòđAơAA", max_width, 8.0, 2);

        assert_eq!(lines, vec!["ư", "AaAa…"]);
        for line in &lines {
            assert!(engine.width(line, 8.0) <= max_width);
        }
    }

    #[test]
    fn wrap_collapses_whitespace_runs() {
        let lines = engine().wrap_pixel("  alpha \t beta\n\ngamma  ", 400.0, 12.0, 3);
        assert_eq!(lines, vec!["alpha beta gamma"]);
    }

    #[test]
    fn wrap_marks_dropped_words_with_ellipsis() {
        let engine = engine();
        let text = "one two three four five six seven eight nine ten eleven twelve";
        let max_width = 14.5 * glyph(12.0);
        let lines = engine.wrap_pixel(text, max_width, 12.0, 2);

        assert_eq!(lines, vec!["one two three", "four five six…"]);
        for line in &lines {
            assert!(engine.width(line, 12.0) <= max_width);
        }
    }

    #[test]
    fn wrap_stops_after_long_word_fills_budget() {
        let engine = engine();
        let lines = engine.wrap_pixel("Supercalifragilistic tail words", 50.0, 12.0, 1);
        assert_eq!(lines, vec!["Superc…"]);
    }

    #[test]
    fn wrap_without_overflow_keeps_last_line_unmarked() {
        let lines = engine().wrap_pixel("short text", 400.0, 12.0, 1);
        assert_eq!(lines, vec!["short text"]);
    }

    #[test]
    fn balancing_moves_words_onto_orphaned_line() {
        let engine = engine().with_balancing(BalanceTuning::default());
        let lines = engine.wrap_pixel("Tôi xây hệ thống tự động hoá", 200.0, 13.0, 2);
        assert_eq!(lines, vec!["Tôi xây hệ thống", "tự động hoá"]);
    }

    #[test]
    fn balancing_keeps_minimum_words_on_first_line() {
        let engine = engine();
        let mut lines = vec!["alpha beta gamma delta".to_owned(), "z".to_owned()];
        let tuning = BalanceTuning {
            shortfall_ratio: 0.9,
            target_ratio:    1.0,
            min_words:       3
        };
        engine.balance_lines(&mut lines, 400.0, 12.0, &tuning);
        assert_eq!(lines, vec!["alpha beta gamma delta", "z"]);
    }

    #[test]
    fn balancing_reverts_move_that_overflows() {
        let engine = engine();
        let max_width = 12.0 * glyph(10.0);
        let mut lines = vec!["aa bb cc dd ee".to_owned(), "ffffffffff".to_owned()];
        let tuning = BalanceTuning {
            shortfall_ratio: 1.0,
            target_ratio:    1.0,
            min_words:       1
        };
        engine.balance_lines(&mut lines, max_width, 10.0, &tuning);
        assert_eq!(lines, vec!["aa bb cc dd ee", "ffffffffff"]);
    }

    #[test]
    fn balancing_ignores_other_line_counts() {
        let engine = engine();
        let mut lines = vec!["a b c d e".to_owned(), "f".to_owned(), "g".to_owned()];
        let original = lines.clone();
        engine.balance_lines(&mut lines, 400.0, 12.0, &BalanceTuning::default());
        assert_eq!(lines, original);
    }

    #[test]
    fn balancing_is_skipped_when_content_was_dropped() {
        let engine = engine().with_balancing(BalanceTuning::default());
        let text = "one two three four five six seven eight nine ten eleven twelve";
        let lines = engine.wrap_pixel(text, 14.5 * glyph(12.0), 12.0, 2);
        assert_eq!(lines[0], "one two three");
    }

    #[test]
    fn engine_toggles_balancing() {
        let engine = engine().with_balancing(BalanceTuning::default());
        assert!(engine.balancing().is_some());
        assert!(engine.without_balancing().balancing().is_none());
    }

    fn words() -> impl Strategy<Value = String> {
        prop::collection::vec("[A-Za-zàáâãèéêìíòóôõùúăđơư]{1,14}", 0..24).prop_map(|words| words.join(" "))
    }

    proptest! {
        #[test]
        fn wrapped_lines_fit_width(
            text in words(),
            font_size in 8.0f64..24.0,
            glyphs in 5.0f64..60.0,
            max_lines in 1usize..5,
            balance in any::<bool>()
        ) {
            let mut engine = engine();
            if balance {
                engine = engine.with_balancing(BalanceTuning::default());
            }
            let max_width = glyphs * font_size * crate::glyph::DEFAULT_GLYPH_FACTOR;
            for line in engine.wrap_pixel(&text, max_width, font_size, max_lines) {
                prop_assert!(engine.width(&line, font_size) <= max_width);
            }
        }

        #[test]
        fn wrapped_line_count_is_bounded(
            text in words(),
            max_width in 0.0f64..400.0,
            font_size in 1.0f64..30.0,
            max_lines in 0usize..6
        ) {
            let lines = engine().wrap_pixel(&text, max_width, font_size, max_lines);
            prop_assert!(lines.len() <= max_lines);
        }

        #[test]
        fn clamp_is_identity_on_fitting_text(
            text in "[ -~]{0,40}",
            font_size in 6.0f64..20.0
        ) {
            let engine = engine();
            let width = engine.width(&text, font_size);
            prop_assert_eq!(engine.clamp_to_width(&text, width, font_size), text);
        }

        // Inputs at or below the clamp floor come back whole plus the marker,
        // one character longer than the input; they are covered by
        // `clamp_at_floor_appends_marker_to_whole_input`.
        #[test]
        fn clamp_marks_shortened_text(
            text in "[A-Za-z ]{5,60}",
            font_size in 6.0f64..20.0,
            max_width in 1.0f64..200.0
        ) {
            let engine = engine();
            let clamped = engine.clamp_to_width(&text, max_width, font_size);
            if clamped != text {
                prop_assert!(clamped.ends_with(ELLIPSIS));
                prop_assert!(clamped.chars().count() < text.chars().count() + 1);
            }
        }

        #[test]
        fn blank_input_is_always_empty(
            blank in "[ \t\n]{0,12}",
            max_width in 1.0f64..400.0,
            max_lines in 0usize..4
        ) {
            prop_assert!(engine().wrap_pixel(&blank, max_width, 12.0, max_lines).is_empty());
        }

        #[test]
        fn balancing_preserves_word_sequence(
            text in words(),
            glyphs in 5.0f64..60.0
        ) {
            let plain = engine();
            let balanced = engine().with_balancing(BalanceTuning::default());
            let max_width = glyphs * 12.0 * crate::glyph::DEFAULT_GLYPH_FACTOR;
            let plain_lines = plain.wrap_pixel(&text, max_width, 12.0, 2);
            let balanced_lines = balanced.wrap_pixel(&text, max_width, 12.0, 2);
            prop_assert_eq!(plain_lines.len(), balanced_lines.len());
            prop_assert_eq!(plain_lines.join(" "), balanced_lines.join(" "));
        }
    }
}
