// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Top languages card.
//!
//! [`top_languages`] turns summed byte counts into ranked shares and
//! [`render_languages`] lays them out as a list with an optional stacked bar.

use std::{cmp::Ordering, collections::BTreeMap, fmt::Write as _};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    svg,
    theme::{LanguageColors, Palette}
};

/// Width of the languages card.
pub const LANGUAGES_CARD_WIDTH: f64 = 495.0;
/// Default number of languages listed.
pub const DEFAULT_LANGS_COUNT: usize = 8;
/// Default corner radius of the card border.
pub const DEFAULT_BORDER_RADIUS: u8 = 8;

const PAD: f64 = 16.0;
const GAP: f64 = 12.0;
const STACK_HEIGHT: f64 = 14.0;

/// One ranked language with its share of the visible byte total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub name:    String,
    pub bytes:   u64,
    /// Percentage in `0.0..=100.0`.
    pub percent: f64,
    pub color:   String
}

/// Ranks languages by byte count.
///
/// Names listed in `hide` (compared case-insensitively) are removed before
/// percentages are computed, so the visible shares add up to 100.
pub fn top_languages(
    totals: &BTreeMap<String, u64>,
    hide: &[String],
    count: usize,
    colors: &LanguageColors
) -> Vec<LanguageShare> {
    let mut visible: Vec<(&String, u64)> = totals
        .iter()
        .filter(|(name, _)| {
            let lowered = name.to_lowercase();
            !hide.iter().any(|hidden| hidden.to_lowercase() == lowered)
        })
        .map(|(name, bytes)| (name, *bytes))
        .collect();
    visible.sort_by(|left, right| match right.1.cmp(&left.1) {
        Ordering::Equal => left.0.cmp(right.0),
        other => other
    });

    let sum = visible.iter().map(|(_, bytes)| *bytes).sum::<u64>().max(1) as f64;
    visible
        .into_iter()
        .take(count)
        .map(|(name, bytes)| LanguageShare {
            name: name.clone(),
            bytes,
            percent: bytes as f64 / sum * 100.0,
            color: colors.color(name)
        })
        .collect()
}

/// Splits `bar_width` pixels between shares.
///
/// Each segment gets the floor of its proportional width; leftover pixels
/// are handed out one at a time from the first segment onwards, so the
/// segments always fill the bar exactly.
pub fn segment_widths(shares: &[LanguageShare], bar_width: u32) -> Vec<u32> {
    if shares.is_empty() {
        return Vec::new();
    }
    let mut widths: Vec<u32> = shares
        .iter()
        .map(|share| ((share.percent / 100.0) * f64::from(bar_width)).floor().max(0.0) as u32)
        .collect();
    let used: u32 = widths.iter().sum();
    let remainder = bar_width.saturating_sub(used) as usize;
    let segments = widths.len();
    for step in 0..remainder {
        widths[step % segments] += 1;
    }
    widths
}

/// Grid arrangement of the language list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageLayout {
    /// Two columns with slim bars.
    #[default]
    Compact,
    /// One column with taller bars.
    Normal
}

/// Presentation switches for the languages card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagesOptions {
    pub layout:        LanguageLayout,
    pub stacked:       bool,
    pub show_icons:    bool,
    pub hide_title:    bool,
    pub hide_footer:   bool,
    pub hide_border:   bool,
    pub border_radius: u8,
    pub title:         Option<String>
}

impl Default for LanguagesOptions {
    fn default() -> Self {
        Self {
            layout:        LanguageLayout::default(),
            stacked:       true,
            show_icons:    true,
            hide_title:    false,
            hide_footer:   false,
            hide_border:   false,
            border_radius: DEFAULT_BORDER_RADIUS,
            title:         None
        }
    }
}

/// Context printed in the header and footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagesMeta {
    pub username:    String,
    pub theme_name:  String,
    pub repos_used:  usize,
    pub hide:        Vec<String>,
    pub langs_count: usize,
    pub updated:     DateTime<Utc>
}

impl LanguagesMeta {
    fn footer(&self) -> String {
        let hide = if self.hide.is_empty() {
            "∅".to_owned()
        } else {
            self.hide.join(",")
        };
        format!(
            "theme={} • hide={} • langs={} • updated={}Z",
            self.theme_name,
            hide,
            self.langs_count,
            self.updated.format("%Y-%m-%dT%H:%M")
        )
    }
}

/// Renders the top languages card.
pub fn render_languages(
    shares: &[LanguageShare],
    theme: &Palette,
    options: &LanguagesOptions,
    meta: &LanguagesMeta
) -> String {
    let width = LANGUAGES_CARD_WIDTH;
    let header_height = if options.hide_title { 16.0 } else { 44.0 };
    let normal = options.layout == LanguageLayout::Normal;
    let columns = if normal { 1 } else { 2 };
    let cell_width = if normal {
        width - PAD * 2.0
    } else {
        ((width - PAD * 2.0 - GAP) / 2.0).floor()
    };
    let row_height = if normal { 40.0 } else { 34.0 };
    let stack_y = header_height + if options.stacked { 4.0 } else { 0.0 };
    let rows = shares.len().div_ceil(columns).max(1);
    let footer_height = if options.hide_footer { 8.0 } else { 22.0 };
    let stacked_height = if options.stacked { STACK_HEIGHT + 10.0 } else { 0.0 };
    let height = header_height + stacked_height + rows as f64 * row_height + footer_height;
    let stack_radius = f64::min(6.0, (STACK_HEIGHT / 2.0).floor());

    let title = options
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .unwrap_or("Top Languages");

    let mut buffer = svg::document_open(width, height, title, false);
    buffer.push_str(&svg::frame_defs(theme, (-20, -20, 140, 140), (10, 12)));
    let _ = writeln!(
        buffer,
        "    <clipPath id=\"stackClip\">\n      <rect x=\"{PAD}\" y=\"{stack_y}\" width=\"{}\" height=\"{STACK_HEIGHT}\" rx=\"{stack_radius}\"/>\n    </clipPath>\n  </defs>",
        width - PAD * 2.0
    );

    let fill = if theme.is_transparent() { "none" } else { "url(#bgGrad)" };
    let stroke = if options.hide_border { "none" } else { theme.border.as_str() };
    let _ = writeln!(
        buffer,
        "  <rect x=\"0.5\" y=\"0.5\" width=\"{}\" height=\"{}\" rx=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\" filter=\"url(#shadow)\"/>",
        width - 1.0,
        height - 1.0,
        options.border_radius
    );

    if !options.hide_title {
        let subtitle = format!("{} • {} repos", meta.username, meta.repos_used);
        let _ = writeln!(
            buffer,
            "  <g transform=\"translate({PAD},16)\">\n    <circle cx=\"8\" cy=\"8\" r=\"8\" fill=\"rgba(245,183,0,0.18)\"/>\n    {}\n    {}\n    {}\n  </g>",
            svg::text(8.0, 11.0, 10.0, &theme.accent, "text-anchor=\"middle\"", "⌁"),
            svg::text(24.0, 12.0, 16.0, &theme.title, "font-weight=\"800\"", title),
            svg::text(width - PAD * 2.0, 12.0, 11.0, &theme.muted, "text-anchor=\"end\"", &subtitle)
        );
    }

    if options.stacked && !shares.is_empty() {
        let bar_width = width - PAD * 2.0;
        let _ = write!(
            buffer,
            "  <g>\n    <rect x=\"{PAD}\" y=\"{stack_y}\" width=\"{bar_width}\" height=\"{STACK_HEIGHT}\" rx=\"{stack_radius}\" fill=\"{}\"/>\n    <g clip-path=\"url(#stackClip)\">",
            theme.track
        );
        let mut x = PAD;
        for (share, segment) in shares.iter().zip(segment_widths(shares, bar_width as u32)) {
            if segment == 0 {
                continue;
            }
            let _ = write!(
                buffer,
                "<rect x=\"{x}\" y=\"{stack_y}\" width=\"{segment}\" height=\"{STACK_HEIGHT}\" fill=\"{}\"/>",
                share.color
            );
            x += f64::from(segment);
        }
        buffer.push_str("</g>\n  </g>\n");
    }

    let list_top = header_height + if options.stacked { STACK_HEIGHT + 18.0 } else { 0.0 };
    let (text_y, bar_y, bar_height) = if normal { (14.0, 22.0, 8.0) } else { (13.0, 20.0, 6.0) };
    for (index, share) in shares.iter().enumerate() {
        let x = PAD + (index % columns) as f64 * (cell_width + GAP);
        let y = list_top + (index / columns) as f64 * row_height;
        let bar_width = cell_width - 4.0;
        let fill_width = ((share.percent / 100.0) * bar_width).clamp(0.0, bar_width);
        let dot = if options.show_icons {
            format!("<circle cx=\"6\" cy=\"10\" r=\"5\" fill=\"{}\"/>", share.color)
        } else {
            String::new()
        };
        let name_x = if options.show_icons { 16.0 } else { 0.0 };
        let _ = writeln!(
            buffer,
            "  <g transform=\"translate({x},{y})\">{dot}{}{}<rect x=\"0\" y=\"{bar_y}\" width=\"{bar_width}\" height=\"{bar_height}\" rx=\"{}\" fill=\"{}\"/><rect x=\"0\" y=\"{bar_y}\" width=\"{fill_width}\" height=\"{bar_height}\" rx=\"{}\" fill=\"{}\"/></g>",
            svg::text(name_x, text_y, 12.0, &theme.text, "font-weight=\"700\"", &share.name),
            svg::text(
                cell_width - 2.0,
                text_y,
                11.0,
                &theme.muted,
                "text-anchor=\"end\"",
                &format!("{:.1}%", share.percent)
            ),
            bar_height / 2.0,
            theme.track,
            bar_height / 2.0,
            share.color
        );
    }

    if !options.hide_footer {
        let _ = writeln!(
            buffer,
            "  {}",
            svg::text(PAD, height - 10.0, 10.0, &theme.muted, "", &meta.footer())
        );
    }
    buffer.push_str("</svg>\n");
    buffer
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use proptest::prelude::*;

    use super::*;
    use crate::theme::ThemeCatalog;

    fn totals() -> BTreeMap<String, u64> {
        BTreeMap::from([
            ("Rust".to_owned(), 6_000),
            ("CSS".to_owned(), 3_000),
            ("Shell".to_owned(), 1_000),
            ("Python".to_owned(), 3_000),
        ])
    }

    fn meta() -> LanguagesMeta {
        LanguagesMeta {
            username:    "octocat".to_owned(),
            theme_name:  "tokyonight".to_owned(),
            repos_used:  12,
            hide:        vec!["css".to_owned()],
            langs_count: DEFAULT_LANGS_COUNT,
            updated:     Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).single().expect("timestamp")
        }
    }

    #[test]
    fn hidden_languages_are_excluded_from_shares() {
        let shares = top_languages(&totals(), &["css".to_owned()], 8, &LanguageColors::builtin());
        let names: Vec<&str> = shares.iter().map(|share| share.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Python", "Shell"]);
        assert!((shares[0].percent - 60.0).abs() < 1e-9);
        assert!((shares.iter().map(|share| share.percent).sum::<f64>() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn count_limits_output_but_not_denominator() {
        let shares = top_languages(&totals(), &[], 1, &LanguageColors::builtin());
        assert_eq!(shares.len(), 1);
        assert!((shares[0].percent - 46.153_846).abs() < 1e-5);
    }

    #[test]
    fn equal_byte_counts_rank_by_name() {
        let shares = top_languages(&totals(), &[], 8, &LanguageColors::builtin());
        assert_eq!(shares[1].name, "CSS");
        assert_eq!(shares[2].name, "Python");
    }

    #[test]
    fn empty_totals_produce_no_shares() {
        let shares = top_languages(&BTreeMap::new(), &[], 8, &LanguageColors::builtin());
        assert!(shares.is_empty());
        assert!(segment_widths(&shares, 463).is_empty());
    }

    #[test]
    fn segment_widths_hand_out_remainder_from_the_start() {
        let shares = top_languages(
            &BTreeMap::from([
                ("A".to_owned(), 1),
                ("B".to_owned(), 1),
                ("C".to_owned(), 1),
            ]),
            &[],
            8,
            &LanguageColors::builtin()
        );
        assert_eq!(segment_widths(&shares, 100), vec![34, 33, 33]);
    }

    #[test]
    fn footer_lists_context() {
        assert_eq!(
            meta().footer(),
            "theme=tokyonight • hide=css • langs=8 • updated=2024-05-01T08:30Z"
        );
        let mut empty = meta();
        empty.hide.clear();
        assert!(empty.footer().contains("hide=∅"));
    }

    #[test]
    fn card_renders_header_bar_and_rows() {
        let catalog = ThemeCatalog::builtin();
        let shares = top_languages(&totals(), &["css".to_owned()], 8, &LanguageColors::builtin());
        let svg = render_languages(&shares, catalog.resolve("tokyonight"), &LanguagesOptions::default(), &meta());

        assert!(svg.contains("Top Languages"));
        assert!(svg.contains("octocat • 12 repos"));
        assert!(svg.contains("clip-path=\"url(#stackClip)\""));
        assert!(svg.contains("60.0%"));
        assert!(svg.contains("#dea584"));
        assert!(svg.contains("height=\"158\""));
    }

    #[test]
    fn options_toggle_sections() {
        let catalog = ThemeCatalog::builtin();
        let shares = top_languages(&totals(), &[], 8, &LanguageColors::builtin());
        let options = LanguagesOptions {
            layout: LanguageLayout::Normal,
            stacked: false,
            show_icons: false,
            hide_title: true,
            hide_footer: true,
            hide_border: true,
            border_radius: 0,
            title: Some("Stack".to_owned())
        };
        let svg = render_languages(&shares, catalog.resolve("transparent"), &options, &meta());

        assert!(!svg.contains("Top Languages"));
        assert!(svg.contains("aria-label=\"Stack\""));
        assert!(!svg.contains("clip-path=\"url(#stackClip)\""));
        assert!(!svg.contains("<circle cx=\"6\""));
        assert!(svg.contains("fill=\"none\" stroke=\"none\""));
        assert!(svg.contains("height=\"184\""));
    }

    proptest! {
        #[test]
        fn segments_fill_bar_exactly(
            bytes in proptest::collection::vec(1u64..1_000_000, 1..10),
            bar_width in 1u32..800
        ) {
            let totals: BTreeMap<String, u64> = bytes
                .iter()
                .enumerate()
                .map(|(index, value)| (format!("L{index}"), *value))
                .collect();
            let shares = top_languages(&totals, &[], totals.len(), &LanguageColors::builtin());
            let widths = segment_widths(&shares, bar_width);
            prop_assert_eq!(widths.len(), shares.len());
            prop_assert_eq!(widths.iter().sum::<u32>(), bar_width);
        }
    }
}
