// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Repository pin card renderer.
//!
//! Pins keep a fixed 495px canvas so two of them sit side by side in a README
//! table. The card itself is drawn inside a transparent margin, which keeps
//! the drop shadow from bleeding into the neighbouring image.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::{
    format::{format_compact, short_date},
    github::Repository,
    glyph::GlyphWidthModel,
    layout::TextLayoutEngine,
    svg::{self, CHIP_HEIGHT, ChipColors},
    theme::{LanguageColors, Palette}
};

/// Width of the pin canvas including the transparent margin.
pub const PIN_CANVAS_WIDTH: f64 = 495.0;

const OUTER: f64 = 14.0;
const INNER_WIDTH: f64 = PIN_CANVAS_WIDTH - OUTER * 2.0;
const PAD: f64 = 16.0;
const GAP: f64 = 8.0;
const DESC_SIZE: f64 = 12.0;
const DESC_LINE_HEIGHT: f64 = 16.0;
const BADGE_SIZE: f64 = 11.0;
const MAX_TOPICS: usize = 3;
const MAX_CHIP_ROWS: usize = 2;
const CHIP_ROW_GAP: f64 = 8.0;
const MIN_INNER_HEIGHT: f64 = 120.0;
const FOOTER_TEXT: &str = "self-built • actions → svg";
const NO_DESCRIPTION: &str = "No description";

/// Statistic chips a pin can display, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinStat {
    Stars,
    Forks,
    Issues,
    Watchers,
    Language,
    License,
    Topics,
    Updated,
    Size
}

impl PinStat {
    /// Every statistic, the default selection.
    pub const ALL: [Self; 9] = [
        Self::Stars,
        Self::Forks,
        Self::Issues,
        Self::Watchers,
        Self::Language,
        Self::License,
        Self::Topics,
        Self::Updated,
        Self::Size
    ];
}

/// Sections of the pin that can be hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinSection {
    Owner,
    #[serde(alias = "description")]
    Desc,
    Topics,
    Footer
}

/// Selection of what a pin card displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinOptions {
    pub show: Vec<PinStat>,
    pub hide: Vec<PinSection>
}

impl Default for PinOptions {
    fn default() -> Self {
        Self {
            show: PinStat::ALL.to_vec(),
            hide: Vec::new()
        }
    }
}

impl PinOptions {
    fn shows(&self, stat: PinStat) -> bool {
        self.show.contains(&stat)
    }

    fn hides(&self, section: PinSection) -> bool {
        self.hide.contains(&section)
    }
}

/// Text of the visibility badge in the top-right corner.
pub fn visibility_badge(repository: &Repository) -> String {
    let visibility = if repository.private { "Private" } else { "Public" };
    if repository.fork {
        format!("{visibility} • Fork")
    } else {
        visibility.to_owned()
    }
}

/// Title font size chosen from the repository name length.
pub fn title_font_size(name: &str) -> f64 {
    match name.chars().count() {
        length if length > 36 => 13.0,
        length if length > 26 => 14.0,
        _ => 16.0
    }
}

struct StatPiece {
    label: String,
    dot:   Option<String>
}

fn stat_pieces(repository: &Repository, options: &PinOptions, colors: &LanguageColors) -> Vec<StatPiece> {
    let language = repository
        .language
        .as_deref()
        .filter(|language| !language.is_empty())
        .unwrap_or("—");
    let plain = |label: String| StatPiece {
        label,
        dot: None
    };
    let mut pieces = Vec::new();

    if options.shows(PinStat::Stars) {
        pieces.push(plain(format!("★ {}", format_compact(repository.stargazers_count))));
    }
    if options.shows(PinStat::Forks) {
        pieces.push(plain(format!("⑂ {}", format_compact(repository.forks_count))));
    }
    if options.shows(PinStat::Issues) {
        pieces.push(plain(format!("! {}", format_compact(repository.open_issues_count))));
    }
    if options.shows(PinStat::Watchers) {
        pieces.push(plain(format!("👁 {}", format_compact(repository.watchers()))));
    }
    if options.shows(PinStat::Language) {
        pieces.push(StatPiece {
            label: format!("Lang {language}"),
            dot:   Some(colors.color(language))
        });
    }
    if options.shows(PinStat::License) {
        pieces.push(plain(format!("Lic {}", repository.spdx_id().unwrap_or("—"))));
    }
    if options.shows(PinStat::Size) {
        pieces.push(plain(format!("Size {}KB", format_compact(repository.size))));
    }
    if options.shows(PinStat::Updated) {
        pieces.push(plain(format!("↻ {}", short_date(repository.last_activity().unwrap_or_default()))));
    }
    pieces
}

/// Renders a repository pin card.
///
/// The title is clamped to the space left of the visibility badge and the
/// description wraps to at most two lines. Statistic chips flow left to right
/// over at most two rows; chips that do not fit are dropped.
pub fn render_pin_card<M>(
    owner: &str,
    repository: &Repository,
    theme: &Palette,
    colors: &LanguageColors,
    options: &PinOptions,
    engine: &TextLayoutEngine<M>
) -> String
where
    M: GlyphWidthModel
{
    let name = repository.name.as_str();
    let content_right = INNER_WIDTH - PAD;

    let description = repository
        .description
        .as_deref()
        .map(str::trim)
        .filter(|description| !description.is_empty())
        .unwrap_or(NO_DESCRIPTION);
    let desc_lines = if options.hides(PinSection::Desc) {
        Vec::new()
    } else {
        engine.wrap_pixel(description, INNER_WIDTH - PAD * 2.0, DESC_SIZE, 2)
    };
    let topics: Vec<&String> = repository.topics.iter().take(MAX_TOPICS).collect();
    let show_topics =
        options.shows(PinStat::Topics) && !options.hides(PinSection::Topics) && !topics.is_empty();

    let badge = visibility_badge(repository);
    let title_size = title_font_size(name);
    let max_title_width = (INNER_WIDTH - PAD * 2.0) - engine.width(&badge, BADGE_SIZE) - 18.0;
    let title = engine.clamp_to_width(name, max_title_width, title_size);

    let mut body = String::with_capacity(4096);
    let mut y = 16.0;
    let header_height = if options.hides(PinSection::Owner) { 28.0 } else { 42.0 };
    let owner_line = if options.hides(PinSection::Owner) {
        String::new()
    } else {
        format!("\n    {}", svg::text(30.0, 32.0, 11.0, &theme.muted, "", owner))
    };
    let _ = writeln!(
        body,
        "  <g transform=\"translate({PAD},{y})\">\n    <circle cx=\"10\" cy=\"10\" r=\"10\" fill=\"{}\"/>\n    {}\n    {}{owner_line}\n    {}\n  </g>",
        theme.chip_bg,
        svg::text(10.0, 14.0, 12.0, &theme.accent, "text-anchor=\"middle\"", "⌁"),
        svg::text(30.0, 14.0, title_size, &theme.title, "font-weight=\"900\"", &title),
        svg::text(INNER_WIDTH - PAD * 2.0, 14.0, BADGE_SIZE, &theme.muted, "text-anchor=\"end\"", &badge)
    );
    y += header_height;

    if !desc_lines.is_empty() {
        for (index, line) in desc_lines.iter().enumerate() {
            let _ = writeln!(
                body,
                "  {}",
                svg::text(PAD, y + 14.0 + index as f64 * DESC_LINE_HEIGHT, DESC_SIZE, &theme.text, "", line)
            );
        }
        y += desc_lines.len() as f64 * DESC_LINE_HEIGHT + 6.0;
    }

    let chip_colors = ChipColors {
        fill:   &theme.chip_bg,
        stroke: "rgba(255,255,255,0.06)",
        text:   &theme.muted
    };

    if show_topics {
        let mut x = PAD;
        for topic in &topics {
            let chip = svg::chip(engine, x, y, &format!("#{topic}"), chip_colors, None);
            if x + chip.width > content_right {
                break;
            }
            let _ = writeln!(body, "  {}", chip.markup);
            x += chip.width + GAP;
        }
        y += 26.0;
    }

    let _ = writeln!(
        body,
        "  <rect x=\"{PAD}\" y=\"{y}\" width=\"{}\" height=\"1\" fill=\"{}\" opacity=\"0.9\"/>",
        INNER_WIDTH - PAD * 2.0,
        theme.track
    );
    y += 12.0;

    let mut chip_x = PAD;
    let mut chip_y = y;
    let mut row = 1;
    for piece in stat_pieces(repository, options, colors) {
        let dot = piece.dot.as_deref();
        let mut chip = svg::chip(engine, chip_x, chip_y, &piece.label, chip_colors, dot);
        if chip_x + chip.width > content_right {
            row += 1;
            if row > MAX_CHIP_ROWS {
                break;
            }
            chip_x = PAD;
            chip_y += CHIP_HEIGHT + CHIP_ROW_GAP;
            chip = svg::chip(engine, chip_x, chip_y, &piece.label, chip_colors, dot);
            if chip_x + chip.width > content_right {
                continue;
            }
        }
        let _ = writeln!(body, "  {}", chip.markup);
        chip_x += chip.width + GAP;
    }
    y = chip_y + CHIP_HEIGHT;

    if options.hides(PinSection::Footer) {
        y += 8.0;
    } else {
        y += 10.0;
        let _ = writeln!(body, "  {}", svg::text(PAD, y, 10.0, &theme.muted, "", FOOTER_TEXT));
        y += 10.0;
    }

    let inner_height = MIN_INNER_HEIGHT.max(y + 10.0);
    let canvas_height = inner_height + OUTER * 2.0;

    let mut buffer = svg::document_open(PIN_CANVAS_WIDTH, canvas_height, &format!("{owner}/{name}"), false);
    buffer.push_str(&svg::frame_defs(theme, (-10, -10, 120, 140), (8, 9)));
    buffer.push_str("  </defs>\n");
    let _ = writeln!(
        buffer,
        "<g transform=\"translate({OUTER},{OUTER})\">\n  <rect x=\"0.5\" y=\"0.5\" width=\"{}\" height=\"{}\" rx=\"14\" fill=\"{}\" stroke=\"url(#borderGrad)\" stroke-width=\"1.2\" filter=\"url(#shadow)\"/>",
        INNER_WIDTH - 1.0,
        inner_height - 1.0,
        background_fill(theme)
    );
    buffer.push_str(&body);
    buffer.push_str("</g>\n</svg>\n");
    buffer
}

fn background_fill(theme: &Palette) -> &str {
    if theme.is_transparent() { "none" } else { "url(#bgGrad)" }
}
