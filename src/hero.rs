// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Hero banner renderer.
//!
//! The banner is split into a wide left column (name, tagline, description,
//! badges, feature points, call to action, links) and a narrow right column
//! of "quick facts" pills. Canvas height grows with whichever column needs
//! more room. Free text is wrapped or clamped to its column so nothing spills
//! into the neighbouring column.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::{
    glyph::GlyphWidthModel,
    layout::TextLayoutEngine,
    svg::{self, ChipColors, FONT_FAMILY},
    theme::{HeroPalette, HeroStyle, Palette}
};

/// Default canvas width of the banner.
pub const DEFAULT_HERO_WIDTH: f64 = 1030.0;

const OUTER: f64 = 18.0;
const PAD: f64 = 26.0;
const GAP: f64 = 26.0;
const RADIUS: f64 = 16.0;
const MIN_INNER_HEIGHT: f64 = 220.0;

const HEADER_Y: f64 = 22.0;
const HEADER_HEIGHT: f64 = 66.0;
const TITLE_SIZE: f64 = 22.0;
const DESC_SIZE: f64 = 13.0;
const DESC_LINE_HEIGHT: f64 = 18.0;
const POINT_SIZE: f64 = 12.0;
const POINT_LINE_HEIGHT: f64 = 16.0;
const POINT_GAP: f64 = 6.0;
const CTA_WIDTH: f64 = 150.0;
const CTA_HEIGHT: f64 = 34.0;
const BOTTOM_PAD: f64 = 26.0;
const STAT_HEIGHT: f64 = 48.0;
const STAT_GAP: f64 = 10.0;
const RIGHT_TOP: f64 = 54.0;

const MAX_BADGES: usize = 6;
const MAX_POINTS: usize = 3;
const MAX_STATS: usize = 3;
const MAX_LINKS: usize = 3;

/// Label and value pair used for stat pills and links.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LabeledValue {
    /// Left-hand label, e.g. `Projects` or `GitHub`.
    pub label: String,
    /// Right-hand value, e.g. `25+` or a URL.
    #[serde(alias = "url")]
    pub value: String
}

/// Everything the banner displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroContent {
    pub title:       String,
    pub tagline:     String,
    pub description: String,
    pub badges:      Vec<String>,
    pub points:      Vec<String>,
    pub stats:       Vec<LabeledValue>,
    pub cta_text:    String,
    pub cta_url:     String,
    pub links:       Vec<LabeledValue>,
    pub right_note:  String
}

/// Canvas options for the banner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroOptions {
    /// Total canvas width including the transparent margin.
    pub width: f64,
    /// Visual preset applied on top of the theme.
    pub style: HeroStyle
}

impl Default for HeroOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_HERO_WIDTH,
            style: HeroStyle::default()
        }
    }
}

/// Column geometry derived from the canvas width.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Columns {
    inner_width: f64,
    left_x:      f64,
    left_width:  f64,
    right_x:     f64,
    right_width: f64
}

impl Columns {
    fn for_width(canvas_width: f64) -> Self {
        let inner_width = canvas_width - OUTER * 2.0;
        let content_width = inner_width - PAD * 2.0;
        let left_width = ((content_width - GAP) * 0.62).floor();
        let right_width = (content_width - GAP) - left_width;
        Self {
            inner_width,
            left_x: PAD,
            left_width,
            right_x: PAD + left_width + GAP,
            right_width
        }
    }
}

/// Renders the hero banner.
///
/// # Examples
///
/// ```
/// use readme_cards::{HeroContent, HeroOptions, TextLayoutEngine, ThemeCatalog, render_hero};
///
/// let content = HeroContent {
///     title: "The Octocat".to_owned(),
///     description: "Automation, web apps and chatbots.".to_owned(),
///     ..HeroContent::default()
/// };
/// let svg = render_hero(
///     &content,
///     ThemeCatalog::builtin().resolve("tokyonight"),
///     &HeroOptions::default(),
///     &TextLayoutEngine::new()
/// );
/// assert!(svg.contains("The Octocat"));
/// ```
pub fn render_hero<M>(
    content: &HeroContent,
    theme: &Palette,
    options: &HeroOptions,
    engine: &TextLayoutEngine<M>
) -> String
where
    M: GlyphWidthModel
{
    let palette = options.style.apply(theme);
    let columns = Columns::for_width(options.width);
    let Columns {
        inner_width,
        left_x,
        left_width,
        right_x,
        right_width
    } = columns;

    let desc_lines = engine.wrap_pixel(&content.description, left_width, DESC_SIZE, 2);
    let badges: Vec<&String> = content.badges.iter().take(MAX_BADGES).collect();
    let points: Vec<&String> = content.points.iter().take(MAX_POINTS).collect();
    let stats: Vec<&LabeledValue> = content.stats.iter().take(MAX_STATS).collect();
    let links: Vec<&LabeledValue> = content.links.iter().take(MAX_LINKS).collect();

    let desc_y = HEADER_Y + HEADER_HEIGHT;
    let after_desc_y = desc_y + desc_lines.len() as f64 * DESC_LINE_HEIGHT + 16.0;
    let badges_height = if badges.is_empty() { 0.0 } else { 30.0 };
    let divider_y = after_desc_y + badges_height;
    let after_divider_y = divider_y + 16.0;

    let mut points_markup = String::new();
    let mut point_y = after_divider_y;
    let mut points_height = 0.0;
    for point in &points {
        let lines = engine.wrap_pixel(point, left_width - 22.0, POINT_SIZE, 2);
        let row_height = feature_row(&mut points_markup, left_x, point_y, &palette, &lines);
        point_y += row_height + POINT_GAP;
        points_height += row_height + POINT_GAP;
    }
    if !points.is_empty() {
        points_height = f64::max(0.0, points_height - POINT_GAP);
    }

    let cta_y = after_divider_y + points_height + 12.0;
    let stats_height = if stats.is_empty() {
        0.0
    } else {
        stats.len() as f64 * STAT_HEIGHT + (stats.len() - 1) as f64 * STAT_GAP
    };
    let left_required = cta_y + CTA_HEIGHT + BOTTOM_PAD;
    let right_required = RIGHT_TOP + stats_height + BOTTOM_PAD;
    let inner_height = MIN_INNER_HEIGHT.max(left_required).max(right_required);
    let canvas_height = inner_height + OUTER * 2.0;

    let base = &palette.base;
    let mut buffer = svg::document_open(options.width, canvas_height, &content.title, true);
    buffer.push_str(&svg::frame_defs(base, (-18, -22, 140, 170), (10, 12)));
    let _ = writeln!(
        buffer,
        "    <linearGradient id=\"ctaGrad\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"0\">\n      <stop offset=\"0%\" stop-color=\"{}\"/>\n      <stop offset=\"100%\" stop-color=\"{}\"/>\n    </linearGradient>\n    <clipPath id=\"cardClip\">\n      <rect x=\"0\" y=\"0\" width=\"{inner_width}\" height=\"{inner_height}\" rx=\"{RADIUS}\"/>\n    </clipPath>\n  </defs>",
        base.grad1, base.grad2
    );
    let _ = writeln!(buffer, "  <g transform=\"translate({OUTER},{OUTER})\">");
    let _ = writeln!(
        buffer,
        "    <rect x=\"0.5\" y=\"0.5\" width=\"{}\" height=\"{}\" rx=\"{RADIUS}\" fill=\"url(#bgGrad)\" stroke=\"url(#borderGrad)\" stroke-width=\"1.2\" filter=\"url(#shadow)\"/>",
        inner_width - 1.0,
        inner_height - 1.0
    );
    buffer.push_str("    <g clip-path=\"url(#cardClip)\">\n");

    let _ = writeln!(
        buffer,
        "      <g opacity=\"0.55\"><circle cx=\"{}\" cy=\"46\" r=\"40\" fill=\"{}\" opacity=\"0.22\"/><circle cx=\"{}\" cy=\"90\" r=\"64\" fill=\"{}\" opacity=\"0.16\"/><circle cx=\"90\" cy=\"{}\" r=\"70\" fill=\"{}\" opacity=\"0.10\"/></g>",
        inner_width - 70.0,
        base.grad2,
        inner_width - 140.0,
        base.grad1,
        inner_height - 30.0,
        base.grad1
    );

    header(&mut buffer, content, &palette, left_x, left_width, engine);

    for (index, line) in desc_lines.iter().enumerate() {
        let _ = writeln!(
            buffer,
            "      {}",
            svg::text(left_x, desc_y + index as f64 * DESC_LINE_HEIGHT, DESC_SIZE, &base.text, "", line)
        );
    }

    let chip_colors = ChipColors {
        fill:   &base.chip_bg,
        stroke: &palette.pill_stroke,
        text:   &base.muted
    };
    let mut badge_x = left_x;
    for badge in &badges {
        let chip = svg::chip(engine, badge_x, after_desc_y, badge, chip_colors, None);
        if badge_x + chip.width > left_x + left_width {
            break;
        }
        let _ = writeln!(buffer, "      {}", chip.markup);
        badge_x += chip.width + 8.0;
    }

    let _ = writeln!(
        buffer,
        "      <rect x=\"{left_x}\" y=\"{divider_y}\" width=\"{left_width}\" height=\"1\" fill=\"{}\" opacity=\"0.95\"/>",
        base.track
    );
    buffer.push_str(&points_markup);

    call_to_action(&mut buffer, content, &palette, left_x, cta_y, engine);
    link_pills(&mut buffer, &links, &palette, left_x, left_width, cta_y, engine);
    quick_facts(&mut buffer, content, &stats, &palette, right_x, right_width);

    buffer.push_str("    </g>\n  </g>\n</svg>\n");
    buffer
}

fn monogram(title: &str) -> String {
    let initials: String = title
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if initials.is_empty() {
        "ME".to_owned()
    } else {
        initials
    }
}

fn header<M>(
    buffer: &mut String,
    content: &HeroContent,
    palette: &HeroPalette,
    left_x: f64,
    left_width: f64,
    engine: &TextLayoutEngine<M>
) where
    M: GlyphWidthModel
{
    let base = &palette.base;
    let title = engine.clamp_to_width(&content.title, left_width - 70.0, TITLE_SIZE);
    let _ = writeln!(
        buffer,
        "      <g transform=\"translate({left_x},{HEADER_Y})\">\n        <circle cx=\"18\" cy=\"18\" r=\"18\" fill=\"{}\"/>\n        {}\n        {}\n        {}\n      </g>",
        palette.pill_bg,
        svg::text(18.0, 24.0, 14.0, &base.title, "text-anchor=\"middle\" font-weight=\"900\"", &monogram(&content.title)),
        svg::text(48.0, 18.0, TITLE_SIZE, &base.title, "font-weight=\"900\"", &title),
        svg::text(48.0, 40.0, 12.0, &base.muted, "", &content.tagline)
    );
}

/// Appends a check-marked feature row and returns its height.
fn feature_row(buffer: &mut String, x: f64, y: f64, palette: &HeroPalette, lines: &[String]) -> f64 {
    let base = &palette.base;
    let _ = writeln!(
        buffer,
        "      <g transform=\"translate({x},{y})\"><circle cx=\"6\" cy=\"6\" r=\"6\" fill=\"{}\" opacity=\"0.95\"/><text x=\"6\" y=\"10\" text-anchor=\"middle\" font-size=\"10\" font-weight=\"900\" fill=\"{}\" font-family=\"{FONT_FAMILY}\">✓</text></g>",
        base.accent, palette.ok_text
    );
    for (index, line) in lines.iter().enumerate() {
        let _ = writeln!(
            buffer,
            "      {}",
            svg::text(x + 18.0, y + 11.0 + index as f64 * POINT_LINE_HEIGHT, POINT_SIZE, &base.text, "", line)
        );
    }
    f64::max(14.0, lines.len() as f64 * POINT_LINE_HEIGHT)
}

fn call_to_action<M>(
    buffer: &mut String,
    content: &HeroContent,
    palette: &HeroPalette,
    x: f64,
    y: f64,
    engine: &TextLayoutEngine<M>
) where
    M: GlyphWidthModel
{
    let font_size = 12.0;
    let label = engine.clamp_to_width(&content.cta_text, CTA_WIDTH - 28.0, font_size);
    let label_x = x + f64::max(14.0, (CTA_WIDTH - engine.width(&label, font_size)) / 2.0);
    let inner = format!(
        "<g><rect x=\"{x}\" y=\"{y}\" width=\"{CTA_WIDTH}\" height=\"{CTA_HEIGHT}\" rx=\"{}\" fill=\"url(#ctaGrad)\" stroke=\"{}\"/>{}</g>",
        (CTA_HEIGHT / 2.0).floor(),
        palette.base.border,
        svg::text(
            label_x,
            y + (CTA_HEIGHT * 0.68).floor(),
            font_size,
            &palette.button_text,
            "font-weight=\"900\"",
            &label
        )
    );
    let _ = writeln!(buffer, "      {}", svg::link_wrap(&content.cta_url, &inner));
}

fn link_pills<M>(
    buffer: &mut String,
    links: &[&LabeledValue],
    palette: &HeroPalette,
    left_x: f64,
    left_width: f64,
    cta_y: f64,
    engine: &TextLayoutEngine<M>
) where
    M: GlyphWidthModel
{
    let mut x = left_x + CTA_WIDTH + 10.0;
    let y = cta_y + 6.0;
    for link in links {
        let label = format!("@{}", link.label);
        let width = (36.0 + engine.width(&label, 11.0)).ceil();
        if x + width > left_x + left_width {
            break;
        }
        let inner = format!(
            "<g><rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"22\" rx=\"11\" fill=\"{}\" stroke=\"{}\"/>{}</g>",
            palette.pill_bg,
            palette.pill_stroke,
            svg::text(x + 12.0, y + 15.0, 11.0, &palette.base.muted, "", &label)
        );
        let _ = writeln!(buffer, "      {}", svg::link_wrap(&link.value, &inner));
        x += width + 8.0;
    }
}

fn quick_facts(
    buffer: &mut String,
    content: &HeroContent,
    stats: &[&LabeledValue],
    palette: &HeroPalette,
    right_x: f64,
    right_width: f64
) {
    let base = &palette.base;
    let _ = writeln!(
        buffer,
        "      <g transform=\"translate({right_x},24)\">\n        <circle cx=\"18\" cy=\"18\" r=\"18\" fill=\"{}\"/>\n        {}\n        {}\n        {}\n      </g>",
        palette.pill_bg,
        svg::text(18.0, 24.0, 14.0, &base.title, "text-anchor=\"middle\" font-weight=\"900\"", "⚡"),
        svg::text(46.0, 18.0, 14.0, &base.title, "font-weight=\"900\"", "Quick facts"),
        svg::text(46.0, 38.0, 11.0, &base.muted, "", &content.right_note)
    );

    let mut y = RIGHT_TOP;
    for stat in stats {
        let _ = writeln!(
            buffer,
            "      <g><rect x=\"{right_x}\" y=\"{y}\" width=\"{right_width}\" height=\"{STAT_HEIGHT}\" rx=\"12\" fill=\"{}\" stroke=\"{}\"/>{}{}</g>",
            palette.pill_bg,
            palette.pill_stroke,
            svg::text(right_x + 12.0, y + 16.0, 11.0, &base.muted, "", &stat.label),
            svg::text(right_x + 12.0, y + 34.0, 16.0, &base.title, "font-weight=\"900\"", &stat.value)
        );
        y += STAT_HEIGHT + STAT_GAP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeCatalog;

    fn sample() -> HeroContent {
        HeroContent {
            title:       "Trần Đăng Khoa".to_owned(),
            tagline:     "Automation • Web Apps • AI".to_owned(),
            description: "Tôi xây hệ thống tự động hoá, landing page và chatbot để giúp bạn tăng doanh thu."
                .to_owned(),
            badges:      vec![
                "Open for freelance".to_owned(),
                "Remote".to_owned(),
                "Fast delivery".to_owned(),
            ],
            points:      vec![
                "Tự động hoá quy trình (Sheets/CRM/Zapier)".to_owned(),
                "Landing page SEO + Analytics".to_owned(),
                "Chatbot + API tích hợp".to_owned(),
            ],
            stats:       vec![
                LabeledValue {
                    label: "Projects".to_owned(),
                    value: "25+".to_owned()
                },
                LabeledValue {
                    label: "Response".to_owned(),
                    value: "<24h".to_owned()
                },
            ],
            cta_text:    "Contact me".to_owned(),
            cta_url:     "mailto:someone@example.com".to_owned(),
            links:       vec![LabeledValue {
                label: "GitHub".to_owned(),
                value: "https://github.com/octocat".to_owned()
            }],
            right_note:  "Let's build something".to_owned()
        }
    }

    fn render(content: &HeroContent, options: &HeroOptions) -> String {
        let catalog = ThemeCatalog::builtin();
        render_hero(content, catalog.resolve("tokyonight"), options, &TextLayoutEngine::new())
    }

    #[test]
    fn columns_split_default_canvas() {
        let columns = Columns::for_width(DEFAULT_HERO_WIDTH);
        assert_eq!(columns.inner_width, 994.0);
        assert_eq!(columns.left_width, 567.0);
        assert_eq!(columns.right_width, 349.0);
        assert_eq!(columns.right_x, 619.0);
    }

    #[test]
    fn banner_contains_escaped_content() {
        let svg = render(&sample(), &HeroOptions::default());
        assert!(svg.contains("Trần Đăng Khoa"));
        assert!(svg.contains("&lt;24h"));
        assert!(svg.contains("Quick facts"));
        assert!(svg.contains("xlink:href=\"mailto:someone@example.com\""));
        assert!(svg.contains("@GitHub"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn clean_style_overrides_theme_background() {
        let svg = render(&sample(), &HeroOptions::default());
        assert!(svg.contains("#0b1220"));
        let themed = render(
            &sample(),
            &HeroOptions {
                style: HeroStyle::Theme,
                ..HeroOptions::default()
            }
        );
        assert!(themed.contains("#1a1b26"));
    }

    #[test]
    fn minimum_height_applies_to_sparse_banner() {
        let content = HeroContent {
            title: "Solo".to_owned(),
            ..HeroContent::default()
        };
        let svg = render(&content, &HeroOptions::default());
        assert!(svg.contains("height=\"256\""));
    }

    #[test]
    fn limits_collections_to_column_capacity() {
        let mut content = sample();
        content.points = (0..6).map(|index| format!("Point number {index}")).collect();
        let svg = render(&content, &HeroOptions::default());
        assert!(svg.contains("Point number 2"));
        assert!(!svg.contains("Point number 3"));
    }

    #[test]
    fn long_title_is_clamped_to_left_column() {
        let mut content = sample();
        content.title = "An extraordinarily long display name ".repeat(4);
        let svg = render(&content, &HeroOptions::default());
        assert!(svg.contains('…'));
    }

    #[test]
    fn monogram_uses_first_two_initials() {
        assert_eq!(monogram("trần đăng khoa"), "TĐ");
        assert_eq!(monogram("   "), "ME");
    }
}
