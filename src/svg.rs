// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Markup primitives shared by the card renderers.
//!
//! Every helper returns plain strings; the card modules concatenate them into
//! complete documents. Dynamic text is always passed through
//! [`escape_xml`].

use std::fmt::Write as _;

use crate::{
    format::escape_xml,
    glyph::GlyphWidthModel,
    layout::TextLayoutEngine,
    theme::Palette
};

/// Font stack used by every text element.
pub const FONT_FAMILY: &str = "Segoe UI, Ubuntu, Arial";

/// Font size of chip labels.
pub const CHIP_FONT_SIZE: f64 = 11.0;
/// Height of a chip in pixels.
pub const CHIP_HEIGHT: f64 = 22.0;
const CHIP_PAD_X: f64 = 10.0;
const CHIP_DOT_WIDTH: f64 = 12.0;

/// Colors used to draw a chip.
#[derive(Debug, Clone, Copy)]
pub struct ChipColors<'a> {
    pub fill:   &'a str,
    pub stroke: &'a str,
    pub text:   &'a str
}

/// Rounded label produced by [`chip`].
#[derive(Debug, Clone, PartialEq)]
pub struct Chip {
    /// Rendered width in pixels, rounded up.
    pub width:  f64,
    /// Markup fragment positioned at the requested origin.
    pub markup: String
}

/// Builds a rounded chip at `(x, y)` sized from the label's estimated width.
///
/// When `dot` is provided a small colored circle precedes the label.
pub fn chip<M>(
    engine: &TextLayoutEngine<M>,
    x: f64,
    y: f64,
    text: &str,
    colors: ChipColors<'_>,
    dot: Option<&str>
) -> Chip
where
    M: GlyphWidthModel
{
    let dot_width = if dot.is_some() { CHIP_DOT_WIDTH } else { 0.0 };
    let width = (dot_width + CHIP_PAD_X * 2.0 + engine.width(text, CHIP_FONT_SIZE)).ceil();

    let mut markup = String::with_capacity(256);
    let _ = write!(
        markup,
        "<g><rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{CHIP_HEIGHT}\" rx=\"11\" fill=\"{}\" stroke=\"{}\"/>",
        colors.fill, colors.stroke
    );
    if let Some(color) = dot {
        let _ = write!(
            markup,
            "<circle cx=\"{}\" cy=\"{}\" r=\"5\" fill=\"{color}\"/>",
            x + 10.0,
            y + 11.0
        );
    }
    let _ = write!(
        markup,
        "<text x=\"{}\" y=\"{}\" font-size=\"{CHIP_FONT_SIZE}\" fill=\"{}\" font-family=\"{FONT_FAMILY}\">{}</text></g>",
        x + CHIP_PAD_X + dot_width,
        y + 15.0,
        colors.text,
        escape_xml(text)
    );

    Chip {
        width,
        markup
    }
}

/// Wraps `inner` in an anchor when `url` is non-empty.
pub fn link_wrap(url: &str, inner: &str) -> String {
    if url.is_empty() {
        return inner.to_owned();
    }
    let safe = escape_xml(url);
    format!(
        "<a xlink:href=\"{safe}\" href=\"{safe}\" target=\"_blank\" rel=\"noopener noreferrer\">{inner}</a>"
    )
}

/// Opens an SVG document with the XML prolog and accessibility label.
pub fn document_open(width: f64, height: f64, label: &str, with_xlink: bool) -> String {
    let xlink = if with_xlink {
        " xmlns:xlink=\"http://www.w3.org/1999/xlink\""
    } else {
        ""
    };
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" xmlns=\"http://www.w3.org/2000/svg\"{xlink} role=\"img\" aria-label=\"{}\">\n",
        escape_xml(label)
    )
}

/// Background and border gradients plus the drop shadow filter.
///
/// Defines `bgGrad`, `borderGrad`, and `shadow`. The shadow region is given
/// as `(x%, y%, width%, height%)` so cards can keep it inside their margin.
/// The `<defs>` element is left open for card-specific definitions.
pub fn frame_defs(palette: &Palette, shadow_region: (i32, i32, i32, i32), blur: (u32, u32)) -> String {
    let (x, y, width, height) = shadow_region;
    let (dy, deviation) = blur;
    format!(
        "  <defs>\n    <linearGradient id=\"bgGrad\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"1\">\n      <stop offset=\"0%\" stop-color=\"{}\"/>\n      <stop offset=\"100%\" stop-color=\"{}\"/>\n    </linearGradient>\n    <linearGradient id=\"borderGrad\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"0\">\n      <stop offset=\"0%\" stop-color=\"{}\"/>\n      <stop offset=\"100%\" stop-color=\"{}\"/>\n    </linearGradient>\n    <filter id=\"shadow\" x=\"{x}%\" y=\"{y}%\" width=\"{width}%\" height=\"{height}%\">\n      <feDropShadow dx=\"0\" dy=\"{dy}\" stdDeviation=\"{deviation}\" flood-color=\"{}\"/>\n    </filter>\n",
        palette.bg, palette.bg2, palette.grad1, palette.grad2, palette.shadow
    )
}

/// Single-line `<text>` element with the shared font stack.
pub fn text(x: f64, y: f64, size: f64, fill: &str, extra: &str, content: &str) -> String {
    let extra = if extra.is_empty() {
        String::new()
    } else {
        format!(" {extra}")
    };
    format!(
        "<text x=\"{x}\" y=\"{y}\" font-size=\"{size}\"{extra} fill=\"{fill}\" font-family=\"{FONT_FAMILY}\">{}</text>",
        escape_xml(content)
    )
}
