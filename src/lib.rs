// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Decorative SVG cards for GitHub profile READMEs.
//!
//! A YAML document lists the cards to produce (hero banner, single and
//! automatic repository pins, top languages and profile stats). The library
//! loads and validates that document, fetches the GitHub data each card
//! needs and renders self-contained SVG markup. Text is measured with an
//! average glyph width model and laid out by [`TextLayoutEngine`], which
//! clamps single lines and wraps paragraphs to pixel budgets.

mod config;
mod error;
mod format;
mod github;
mod glyph;
mod hero;
mod languages;
mod layout;
mod pin;
mod render;
mod slug;
mod stats;
mod svg;
mod theme;

pub use config::{
    CardSpec, CardsDocument, DEFAULT_THEME, HeroCard, LanguagesCard, MIN_HERO_WIDTH, PinCard, PinsCard,
    StatsCard, load_cards, parse_cards
};
pub use error::{Error, io_error};
pub use format::{escape_xml, format_compact, parse_list, parse_lower_list, parse_pairs, short_date};
pub use github::{
    ContributionSummary, GitHubClient, LANGUAGE_CONCURRENCY, License, Repository, RepositoryQuery,
    RepositorySort
};
pub use glyph::{AverageGlyphWidth, DEFAULT_GLYPH_FACTOR, GlyphWidthModel};
pub use hero::{DEFAULT_HERO_WIDTH, HeroContent, HeroOptions, LabeledValue, render_hero};
pub use languages::{
    DEFAULT_BORDER_RADIUS, DEFAULT_LANGS_COUNT, LANGUAGES_CARD_WIDTH, LanguageLayout, LanguageShare,
    LanguagesMeta, LanguagesOptions, render_languages, segment_widths, top_languages
};
pub use layout::{BalanceTuning, CLAMP_FLOOR_CHARS, ELLIPSIS, TextLayoutEngine};
pub use pin::{
    PIN_CANVAS_WIDTH, PinOptions, PinSection, PinStat, render_pin_card, title_font_size, visibility_badge
};
pub use render::{CardData, CardRenderer, ManifestEntry, RenderManifest, RenderedCard};
pub use slug::SlugStrategy;
pub use stats::{Metric, MetricKey, ProfileTotals, STATS_CARD_WIDTH, build_metrics, render_stats};
pub use theme::{
    FALLBACK_THEME, HeroPalette, HeroStyle, LanguageColors, Palette, PaletteOverrides, ThemeCatalog, hash_color
};
