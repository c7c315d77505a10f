// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Card document describing which cards to render.
//!
//! The document is YAML. List-valued options accept either a YAML sequence
//! or a comma separated string, so `hide: css,html` and `hide: [css, html]`
//! are equivalent. [`parse_cards`] decodes and validates a document;
//! [`load_cards`] reads it from disk first.

use std::{collections::HashSet, fs, path::Path, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::{
    error::{self, Error},
    format::{parse_list, parse_pairs},
    github::{RepositoryQuery, RepositorySort},
    hero::{DEFAULT_HERO_WIDTH, HeroContent, LabeledValue},
    languages::{DEFAULT_BORDER_RADIUS, DEFAULT_LANGS_COUNT, LanguageLayout, LanguagesOptions},
    pin::{PinOptions, PinSection, PinStat},
    slug::SlugStrategy,
    stats::MetricKey,
    theme::{HeroStyle, PaletteOverrides, ThemeCatalog}
};

/// Theme used when neither the card nor the document names one.
pub const DEFAULT_THEME: &str = "tokyonight";
/// Narrowest hero canvas accepted.
pub const MIN_HERO_WIDTH: f64 = 320.0;

static COLOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#[0-9a-fA-F]{3,8}|(rgb|rgba|hsl|hsla)\([0-9.,%\s]+\)|[a-zA-Z]+)$")
        .expect("color pattern is a valid regex")
});

/// Root card document.
///
/// # Examples
///
/// ```
/// use readme_cards::parse_cards;
///
/// let yaml = r#"
/// username: octocat
/// cards:
///   - type: pin
///     repository: hello-world
///   - type: stats
/// "#;
/// let document = parse_cards(yaml).expect("valid document");
/// assert_eq!(document.cards.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CardsDocument {
    /// GitHub account the cards describe.
    #[serde(alias = "user", alias = "owner")]
    pub username:      String,
    /// Default theme for cards without their own.
    #[serde(default)]
    pub theme:         Option<String>,
    /// Palette overrides applied to every card.
    #[serde(default)]
    pub overrides:     PaletteOverrides,
    /// Rebalances two-line paragraphs whose second line is nearly empty.
    #[serde(default, alias = "balance", alias = "balance-lines", alias = "balanceLines")]
    pub balance_lines: bool,
    /// Cards to render, in order.
    #[serde(default)]
    pub cards:         Vec<CardSpec>
}

impl CardsDocument {
    /// Theme name a card should use.
    pub fn theme_for<'a>(&'a self, card_theme: Option<&'a str>) -> &'a str {
        card_theme
            .or(self.theme.as_deref())
            .map(str::trim)
            .filter(|theme| !theme.is_empty())
            .unwrap_or(DEFAULT_THEME)
    }
}

/// One entry of the `cards` list, selected by its `type` field.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardSpec {
    Hero(HeroCard),
    Pin(PinCard),
    #[serde(alias = "pins_auto", alias = "pins-auto")]
    Pins(PinsCard),
    #[serde(alias = "top_langs", alias = "top-langs", alias = "languages")]
    TopLanguages(LanguagesCard),
    Stats(StatsCard)
}

impl CardSpec {
    /// Short name of the card type used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Hero(_) => "hero",
            Self::Pin(_) => "pin",
            Self::Pins(_) => "pins",
            Self::TopLanguages(_) => "top_languages",
            Self::Stats(_) => "stats"
        }
    }

    /// Slug known before any data is fetched.
    ///
    /// Batch pin cards derive their slugs from the fetched repositories and
    /// return `None`.
    pub fn static_slug(&self) -> Option<String> {
        match self {
            Self::Hero(card) => slug_or(card.slug.as_deref(), "hero"),
            Self::Pin(card) => match card.slug.as_deref() {
                Some(custom) => SlugStrategy::builder(custom).build(),
                None => {
                    let builder = SlugStrategy::builder(&card.repository).preserve_case(true);
                    match card.variant.as_deref() {
                        Some(variant) => builder.variant(variant).build(),
                        None => builder.build()
                    }
                }
            },
            Self::Pins(_) => None,
            Self::TopLanguages(card) => slug_or(card.slug.as_deref(), "top-langs"),
            Self::Stats(card) => slug_or(card.slug.as_deref(), "stats")
        }
    }
}

fn slug_or(custom: Option<&str>, fallback: &str) -> Option<String> {
    SlugStrategy::builder(custom.unwrap_or(fallback)).build()
}

/// Hero banner card.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HeroCard {
    #[serde(default)]
    pub slug:        Option<String>,
    #[serde(default)]
    pub theme:       Option<String>,
    #[serde(default)]
    pub style:       HeroStyle,
    #[serde(default = "default_hero_width")]
    pub width:       f64,
    /// Display name; the document username when empty.
    #[serde(default)]
    pub title:       String,
    #[serde(default)]
    pub tagline:     String,
    #[serde(default, alias = "desc")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_text_list")]
    pub badges:      Vec<String>,
    #[serde(default, deserialize_with = "deserialize_text_list")]
    pub points:      Vec<String>,
    #[serde(default, deserialize_with = "deserialize_pairs")]
    pub stats:       Vec<LabeledValue>,
    #[serde(default, alias = "cta-text", alias = "ctaText")]
    pub cta_text:    String,
    #[serde(default, alias = "cta-url", alias = "ctaUrl")]
    pub cta_url:     String,
    #[serde(default, deserialize_with = "deserialize_pairs")]
    pub links:       Vec<LabeledValue>,
    #[serde(default, alias = "right-note", alias = "rightNote")]
    pub right_note:  String
}

impl HeroCard {
    /// Banner content with the title defaulting to `username`.
    pub fn content(&self, username: &str) -> HeroContent {
        let title = if self.title.trim().is_empty() {
            username.to_owned()
        } else {
            self.title.clone()
        };
        HeroContent {
            title,
            tagline: self.tagline.clone(),
            description: self.description.clone(),
            badges: self.badges.clone(),
            points: self.points.clone(),
            stats: self.stats.clone(),
            cta_text: self.cta_text.clone(),
            cta_url: self.cta_url.clone(),
            links: self.links.clone(),
            right_note: self.right_note.clone()
        }
    }
}

/// Single repository pin.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PinCard {
    #[serde(default)]
    pub slug:       Option<String>,
    #[serde(default, alias = "repo")]
    pub repository: String,
    /// Repository owner; the document username when absent.
    #[serde(default)]
    pub owner:      Option<String>,
    #[serde(default)]
    pub theme:      Option<String>,
    /// Suffix appended to the derived slug, e.g. `dark`.
    #[serde(default)]
    pub variant:    Option<String>,
    #[serde(default = "default_pin_show", deserialize_with = "deserialize_keyword_list")]
    pub show:       Vec<PinStat>,
    #[serde(default, deserialize_with = "deserialize_keyword_list")]
    pub hide:       Vec<PinSection>
}

impl PinCard {
    /// Display selection for the renderer.
    pub fn options(&self) -> PinOptions {
        PinOptions {
            show: self.show.clone(),
            hide: self.hide.clone()
        }
    }
}

/// Dark and light pins for every repository of the user.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PinsCard {
    #[serde(default = "default_dark_theme", alias = "theme-dark", alias = "themeDark")]
    pub theme_dark:    String,
    #[serde(default = "default_light_theme", alias = "theme-light", alias = "themeLight")]
    pub theme_light:   String,
    #[serde(default = "default_pins_max_repos", alias = "max-repos", alias = "maxRepos")]
    pub max_repos:     usize,
    #[serde(default, alias = "include-forks", alias = "includeForks")]
    pub include_forks: bool,
    #[serde(default, alias = "exclude_repo", deserialize_with = "deserialize_lower_list")]
    pub exclude:       Vec<String>,
    #[serde(default)]
    pub sort:          RepositorySort,
    #[serde(default = "default_pins_show", deserialize_with = "deserialize_keyword_list")]
    pub show:          Vec<PinStat>,
    #[serde(default, deserialize_with = "deserialize_keyword_list")]
    pub hide:          Vec<PinSection>
}

impl PinsCard {
    /// Repository listing filters.
    pub fn query(&self) -> RepositoryQuery {
        RepositoryQuery {
            sort:          self.sort,
            include_forks: self.include_forks,
            exclude:       self.exclude.iter().cloned().collect(),
            max_repos:     self.max_repos
        }
    }

    /// Display selection shared by every pin of the batch.
    pub fn options(&self) -> PinOptions {
        PinOptions {
            show: self.show.clone(),
            hide: self.hide.clone()
        }
    }
}

/// Top languages card.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LanguagesCard {
    #[serde(default)]
    pub slug:          Option<String>,
    #[serde(default)]
    pub theme:         Option<String>,
    /// Palette overrides layered on top of the document overrides.
    #[serde(default)]
    pub overrides:     PaletteOverrides,
    #[serde(default = "default_hidden_languages", deserialize_with = "deserialize_lower_list")]
    pub hide:          Vec<String>,
    #[serde(default = "default_langs_count", alias = "langs-count", alias = "langsCount")]
    pub langs_count:   usize,
    #[serde(default = "default_languages_max_repos", alias = "max-repos", alias = "maxRepos")]
    pub max_repos:     usize,
    #[serde(default, alias = "include-forks", alias = "includeForks")]
    pub include_forks: bool,
    #[serde(default, alias = "exclude_repo", deserialize_with = "deserialize_lower_list")]
    pub exclude:       Vec<String>,
    #[serde(default)]
    pub layout:        LanguageLayout,
    #[serde(default = "default_true")]
    pub stacked:       bool,
    #[serde(default = "default_true", alias = "dots", alias = "show-icons", alias = "showIcons")]
    pub show_icons:    bool,
    #[serde(default, alias = "hide-title", alias = "hideTitle")]
    pub hide_title:    bool,
    #[serde(default, alias = "hide-footer", alias = "hideFooter")]
    pub hide_footer:   bool,
    #[serde(default, alias = "hide-border", alias = "hideBorder")]
    pub hide_border:   bool,
    #[serde(
        default = "default_border_radius",
        alias = "border-radius",
        alias = "borderRadius",
        deserialize_with = "deserialize_border_radius"
    )]
    pub border_radius: u8,
    #[serde(default)]
    pub title:         Option<String>
}

impl LanguagesCard {
    /// Repository listing filters, most recently pushed first.
    pub fn query(&self) -> RepositoryQuery {
        RepositoryQuery {
            sort:          RepositorySort::Pushed,
            include_forks: self.include_forks,
            exclude:       self.exclude.iter().cloned().collect(),
            max_repos:     self.max_repos
        }
    }

    /// Presentation switches for the renderer.
    pub fn options(&self) -> LanguagesOptions {
        LanguagesOptions {
            layout:        self.layout,
            stacked:       self.stacked,
            show_icons:    self.show_icons,
            hide_title:    self.hide_title,
            hide_footer:   self.hide_footer,
            hide_border:   self.hide_border,
            border_radius: self.border_radius,
            title:         self.title.clone()
        }
    }
}

/// Profile statistics card.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StatsCard {
    #[serde(default)]
    pub slug:          Option<String>,
    #[serde(default)]
    pub theme:         Option<String>,
    #[serde(default, deserialize_with = "deserialize_keyword_list")]
    pub hide:          Vec<MetricKey>,
    #[serde(default = "default_stats_max_repos", alias = "max-repos", alias = "maxRepos")]
    pub max_repos:     usize,
    #[serde(default, alias = "include-forks", alias = "includeForks")]
    pub include_forks: bool
}

impl StatsCard {
    /// Repository listing filters used for star and fork totals.
    pub fn query(&self) -> RepositoryQuery {
        RepositoryQuery {
            sort:          RepositorySort::Updated,
            include_forks: self.include_forks,
            exclude:       Default::default(),
            max_repos:     self.max_repos
        }
    }
}

fn default_hero_width() -> f64 {
    DEFAULT_HERO_WIDTH
}

fn default_pin_show() -> Vec<PinStat> {
    PinStat::ALL.to_vec()
}

fn default_pins_show() -> Vec<PinStat> {
    vec![
        PinStat::Stars,
        PinStat::Forks,
        PinStat::Issues,
        PinStat::Language,
        PinStat::License,
        PinStat::Topics,
        PinStat::Updated,
    ]
}

fn default_dark_theme() -> String {
    "tokyonight".to_owned()
}

fn default_light_theme() -> String {
    "solarized-light".to_owned()
}

fn default_pins_max_repos() -> usize {
    100
}

fn default_hidden_languages() -> Vec<String> {
    vec!["css".to_owned()]
}

fn default_langs_count() -> usize {
    DEFAULT_LANGS_COUNT
}

fn default_languages_max_repos() -> usize {
    40
}

fn default_stats_max_repos() -> usize {
    100
}

fn default_border_radius() -> u8 {
    DEFAULT_BORDER_RADIUS
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListInput {
    Many(Vec<String>),
    Csv(String)
}

impl ListInput {
    fn into_entries(self) -> Vec<String> {
        match self {
            Self::Many(entries) => entries
                .into_iter()
                .map(|entry| entry.trim().to_owned())
                .filter(|entry| !entry.is_empty())
                .collect(),
            Self::Csv(value) => parse_list(&value)
        }
    }
}

fn deserialize_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>
{
    Ok(ListInput::deserialize(deserializer)?.into_entries())
}

fn deserialize_lower_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>
{
    Ok(ListInput::deserialize(deserializer)?
        .into_entries()
        .into_iter()
        .map(|entry| entry.to_lowercase())
        .collect())
}

fn deserialize_keyword_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned
{
    ListInput::deserialize(deserializer)?
        .into_entries()
        .into_iter()
        .map(|entry| {
            let keyword = entry.to_lowercase();
            T::deserialize(serde::de::value::StrDeserializer::<D::Error>::new(&keyword))
        })
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PairsInput {
    Many(Vec<LabeledValue>),
    Csv(String)
}

fn deserialize_pairs<'de, D>(deserializer: D) -> Result<Vec<LabeledValue>, D::Error>
where
    D: Deserializer<'de>
{
    Ok(match PairsInput::deserialize(deserializer)? {
        PairsInput::Many(pairs) => pairs,
        PairsInput::Csv(value) => parse_pairs(&value)
            .into_iter()
            .map(|(label, value)| LabeledValue {
                label,
                value
            })
            .collect()
    })
}

fn deserialize_border_radius<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>
{
    let radius = u8::deserialize(deserializer)?;
    if radius > 32 {
        return Err(serde::de::Error::custom("border_radius must not exceed 32"));
    }
    Ok(radius)
}

/// Loads and validates a card document from `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, plus every error
/// [`parse_cards`] can produce.
pub fn load_cards(path: &Path) -> Result<CardsDocument, Error> {
    let contents = fs::read_to_string(path).map_err(|source| error::io_error(path, source))?;
    parse_cards(&contents)
}

/// Parses and validates a card document.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the YAML cannot be decoded and
/// [`Error::Validation`] when the document breaks a rule: no cards, blank
/// username, pin without repository, zero counts, hero narrower than
/// [`MIN_HERO_WIDTH`], malformed colors, unusable or duplicate slugs.
pub fn parse_cards(contents: &str) -> Result<CardsDocument, Error> {
    let document: CardsDocument = serde_yaml::from_str(contents)?;
    validate_document(&document)?;
    Ok(document)
}

fn validate_document(document: &CardsDocument) -> Result<(), Error> {
    if document.cards.is_empty() {
        return Err(Error::validation("card document must include at least one card"));
    }
    if document.username.trim().is_empty() {
        return Err(Error::validation("username must not be empty"));
    }

    validate_overrides("overrides", &document.overrides)?;

    let catalog = ThemeCatalog::builtin();
    let mut seen_slugs = HashSet::with_capacity(document.cards.len());

    for (index, card) in document.cards.iter().enumerate() {
        let position = format!("cards[{index}] ({})", card.kind());
        match card {
            CardSpec::Hero(hero) => {
                if hero.width.is_nan() || hero.width < MIN_HERO_WIDTH {
                    return Err(Error::validation(format!(
                        "{position}: width must be at least {MIN_HERO_WIDTH}"
                    )));
                }
                warn_unknown_theme(&catalog, &position, hero.theme.as_deref());
            }
            CardSpec::Pin(pin) => {
                if pin.repository.trim().is_empty() {
                    return Err(Error::validation(format!("{position}: repository is required")));
                }
                warn_unknown_theme(&catalog, &position, pin.theme.as_deref());
            }
            CardSpec::Pins(pins) => {
                require_positive(&position, "max_repos", pins.max_repos)?;
                warn_unknown_theme(&catalog, &position, Some(&pins.theme_dark));
                warn_unknown_theme(&catalog, &position, Some(&pins.theme_light));
            }
            CardSpec::TopLanguages(languages) => {
                require_positive(&position, "langs_count", languages.langs_count)?;
                require_positive(&position, "max_repos", languages.max_repos)?;
                validate_overrides(&position, &languages.overrides)?;
                warn_unknown_theme(&catalog, &position, languages.theme.as_deref());
            }
            CardSpec::Stats(stats) => {
                require_positive(&position, "max_repos", stats.max_repos)?;
                warn_unknown_theme(&catalog, &position, stats.theme.as_deref());
            }
        }

        if matches!(card, CardSpec::Pins(_)) {
            continue;
        }
        let slug = card
            .static_slug()
            .ok_or_else(|| Error::validation(format!("{position}: slug has no usable characters")))?;
        if !seen_slugs.insert(slug.clone()) {
            return Err(Error::validation(format!("duplicate slug detected: {slug}")));
        }
    }

    warn_unknown_theme(&catalog, "document", document.theme.as_deref());
    Ok(())
}

fn require_positive(position: &str, field: &str, value: usize) -> Result<(), Error> {
    if value == 0 {
        return Err(Error::validation(format!("{position}: {field} must be greater than zero")));
    }
    Ok(())
}

fn validate_overrides(position: &str, overrides: &PaletteOverrides) -> Result<(), Error> {
    for (field, value) in overrides.values() {
        if !COLOR_PATTERN.is_match(value.trim()) {
            return Err(Error::validation(format!(
                "{position}: override {field} has invalid color {value:?}"
            )));
        }
    }
    Ok(())
}

fn warn_unknown_theme(catalog: &ThemeCatalog, position: &str, theme: Option<&str>) {
    if let Some(theme) = theme
        && !catalog.contains(theme.trim())
    {
        warn!("{}: unknown theme {:?}, falling back to the default palette", position, theme);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn expect_validation(yaml: &str, fragment: &str) {
        match parse_cards(yaml) {
            Err(Error::Validation {
                message
            }) => assert!(message.contains(fragment), "unexpected message: {message}"),
            other => panic!("expected validation error containing {fragment:?}, got {other:?}")
        }
    }

    #[test]
    fn parses_every_card_type_with_defaults() {
        let yaml = r##"
username: octocat
theme: dracula
overrides:
  bg: "#000000"
cards:
  - type: hero
    title: The Octocat
    badges: Open for freelance, Remote
    stats: "Projects|25+,Response|<24h"
  - type: pin
    repo: hello-world
  - type: pins
  - type: top-langs
    hide: [CSS, Html]
  - type: stats
    hide: prs,contrib_to
"##;
        let document = parse_cards(yaml).expect("valid document");
        assert_eq!(document.cards.len(), 5);
        assert_eq!(document.theme_for(None), "dracula");
        assert!(!document.balance_lines);

        let CardSpec::Hero(hero) = &document.cards[0] else {
            panic!("expected hero card");
        };
        assert_eq!(hero.width, DEFAULT_HERO_WIDTH);
        assert_eq!(hero.style, HeroStyle::Clean);
        assert_eq!(hero.badges, vec!["Open for freelance", "Remote"]);
        assert_eq!(hero.stats[1].value, "<24h");

        let CardSpec::Pin(pin) = &document.cards[1] else {
            panic!("expected pin card");
        };
        assert_eq!(pin.show, PinStat::ALL.to_vec());
        assert_eq!(document.cards[1].static_slug().as_deref(), Some("hello-world"));

        let CardSpec::Pins(pins) = &document.cards[2] else {
            panic!("expected pins card");
        };
        assert_eq!(pins.theme_dark, "tokyonight");
        assert_eq!(pins.theme_light, "solarized-light");
        assert!(!pins.show.contains(&PinStat::Watchers));

        let CardSpec::TopLanguages(languages) = &document.cards[3] else {
            panic!("expected languages card");
        };
        assert_eq!(languages.hide, vec!["css", "html"]);
        assert_eq!(languages.langs_count, DEFAULT_LANGS_COUNT);
        assert_eq!(languages.border_radius, DEFAULT_BORDER_RADIUS);
        assert!(languages.stacked);

        let CardSpec::Stats(stats) = &document.cards[4] else {
            panic!("expected stats card");
        };
        assert_eq!(stats.hide, vec![MetricKey::Prs, MetricKey::ContribTo]);
    }

    #[test]
    fn languages_hide_defaults_to_css() {
        let document = parse_cards("username: a\ncards:\n  - type: top_languages\n").expect("valid document");
        let CardSpec::TopLanguages(languages) = &document.cards[0] else {
            panic!("expected languages card");
        };
        assert_eq!(languages.hide, vec!["css"]);
        assert_eq!(languages.query().sort, RepositorySort::Pushed);
    }

    #[test]
    fn pin_keywords_are_case_insensitive() {
        let yaml = "username: a\ncards:\n  - type: pin\n    repository: r\n    show: Stars, LANGUAGE\n    hide: [Description, footer]\n";
        let document = parse_cards(yaml).expect("valid document");
        let CardSpec::Pin(pin) = &document.cards[0] else {
            panic!("expected pin card");
        };
        assert_eq!(pin.show, vec![PinStat::Stars, PinStat::Language]);
        assert_eq!(pin.hide, vec![PinSection::Desc, PinSection::Footer]);
    }

    #[test]
    fn unknown_keyword_is_a_parse_error() {
        let yaml = "username: a\ncards:\n  - type: pin\n    repository: r\n    show: [sparkles]\n";
        assert!(matches!(parse_cards(yaml), Err(Error::Parse { .. })));
    }

    #[test]
    fn border_radius_is_bounded() {
        let yaml = "username: a\ncards:\n  - type: top_languages\n    border_radius: 40\n";
        assert!(matches!(parse_cards(yaml), Err(Error::Parse { .. })));
    }

    #[test]
    fn rejects_empty_card_list() {
        expect_validation("username: octocat\ncards: []\n", "at least one card");
    }

    #[test]
    fn rejects_blank_username() {
        expect_validation("username: '  '\ncards:\n  - type: stats\n", "username");
    }

    #[test]
    fn rejects_pin_without_repository() {
        expect_validation("username: a\ncards:\n  - type: pin\n", "repository is required");
    }

    #[test]
    fn rejects_zero_counts() {
        expect_validation(
            "username: a\ncards:\n  - type: top_languages\n    langs_count: 0\n",
            "langs_count"
        );
        expect_validation("username: a\ncards:\n  - type: pins\n    max_repos: 0\n", "max_repos");
    }

    #[test]
    fn rejects_narrow_hero() {
        expect_validation("username: a\ncards:\n  - type: hero\n    width: 200\n", "width");
    }

    #[test]
    fn rejects_duplicate_slugs() {
        let yaml = "username: a\ncards:\n  - type: stats\n  - type: hero\n    slug: Stats\n";
        expect_validation(yaml, "duplicate slug detected: stats");
    }

    #[test]
    fn pin_variants_keep_slugs_unique() {
        let yaml = "username: a\ncards:\n  - type: pin\n    repository: R\n    variant: dark\n  - type: pin\n    repository: R\n    variant: light\n";
        let document = parse_cards(yaml).expect("valid document");
        assert_eq!(document.cards[0].static_slug().as_deref(), Some("R.dark"));
    }

    #[test]
    fn rejects_malformed_override_colors() {
        let yaml = "username: a\noverrides:\n  title: 'url(javascript:1)'\ncards:\n  - type: stats\n";
        expect_validation(yaml, "override title");
        let yaml = "username: a\ncards:\n  - type: top_languages\n    overrides:\n      bg: 'rgba(0,0,0,0.5)'\n      bg2: none\n      accent: '#abc'\n";
        assert!(parse_cards(yaml).is_ok());
    }

    #[test]
    fn color_pattern_is_shared_across_documents() {
        for accepted in ["#fff", "#1a1b26cc", "rgba(0, 0, 0, 0.4)", "hsl(210 72% 52%)", "none"] {
            assert!(COLOR_PATTERN.is_match(accepted), "rejected {accepted}");
        }
        for rejected in ["#12", "url(#grad)", "red;stroke:blue", ""] {
            assert!(!COLOR_PATTERN.is_match(rejected), "accepted {rejected}");
        }

        let yaml = "username: a\noverrides:\n  accent: '#abc'\ncards:\n  - type: stats\n";
        assert!(parse_cards(yaml).is_ok());
        assert!(parse_cards(yaml).is_ok());
    }

    #[test]
    fn hero_content_defaults_title_to_username() {
        let document = parse_cards("username: octocat\ncards:\n  - type: hero\n").expect("valid document");
        let CardSpec::Hero(hero) = &document.cards[0] else {
            panic!("expected hero card");
        };
        assert_eq!(hero.content(&document.username).title, "octocat");
    }

    #[test]
    fn load_cards_reads_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "username: octocat\nbalance: true\ncards:\n  - type: stats").expect("write document");
        let document = load_cards(file.path()).expect("document loads");
        assert!(document.balance_lines);
        assert_eq!(document.theme_for(Some("gruvbox")), "gruvbox");
    }

    #[test]
    fn load_cards_reports_missing_file() {
        let directory = tempfile::tempdir().expect("temp dir");
        let missing = directory.path().join("missing.yaml");
        assert!(matches!(load_cards(&missing), Err(Error::Io { .. })));
    }
}
