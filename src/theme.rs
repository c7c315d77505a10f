// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Color palettes shared by every card renderer.
//!
//! Palettes live in an immutable [`ThemeCatalog`] that is built once and
//! handed to the renderers. Language dots use [`LanguageColors`], which knows
//! the common linguist colors and derives a stable hue for anything else.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Theme used when a requested name is unknown.
pub const FALLBACK_THEME: &str = "blue-green";

/// Complete set of colors consumed by card renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// Primary background, or `none` for a transparent card.
    pub bg:      String,
    /// Second background gradient stop.
    pub bg2:     String,
    /// Heading color.
    pub title:   String,
    /// Body text color.
    pub text:    String,
    /// Secondary text color.
    pub muted:   String,
    /// Card border color.
    pub border:  String,
    /// Progress track and divider color.
    pub track:   String,
    /// Chip background.
    pub chip_bg: String,
    /// Highlight color for icons and accents.
    pub accent:  String,
    /// Drop shadow flood color.
    pub shadow:  String,
    /// First border gradient stop.
    pub grad1:   String,
    /// Second border gradient stop.
    pub grad2:   String
}

impl Palette {
    #[allow(clippy::too_many_arguments)]
    fn from_parts(
        bg: &str,
        bg2: &str,
        title: &str,
        text: &str,
        muted: &str,
        border: &str,
        track: &str,
        chip_bg: &str,
        accent: &str,
        shadow: &str,
        grad1: &str,
        grad2: &str
    ) -> Self {
        Self {
            bg:      bg.to_owned(),
            bg2:     bg2.to_owned(),
            title:   title.to_owned(),
            text:    text.to_owned(),
            muted:   muted.to_owned(),
            border:  border.to_owned(),
            track:   track.to_owned(),
            chip_bg: chip_bg.to_owned(),
            accent:  accent.to_owned(),
            shadow:  shadow.to_owned(),
            grad1:   grad1.to_owned(),
            grad2:   grad2.to_owned()
        }
    }

    /// Returns `true` when the card background should be left transparent.
    pub fn is_transparent(&self) -> bool {
        self.bg == "none"
    }

    /// Returns a copy of the palette with the provided overrides applied.
    #[must_use]
    pub fn with_overrides(&self, overrides: &PaletteOverrides) -> Self {
        let pick = |value: &Option<String>, current: &String| {
            value.clone().unwrap_or_else(|| current.clone())
        };
        Self {
            bg:      pick(&overrides.bg, &self.bg),
            bg2:     pick(&overrides.bg2, &self.bg2),
            title:   pick(&overrides.title, &self.title),
            text:    pick(&overrides.text, &self.text),
            muted:   pick(&overrides.muted, &self.muted),
            border:  pick(&overrides.border, &self.border),
            track:   pick(&overrides.track, &self.track),
            chip_bg: pick(&overrides.chip_bg, &self.chip_bg),
            accent:  pick(&overrides.accent, &self.accent),
            shadow:  pick(&overrides.shadow, &self.shadow),
            grad1:   pick(&overrides.grad1, &self.grad1),
            grad2:   pick(&overrides.grad2, &self.grad2)
        }
    }
}

/// Optional per-field palette overrides supplied by the card document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaletteOverrides {
    #[serde(default)]
    pub bg:      Option<String>,
    #[serde(default)]
    pub bg2:     Option<String>,
    #[serde(default)]
    pub title:   Option<String>,
    #[serde(default)]
    pub text:    Option<String>,
    #[serde(default)]
    pub muted:   Option<String>,
    #[serde(default)]
    pub border:  Option<String>,
    #[serde(default)]
    pub track:   Option<String>,
    #[serde(default, alias = "chipBg", alias = "chip-bg")]
    pub chip_bg: Option<String>,
    #[serde(default)]
    pub accent:  Option<String>,
    #[serde(default)]
    pub shadow:  Option<String>,
    #[serde(default)]
    pub grad1:   Option<String>,
    #[serde(default)]
    pub grad2:   Option<String>
}

impl PaletteOverrides {
    /// Iterates over `(field, value)` pairs that are set.
    pub fn values(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("bg", &self.bg),
            ("bg2", &self.bg2),
            ("title", &self.title),
            ("text", &self.text),
            ("muted", &self.muted),
            ("border", &self.border),
            ("track", &self.track),
            ("chip_bg", &self.chip_bg),
            ("accent", &self.accent),
            ("shadow", &self.shadow),
            ("grad1", &self.grad1),
            ("grad2", &self.grad2)
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
    }
}

/// Immutable table of named palettes.
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes:   BTreeMap<String, Palette>,
    fallback: Palette
}

impl ThemeCatalog {
    /// Builds the catalog of bundled themes.
    ///
    /// # Examples
    ///
    /// ```
    /// use readme_cards::ThemeCatalog;
    ///
    /// let catalog = ThemeCatalog::builtin();
    /// assert_eq!(catalog.resolve("dracula").bg, "#282a36");
    /// assert_eq!(catalog.resolve("missing").bg, "#040f0f");
    /// ```
    pub fn builtin() -> Self {
        let mut themes = BTreeMap::new();
        let mut insert = |name: &str, palette: Palette| {
            themes.insert(name.to_owned(), palette);
        };

        let blue_green = Palette::from_parts(
            "#040f0f",
            "#061a1a",
            "#2f97c1",
            "#0cf574",
            "rgba(12,245,116,0.75)",
            "rgba(12,245,116,0.22)",
            "rgba(255,255,255,0.10)",
            "rgba(255,255,255,0.07)",
            "#f5b700",
            "rgba(0,0,0,0.30)",
            "#2f97c1",
            "#0cf574"
        );
        insert(FALLBACK_THEME, blue_green.clone());
        insert(
            "solarized-light",
            Palette::from_parts(
                "#fdf6e3",
                "#fffdf6",
                "#268bd2",
                "#586e75",
                "rgba(88,110,117,0.75)",
                "rgba(88,110,117,0.25)",
                "rgba(0,0,0,0.10)",
                "rgba(0,0,0,0.05)",
                "#b58900",
                "rgba(0,0,0,0.18)",
                "#268bd2",
                "#b58900"
            )
        );
        insert(
            "dracula",
            Palette::from_parts(
                "#282a36",
                "#1f2230",
                "#bd93f9",
                "#f8f8f2",
                "rgba(248,248,242,0.75)",
                "rgba(189,147,249,0.28)",
                "rgba(255,255,255,0.12)",
                "rgba(255,255,255,0.08)",
                "#ffb86c",
                "rgba(0,0,0,0.35)",
                "#bd93f9",
                "#ff79c6"
            )
        );
        let tokyonight = Palette::from_parts(
            "#1a1b26",
            "#141524",
            "#7aa2f7",
            "#c0caf5",
            "rgba(192,202,245,0.70)",
            "rgba(122,162,247,0.28)",
            "rgba(255,255,255,0.12)",
            "rgba(255,255,255,0.08)",
            "#9ece6a",
            "rgba(0,0,0,0.40)",
            "#7aa2f7",
            "#9ece6a"
        );
        insert("tokyo-night", tokyonight.clone());
        insert("tokyonight", tokyonight);
        insert(
            "radical",
            Palette::from_parts(
                "#141321",
                "#0f0e18",
                "#fe428e",
                "#a9fef7",
                "rgba(169,254,247,0.70)",
                "rgba(254,66,142,0.25)",
                "rgba(255,255,255,0.12)",
                "rgba(255,255,255,0.08)",
                "#f8d847",
                "rgba(0,0,0,0.42)",
                "#fe428e",
                "#a9fef7"
            )
        );
        insert(
            "gruvbox",
            Palette::from_parts(
                "#282828",
                "#1f1f1f",
                "#fabd2f",
                "#ebdbb2",
                "rgba(235,219,178,0.70)",
                "rgba(250,189,47,0.25)",
                "rgba(255,255,255,0.12)",
                "rgba(255,255,255,0.08)",
                "#fe8019",
                "rgba(0,0,0,0.42)",
                "#fabd2f",
                "#fe8019"
            )
        );
        insert(
            "onedark",
            Palette::from_parts(
                "#282c34",
                "#282c34",
                "#61afef",
                "#abb2bf",
                "rgba(171,178,191,0.70)",
                "rgba(97,175,239,0.25)",
                "rgba(255,255,255,0.10)",
                "rgba(255,255,255,0.07)",
                "#98c379",
                "rgba(0,0,0,0.35)",
                "#61afef",
                "#98c379"
            )
        );
        insert(
            "highcontrast",
            Palette::from_parts(
                "#000000",
                "#000000",
                "#ffffff",
                "#ffffff",
                "rgba(255,255,255,0.75)",
                "rgba(255,255,255,0.35)",
                "rgba(255,255,255,0.15)",
                "rgba(255,255,255,0.10)",
                "#ffd700",
                "rgba(0,0,0,0.55)",
                "#ffffff",
                "#ffd700"
            )
        );
        insert(
            "transparent",
            Palette::from_parts(
                "none",
                "none",
                "#2f80ed",
                "#434d58",
                "rgba(67,77,88,0.70)",
                "rgba(67,77,88,0.25)",
                "rgba(0,0,0,0.08)",
                "rgba(0,0,0,0.05)",
                "#f5b700",
                "rgba(0,0,0,0.20)",
                "#2f80ed",
                "#f5b700"
            )
        );

        Self {
            themes,
            fallback: blue_green
        }
    }

    /// Returns the palette registered under `name`, or the fallback theme.
    pub fn resolve(&self, name: &str) -> &Palette {
        self.themes.get(name).unwrap_or(&self.fallback)
    }

    /// Returns `true` when `name` is a registered theme.
    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// Iterates over registered theme names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Visual preset for the hero banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroStyle {
    /// Dark slate look with sky and violet accents.
    #[default]
    Clean,
    /// Light variant of [`HeroStyle::Clean`].
    #[serde(alias = "clean-light", alias = "clean_light")]
    CleanLight,
    /// Uses the selected theme as-is.
    #[serde(alias = "default")]
    Theme
}

/// Palette extended with the tokens only the hero banner needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroPalette {
    /// Base card colors.
    pub base:        Palette,
    /// Background of stat and link pills.
    pub pill_bg:     String,
    /// Stroke of pills and chips.
    pub pill_stroke: String,
    /// Label color on the call-to-action button.
    pub button_text: String,
    /// Check mark color on feature points.
    pub ok_text:     String
}

impl HeroStyle {
    /// Derives the hero palette from a resolved theme palette.
    pub fn apply(self, theme: &Palette) -> HeroPalette {
        match self {
            Self::Clean => HeroPalette {
                base:        Palette::from_parts(
                    "#0b1220",
                    "#070b16",
                    "#e6edf3",
                    "rgba(230,237,243,0.92)",
                    "rgba(230,237,243,0.70)",
                    "rgba(56,189,248,0.22)",
                    "rgba(255,255,255,0.10)",
                    "rgba(255,255,255,0.06)",
                    "#38bdf8",
                    "rgba(0,0,0,0.38)",
                    "#38bdf8",
                    "#a78bfa"
                ),
                pill_bg:     "rgba(255,255,255,0.05)".to_owned(),
                pill_stroke: "rgba(255,255,255,0.06)".to_owned(),
                button_text: "#06101c".to_owned(),
                ok_text:     "#06101c".to_owned()
            },
            Self::CleanLight => HeroPalette {
                base:        Palette::from_parts(
                    "#f8fafc",
                    "#eef2ff",
                    "#0f172a",
                    "rgba(15,23,42,0.92)",
                    "rgba(15,23,42,0.68)",
                    "rgba(37,99,235,0.20)",
                    "rgba(15,23,42,0.10)",
                    "rgba(15,23,42,0.06)",
                    "#2563eb",
                    "rgba(2,6,23,0.18)",
                    "#2563eb",
                    "#7c3aed"
                ),
                pill_bg:     "rgba(15,23,42,0.04)".to_owned(),
                pill_stroke: "rgba(15,23,42,0.06)".to_owned(),
                button_text: "#ffffff".to_owned(),
                ok_text:     "#ffffff".to_owned()
            },
            Self::Theme => HeroPalette {
                base:        theme.clone(),
                pill_bg:     "rgba(255,255,255,0.06)".to_owned(),
                pill_stroke: "rgba(255,255,255,0.06)".to_owned(),
                button_text: theme.bg.clone(),
                ok_text:     theme.bg.clone()
            }
        }
    }
}

/// Mapping from language name to dot color with a hashed fallback.
#[derive(Debug, Clone)]
pub struct LanguageColors {
    known: BTreeMap<String, String>
}

impl LanguageColors {
    /// Builds the table of well-known linguist colors.
    pub fn builtin() -> Self {
        let known = [
            ("JavaScript", "#f1e05a"),
            ("TypeScript", "#3178c6"),
            ("HTML", "#e34c26"),
            ("CSS", "#563d7c"),
            ("Python", "#3572A5"),
            ("Java", "#b07219"),
            ("C++", "#f34b7d"),
            ("C", "#555555"),
            ("C#", "#178600"),
            ("PHP", "#4F5D95"),
            ("Go", "#00ADD8"),
            ("Rust", "#dea584"),
            ("Kotlin", "#A97BFF"),
            ("Swift", "#F05138"),
            ("Shell", "#89e051"),
            ("Vue", "#41b883"),
            ("Pascal", "#E3F171")
        ]
        .into_iter()
        .map(|(name, color)| (name.to_owned(), color.to_owned()))
        .collect();

        Self {
            known
        }
    }

    /// Returns the color for `language`.
    ///
    /// Unknown names map to a deterministic `hsl()` hue so the same language
    /// always gets the same dot.
    ///
    /// # Examples
    ///
    /// ```
    /// use readme_cards::LanguageColors;
    ///
    /// let colors = LanguageColors::builtin();
    /// assert_eq!(colors.color("Rust"), "#dea584");
    /// assert_eq!(colors.color("Zig"), colors.color("Zig"));
    /// assert!(colors.color("Zig").starts_with("hsl("));
    /// ```
    pub fn color(&self, language: &str) -> String {
        match self.known.get(language) {
            Some(color) => color.clone(),
            None if language.is_empty() => hash_color("lang"),
            None => hash_color(language)
        }
    }
}

impl Default for LanguageColors {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Derives a stable `hsl()` color from UTF-16 code units of `value`.
pub fn hash_color(value: &str) -> String {
    let hash = value
        .encode_utf16()
        .fold(0u32, |hash, unit| hash.wrapping_mul(31).wrapping_add(u32::from(unit)));
    format!("hsl({} 72% 52%)", hash % 360)
}
