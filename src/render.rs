// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! End-to-end rendering of a card document.
//!
//! Rendering happens in two steps per card: [`CardRenderer::fetch`] gathers
//! whatever GitHub data the card needs, then [`CardRenderer::render_card`]
//! turns that data into SVG without touching the network. Writing the
//! results to disk is left to the caller.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    config::{CardSpec, CardsDocument},
    error::Error,
    github::{GitHubClient, Repository},
    hero::{HeroOptions, render_hero},
    languages::{LanguagesMeta, render_languages, top_languages},
    layout::{BalanceTuning, TextLayoutEngine},
    pin::render_pin_card,
    slug::SlugStrategy,
    stats::{ProfileTotals, build_metrics, render_stats},
    theme::{LanguageColors, Palette, ThemeCatalog}
};

/// Finished card ready to be written as `<slug>.svg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCard {
    pub slug: String,
    pub svg:  String
}

/// GitHub data fetched for a single card.
#[derive(Debug, Clone, PartialEq)]
pub enum CardData {
    /// The card is fully described by the document.
    Static,
    Repository(Repository),
    Repositories(Vec<Repository>),
    Languages {
        totals:     BTreeMap<String, u64>,
        repos_used: usize
    },
    Profile(ProfileTotals)
}

/// Summary of a render run, serialized for workflow tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderManifest {
    pub cards: Vec<ManifestEntry>
}

/// Manifest line for one rendered card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub slug:  String,
    pub bytes: usize
}

impl RenderManifest {
    /// Builds the manifest for `cards`.
    pub fn from_cards(cards: &[RenderedCard]) -> Self {
        Self {
            cards: cards
                .iter()
                .map(|card| ManifestEntry {
                    slug:  card.slug.clone(),
                    bytes: card.svg.len()
                })
                .collect()
        }
    }

    /// Serializes the manifest as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] when encoding fails.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Renders every card of a [`CardsDocument`].
#[derive(Debug, Clone)]
pub struct CardRenderer {
    client:  GitHubClient,
    catalog: ThemeCatalog,
    colors:  LanguageColors,
    engine:  TextLayoutEngine
}

impl CardRenderer {
    /// Creates a renderer with the bundled themes and language colors.
    pub fn new(client: GitHubClient) -> Self {
        Self {
            client,
            catalog: ThemeCatalog::builtin(),
            colors: LanguageColors::builtin(),
            engine: TextLayoutEngine::new()
        }
    }

    /// Replaces the layout engine.
    #[must_use]
    pub fn with_engine(mut self, engine: TextLayoutEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Fetches and renders every card of `document` in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when a GitHub request fails and
    /// [`Error::Validation`] when two rendered cards end up with the same
    /// slug.
    pub async fn render_document(&self, document: &CardsDocument) -> Result<Vec<RenderedCard>, Error> {
        let now = Utc::now();
        let engine = self.engine_for(document);
        let mut rendered = Vec::new();
        let mut seen = HashSet::new();

        for card in &document.cards {
            debug!("Rendering {} card", card.kind());
            let data = self.fetch(&document.username, card, now).await?;
            for output in self.render_card(document, card, &data, &engine, now)? {
                if !seen.insert(output.slug.clone()) {
                    return Err(Error::validation(format!("duplicate slug detected: {}", output.slug)));
                }
                rendered.push(output);
            }
        }

        info!("Rendered {} cards for {}", rendered.len(), document.username);
        Ok(rendered)
    }

    /// Gathers the GitHub data `card` needs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when a request fails.
    pub async fn fetch(&self, username: &str, card: &CardSpec, now: DateTime<Utc>) -> Result<CardData, Error> {
        match card {
            CardSpec::Hero(_) => Ok(CardData::Static),
            CardSpec::Pin(pin) => {
                let owner = pin.owner.as_deref().unwrap_or(username);
                let repository = self.client.repository(owner, pin.repository.trim()).await?;
                Ok(CardData::Repository(repository))
            }
            CardSpec::Pins(pins) => {
                let repositories = self.client.user_repositories(username, &pins.query()).await?;
                Ok(CardData::Repositories(repositories))
            }
            CardSpec::TopLanguages(languages) => {
                let repositories = self.client.user_repositories(username, &languages.query()).await?;
                let names: Vec<String> = repositories.into_iter().map(|repository| repository.name).collect();
                let totals = self.client.language_totals(username, &names).await?;
                Ok(CardData::Languages {
                    totals,
                    repos_used: names.len()
                })
            }
            CardSpec::Stats(stats) => {
                let repositories = self.client.user_repositories(username, &stats.query()).await?;
                let summary = self.client.contribution_summary(username, now).await?;
                Ok(CardData::Profile(ProfileTotals::from_repositories(&repositories, summary)))
            }
        }
    }

    /// Renders `card` from previously fetched `data`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when `data` does not belong to the card
    /// type or a slug cannot be derived.
    pub fn render_card(
        &self,
        document: &CardsDocument,
        card: &CardSpec,
        data: &CardData,
        engine: &TextLayoutEngine,
        now: DateTime<Utc>
    ) -> Result<Vec<RenderedCard>, Error> {
        let slug = || {
            card.static_slug()
                .ok_or_else(|| Error::validation(format!("{} card has no usable slug", card.kind())))
        };

        match (card, data) {
            (CardSpec::Hero(hero), CardData::Static) => {
                let theme = self.palette(document, hero.theme.as_deref());
                let options = HeroOptions {
                    width: hero.width,
                    style: hero.style
                };
                let svg = render_hero(&hero.content(&document.username), &theme, &options, engine);
                Ok(vec![RenderedCard {
                    slug: slug()?,
                    svg
                }])
            }
            (CardSpec::Pin(pin), CardData::Repository(repository)) => {
                let theme = self.palette(document, pin.theme.as_deref());
                let owner = pin.owner.as_deref().unwrap_or(&document.username);
                let svg = render_pin_card(owner, repository, &theme, &self.colors, &pin.options(), engine);
                Ok(vec![RenderedCard {
                    slug: slug()?,
                    svg
                }])
            }
            (CardSpec::Pins(pins), CardData::Repositories(repositories)) => {
                let dark = self.palette(document, Some(&pins.theme_dark));
                let light = self.palette(document, Some(&pins.theme_light));
                let options = pins.options();
                let colors = &self.colors;
                let variants = [("dark", &dark), ("light", &light)];

                let rendered: Vec<RenderedCard> = repositories
                    .par_iter()
                    .flat_map_iter(|repository| {
                        let options = &options;
                        variants.iter().filter_map(move |(variant, theme)| {
                            let Some(slug) = SlugStrategy::builder(&repository.name)
                                .preserve_case(true)
                                .variant(variant)
                                .build()
                            else {
                                warn!("Skipping repository with unusable name {:?}", repository.name);
                                return None;
                            };
                            Some(RenderedCard {
                                slug,
                                svg: render_pin_card(
                                    &document.username,
                                    repository,
                                    theme,
                                    colors,
                                    options,
                                    engine
                                )
                            })
                        })
                    })
                    .collect();
                info!("Rendered {} pins for {} repositories", rendered.len(), repositories.len());
                Ok(rendered)
            }
            (
                CardSpec::TopLanguages(languages),
                CardData::Languages {
                    totals,
                    repos_used
                }
            ) => {
                let theme = self
                    .palette(document, languages.theme.as_deref())
                    .with_overrides(&languages.overrides);
                let shares = top_languages(totals, &languages.hide, languages.langs_count, &self.colors);
                let meta = LanguagesMeta {
                    username:    document.username.clone(),
                    theme_name:  document.theme_for(languages.theme.as_deref()).to_owned(),
                    repos_used:  *repos_used,
                    hide:        languages.hide.clone(),
                    langs_count: languages.langs_count,
                    updated:     now
                };
                let svg = render_languages(&shares, &theme, &languages.options(), &meta);
                Ok(vec![RenderedCard {
                    slug: slug()?,
                    svg
                }])
            }
            (CardSpec::Stats(stats), CardData::Profile(totals)) => {
                let theme = self.palette(document, stats.theme.as_deref());
                let metrics = build_metrics(totals, &stats.hide);
                let svg = render_stats(&document.username, &metrics, &theme, &stats.hide, totals.repos_counted, now);
                Ok(vec![RenderedCard {
                    slug: slug()?,
                    svg
                }])
            }
            (card, _) => Err(Error::validation(format!(
                "{} card received data fetched for another card type",
                card.kind()
            )))
        }
    }

    fn engine_for(&self, document: &CardsDocument) -> TextLayoutEngine {
        if document.balance_lines && self.engine.balancing().is_none() {
            self.engine.clone().with_balancing(BalanceTuning::default())
        } else {
            self.engine.clone()
        }
    }

    fn palette(&self, document: &CardsDocument, card_theme: Option<&str>) -> Palette {
        let name = document.theme_for(card_theme);
        if !self.catalog.contains(name) {
            debug!("Theme {:?} not found, using fallback", name);
        }
        self.catalog.resolve(name).with_overrides(&document.overrides)
    }
}
