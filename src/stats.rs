// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Profile statistics card.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    github::{ContributionSummary, Repository},
    svg,
    theme::Palette
};

/// Width of the stats card.
pub const STATS_CARD_WIDTH: f64 = 495.0;

const PAD: f64 = 16.0;
const HEADER_HEIGHT: f64 = 52.0;
const COLUMNS: usize = 2;
const GAP: f64 = 12.0;
const ROW_HEIGHT: f64 = 44.0;

/// Identifiers of the metrics the card can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Stars,
    Forks,
    Followers,
    Repos,
    Commits,
    Prs,
    Issues,
    Reviews,
    Contrib,
    ContribTo
}

impl MetricKey {
    /// Metrics in display order.
    pub const ALL: [Self; 10] = [
        Self::Stars,
        Self::Forks,
        Self::Followers,
        Self::Repos,
        Self::Commits,
        Self::Prs,
        Self::Issues,
        Self::Reviews,
        Self::Contrib,
        Self::ContribTo
    ];

    /// Lowercase identifier used in hide lists and footers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stars => "stars",
            Self::Forks => "forks",
            Self::Followers => "followers",
            Self::Repos => "repos",
            Self::Commits => "commits",
            Self::Prs => "prs",
            Self::Issues => "issues",
            Self::Reviews => "reviews",
            Self::Contrib => "contrib",
            Self::ContribTo => "contrib_to"
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Stars => "Total Stars",
            Self::Forks => "Total Forks",
            Self::Followers => "Followers",
            Self::Repos => "Public Repos",
            Self::Commits => "Commits (1y)",
            Self::Prs => "Pull Requests (1y)",
            Self::Issues => "Issues (1y)",
            Self::Reviews => "Reviews (1y)",
            Self::Contrib => "Contributions (1y)",
            Self::ContribTo => "Contributed Repos (1y)"
        }
    }

    fn color(self) -> &'static str {
        match self {
            Self::Stars => "#f5b700",
            Self::Forks => "#2f97c1",
            Self::Followers => "#0cf574",
            Self::Repos => "#bd93f9",
            Self::Commits => "#ff79c6",
            Self::Prs => "#9ece6a",
            Self::Issues => "#e34c26",
            Self::Reviews => "#3178c6",
            Self::Contrib => "#b58900",
            Self::ContribTo => "#41b883"
        }
    }

    /// Value at which the progress bar is full.
    fn cap(self) -> u64 {
        match self {
            Self::Stars => 200,
            Self::Forks | Self::Repos | Self::Prs | Self::Issues => 80,
            Self::Followers => 50,
            Self::Commits => 300,
            Self::Reviews => 120,
            Self::Contrib => 400,
            Self::ContribTo => 30
        }
    }
}

/// Single cell of the stats grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub key:      MetricKey,
    pub label:    &'static str,
    pub value:    u64,
    pub color:    &'static str,
    /// Progress in `0.0..=1.0`.
    pub progress: f64
}

impl Metric {
    fn new(key: MetricKey, value: u64) -> Self {
        Self {
            key,
            label: key.label(),
            value,
            color: key.color(),
            progress: (value as f64 / key.cap() as f64).min(1.0)
        }
    }
}

/// Inputs aggregated from REST and GraphQL calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileTotals {
    pub stars:         u64,
    pub forks:         u64,
    pub repos_counted: usize,
    pub summary:       ContributionSummary
}

impl ProfileTotals {
    /// Sums stars and forks over `repositories`.
    pub fn from_repositories(repositories: &[Repository], summary: ContributionSummary) -> Self {
        Self {
            stars: repositories.iter().map(|repository| repository.stargazers_count).sum(),
            forks: repositories.iter().map(|repository| repository.forks_count).sum(),
            repos_counted: repositories.len(),
            summary
        }
    }

    fn value(&self, key: MetricKey) -> u64 {
        let summary = &self.summary;
        match key {
            MetricKey::Stars => self.stars,
            MetricKey::Forks => self.forks,
            MetricKey::Followers => summary.followers,
            MetricKey::Repos => summary.public_repositories,
            MetricKey::Commits => summary.commits,
            MetricKey::Prs => summary.pull_requests,
            MetricKey::Issues => summary.issues,
            MetricKey::Reviews => summary.reviews,
            MetricKey::Contrib => summary.contributions,
            MetricKey::ContribTo => summary.contributed_repos
        }
    }
}

/// Builds the visible metrics in display order.
pub fn build_metrics(totals: &ProfileTotals, hide: &[MetricKey]) -> Vec<Metric> {
    MetricKey::ALL
        .into_iter()
        .filter(|key| !hide.contains(key))
        .map(|key| Metric::new(key, totals.value(key)))
        .collect()
}

/// Renders the stats grid.
pub fn render_stats(
    username: &str,
    metrics: &[Metric],
    theme: &Palette,
    hide: &[MetricKey],
    repos_counted: usize,
    updated: DateTime<Utc>
) -> String {
    let width = STATS_CARD_WIDTH;
    let cell_width = ((width - PAD * 2.0 - GAP) / COLUMNS as f64).floor();
    let rows = metrics.len().div_ceil(COLUMNS);
    let height = HEADER_HEIGHT + rows as f64 * ROW_HEIGHT + 18.0;
    let title = "GitHub Stats";
    let subtitle = format!("{username} • updated {}", updated.format("%Y-%m-%d %H:%M"));

    let mut buffer = svg::document_open(width, height, title, false);
    buffer.push_str(&svg::frame_defs(theme, (-20, -20, 140, 140), (10, 12)));
    buffer.push_str("  </defs>\n");
    let fill = if theme.is_transparent() { "none" } else { "url(#bgGrad)" };
    let _ = writeln!(
        buffer,
        "  <rect x=\"0.5\" y=\"0.5\" width=\"{}\" height=\"{}\" rx=\"14\" fill=\"{fill}\" stroke=\"url(#borderGrad)\" stroke-width=\"1.2\" filter=\"url(#shadow)\"/>",
        width - 1.0,
        height - 1.0
    );
    let _ = writeln!(
        buffer,
        "  <g transform=\"translate({PAD},18)\">\n    <circle cx=\"10\" cy=\"10\" r=\"10\" fill=\"{}\"/>\n    {}\n    {}\n    {}\n  </g>",
        theme.chip_bg,
        svg::text(10.0, 14.0, 12.0, &theme.title, "text-anchor=\"middle\"", "★"),
        svg::text(30.0, 14.0, 18.0, &theme.title, "font-weight=\"900\"", title),
        svg::text(width - PAD * 2.0, 14.0, 11.0, &theme.muted, "text-anchor=\"end\"", &subtitle)
    );

    let bar_width = cell_width - 18.0;
    for (index, metric) in metrics.iter().enumerate() {
        let x = PAD + (index % COLUMNS) as f64 * (cell_width + GAP);
        let y = HEADER_HEIGHT + (index / COLUMNS) as f64 * ROW_HEIGHT;
        let fill_width = (bar_width * metric.progress.clamp(0.0, 1.0)).round();
        let _ = writeln!(
            buffer,
            "  <g transform=\"translate({x},{y})\"><rect x=\"0\" y=\"0\" width=\"{cell_width}\" height=\"38\" rx=\"10\" fill=\"{}\" stroke=\"rgba(255,255,255,0.04)\"/><circle cx=\"16\" cy=\"19\" r=\"8\" fill=\"{}\" opacity=\"0.95\"/>{}{}<rect x=\"10\" y=\"34\" width=\"{bar_width}\" height=\"4\" rx=\"2\" fill=\"{}\" opacity=\"0.9\"/><rect x=\"10\" y=\"34\" width=\"{fill_width}\" height=\"4\" rx=\"2\" fill=\"{}\" opacity=\"0.95\"/></g>",
            theme.chip_bg,
            metric.color,
            svg::text(30.0, 16.0, 11.0, &theme.muted, "", metric.label),
            svg::text(30.0, 30.0, 15.0, &theme.text, "font-weight=\"800\"", &metric.value.to_string()),
            theme.track,
            metric.color
        );
    }

    let _ = writeln!(
        buffer,
        "  {}",
        svg::text(PAD, height - 10.0, 10.0, &theme.muted, "", &footer_note(hide, repos_counted))
    );
    buffer.push_str("</svg>\n");
    buffer
}

fn footer_note(hide: &[MetricKey], repos_counted: usize) -> String {
    let hidden = if hide.is_empty() {
        "∅".to_owned()
    } else {
        hide.iter().map(|key| key.as_str()).collect::<Vec<_>>().join(",")
    };
    format!("hide={hidden} • repos_counted={repos_counted}")
}
