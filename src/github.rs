// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! GitHub data access for the card renderers.
//!
//! The client issues plain REST and GraphQL requests through
//! [`octocrab`]. Each call fetches a single page and surfaces failures as
//! [`Error::Service`] naming the failing request.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc
};

use chrono::{DateTime, Duration, Utc};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{debug, info, warn};

use crate::error::Error;

/// Maximum number of language requests in flight at once.
pub const LANGUAGE_CONCURRENCY: usize = 6;

const PER_PAGE: u8 = 100;

/// Repository metadata returned by `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Repository {
    pub name:              String,
    pub description:       Option<String>,
    pub language:          Option<String>,
    pub stargazers_count:  u64,
    pub forks_count:       u64,
    pub open_issues_count: u64,
    pub subscribers_count: Option<u64>,
    pub watchers_count:    u64,
    pub license:           Option<License>,
    /// Repository size in kilobytes.
    pub size:              u64,
    pub pushed_at:         Option<String>,
    pub updated_at:        Option<String>,
    pub private:           bool,
    pub fork:              bool,
    pub archived:          bool,
    pub topics:            Vec<String>
}

impl Repository {
    /// Watcher count, preferring subscribers over the legacy watchers field.
    pub fn watchers(&self) -> u64 {
        self.subscribers_count.unwrap_or(self.watchers_count)
    }

    /// SPDX identifier when GitHub recognised the license.
    pub fn spdx_id(&self) -> Option<&str> {
        self.license
            .as_ref()
            .and_then(|license| license.spdx_id.as_deref())
            .filter(|id| !id.is_empty() && *id != "NOASSERTION")
    }

    /// Most recent activity timestamp, pushed first.
    pub fn last_activity(&self) -> Option<&str> {
        self.pushed_at
            .as_deref()
            .filter(|value| !value.is_empty())
            .or(self.updated_at.as_deref())
    }
}

/// License summary embedded in repository payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct License {
    pub spdx_id: Option<String>
}

/// Ordering applied when listing a user's repositories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositorySort {
    #[default]
    Updated,
    Pushed
}

impl RepositorySort {
    fn as_str(self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::Pushed => "pushed"
        }
    }
}

/// Filters applied to a user's repository listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryQuery {
    pub sort:          RepositorySort,
    pub include_forks: bool,
    /// Lowercased repository names to skip.
    pub exclude:       BTreeSet<String>,
    pub max_repos:     usize
}

impl Default for RepositoryQuery {
    fn default() -> Self {
        Self {
            sort:          RepositorySort::default(),
            include_forks: false,
            exclude:       BTreeSet::new(),
            max_repos:     usize::from(PER_PAGE)
        }
    }
}

impl RepositoryQuery {
    /// Applies the fork, archive, and exclusion filters and the size cap.
    pub fn select(&self, repositories: Vec<Repository>) -> Vec<Repository> {
        repositories
            .into_iter()
            .filter(|repository| self.include_forks || !repository.fork)
            .filter(|repository| !repository.archived)
            .filter(|repository| !repository.name.is_empty())
            .filter(|repository| !self.exclude.contains(&repository.name.to_lowercase()))
            .take(self.max_repos)
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct ListParams<'a> {
    per_page:  u8,
    page:      u32,
    sort:      &'a str,
    direction: &'a str
}

/// Aggregated profile activity used by the stats card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContributionSummary {
    pub followers:           u64,
    pub public_repositories: u64,
    pub commits:             u64,
    pub pull_requests:       u64,
    pub issues:              u64,
    pub reviews:             u64,
    pub contributions:       u64,
    /// Distinct repositories with any kind of contribution.
    pub contributed_repos:   u64
}

const CONTRIBUTION_QUERY: &str = r"
query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    followers { totalCount }
    repositories(ownerAffiliations: OWNER, isFork: false, privacy: PUBLIC) { totalCount }
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar { totalContributions }
      totalCommitContributions
      totalPullRequestContributions
      totalIssueContributions
      totalPullRequestReviewContributions
      commitContributionsByRepository(maxRepositories: 100) { repository { nameWithOwner } }
      issueContributionsByRepository(maxRepositories: 100) { repository { nameWithOwner } }
      pullRequestContributionsByRepository(maxRepositories: 100) { repository { nameWithOwner } }
      pullRequestReviewContributionsByRepository(maxRepositories: 100) { repository { nameWithOwner } }
    }
  }
}
";

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data:   Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String
}

#[derive(Debug, Deserialize)]
struct UserData {
    user: Option<UserNode>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    followers:                Counted,
    repositories:             Counted,
    contributions_collection: ContributionsCollection
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Counted {
    total_count: u64
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ContributionsCollection {
    contribution_calendar:                          Option<Calendar>,
    total_commit_contributions:                     u64,
    total_pull_request_contributions:               u64,
    total_issue_contributions:                      u64,
    total_pull_request_review_contributions:        u64,
    commit_contributions_by_repository:             Vec<RepositoryContribution>,
    issue_contributions_by_repository:              Vec<RepositoryContribution>,
    pull_request_contributions_by_repository:       Vec<RepositoryContribution>,
    pull_request_review_contributions_by_repository: Vec<RepositoryContribution>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Calendar {
    total_contributions: u64
}

#[derive(Debug, Deserialize)]
struct RepositoryContribution {
    repository: Option<RepositoryName>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryName {
    name_with_owner: String
}

impl From<UserNode> for ContributionSummary {
    fn from(user: UserNode) -> Self {
        let collection = user.contributions_collection;
        let contributed: BTreeSet<&str> = [
            &collection.commit_contributions_by_repository,
            &collection.issue_contributions_by_repository,
            &collection.pull_request_contributions_by_repository,
            &collection.pull_request_review_contributions_by_repository
        ]
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.repository.as_ref())
        .map(|repository| repository.name_with_owner.as_str())
        .filter(|name| !name.is_empty())
        .collect();

        Self {
            followers:           user.followers.total_count,
            public_repositories: user.repositories.total_count,
            commits:             collection.total_commit_contributions,
            pull_requests:       collection.total_pull_request_contributions,
            issues:              collection.total_issue_contributions,
            reviews:             collection.total_pull_request_review_contributions,
            contributions:       collection
                .contribution_calendar
                .as_ref()
                .map_or(0, |calendar| calendar.total_contributions),
            contributed_repos:   contributed.len() as u64
        }
    }
}

/// Thin wrapper around [`Octocrab`] exposing the requests the cards need.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    octocrab: Octocrab
}

impl GitHubClient {
    /// Builds a client, authenticating when a token is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when the HTTP client cannot be constructed.
    pub fn new(token: Option<&str>) -> Result<Self, Error> {
        let builder = Octocrab::builder();
        let builder = match token.map(str::trim).filter(|token| !token.is_empty()) {
            Some(token) => builder.personal_token(token.to_owned()),
            None => builder
        };
        let octocrab = builder
            .build()
            .map_err(|error| Error::service(format!("failed to build GitHub client: {error}")))?;
        Ok(Self {
            octocrab
        })
    }

    /// Wraps an already configured [`Octocrab`] instance.
    pub fn from_octocrab(octocrab: Octocrab) -> Self {
        Self {
            octocrab
        }
    }

    /// Fetches a single repository.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when the request fails.
    pub async fn repository(&self, owner: &str, name: &str) -> Result<Repository, Error> {
        debug!("Fetching repository {}/{}", owner, name);
        self.octocrab
            .get(format!("/repos/{owner}/{name}"), None::<&()>)
            .await
            .map_err(|error| Error::service(format!("failed to fetch repository {owner}/{name}: {error}")))
    }

    /// Lists one page of a user's repositories and applies `query` filters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when the request fails.
    pub async fn user_repositories(
        &self,
        user: &str,
        query: &RepositoryQuery
    ) -> Result<Vec<Repository>, Error> {
        let params = ListParams {
            per_page:  PER_PAGE,
            page:      1,
            sort:      query.sort.as_str(),
            direction: "desc"
        };
        debug!("Listing repositories for {} sorted by {}", user, params.sort);
        let page: Vec<Repository> = self
            .octocrab
            .get(format!("/users/{user}/repos"), Some(&params))
            .await
            .map_err(|error| Error::service(format!("failed to list repositories for {user}: {error}")))?;

        let fetched = page.len();
        let selected = query.select(page);
        info!("Selected {} of {} repositories for {}", selected.len(), fetched, user);
        Ok(selected)
    }

    /// Sums language byte counts across `repositories`.
    ///
    /// At most [`LANGUAGE_CONCURRENCY`] requests run at the same time. The
    /// first failure aborts the remaining requests.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when any language request fails.
    pub async fn language_totals(
        &self,
        owner: &str,
        repositories: &[String]
    ) -> Result<BTreeMap<String, u64>, Error> {
        let semaphore = Arc::new(Semaphore::new(LANGUAGE_CONCURRENCY));
        let mut tasks = JoinSet::new();

        for repository in repositories {
            let octocrab = self.octocrab.clone();
            let semaphore = Arc::clone(&semaphore);
            let route = format!("/repos/{owner}/{repository}/languages");
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|error| Error::service(format!("language requests cancelled: {error}")))?;
                octocrab
                    .get::<BTreeMap<String, u64>, _, _>(route.as_str(), None::<&()>)
                    .await
                    .map_err(|error| Error::service(format!("failed to fetch {route}: {error}")))
            });
        }

        let mut totals = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            let languages = joined
                .map_err(|error| Error::service(format!("language task failed: {error}")))??;
            merge_language_totals(&mut totals, languages);
        }

        info!(
            "Aggregated {} languages across {} repositories of {}",
            totals.len(),
            repositories.len(),
            owner
        );
        Ok(totals)
    }

    /// Fetches follower, repository, and contribution counts for the year
    /// ending at `to`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when the request fails or GitHub reports
    /// GraphQL errors.
    pub async fn contribution_summary(&self, user: &str, to: DateTime<Utc>) -> Result<ContributionSummary, Error> {
        let from = to - Duration::days(365);
        let payload = serde_json::json!({
            "query": CONTRIBUTION_QUERY,
            "variables": {
                "login": user,
                "from": from.to_rfc3339(),
                "to": to.to_rfc3339()
            }
        });
        debug!("Fetching contribution summary for {}", user);

        let response: GraphQlResponse<UserData> = self
            .octocrab
            .graphql(&payload)
            .await
            .map_err(|error| Error::service(format!("failed to query contributions for {user}: {error}")))?;
        summary_from_response(user, response)
    }
}

fn merge_language_totals(totals: &mut BTreeMap<String, u64>, languages: BTreeMap<String, u64>) {
    for (language, bytes) in languages {
        *totals.entry(language).or_insert(0) += bytes;
    }
}

fn summary_from_response(user: &str, response: GraphQlResponse<UserData>) -> Result<ContributionSummary, Error> {
    if let Some(first) = response.errors.first() {
        warn!("GraphQL reported {} error(s) for {}", response.errors.len(), user);
        return Err(Error::service(format!(
            "contribution query for {user} failed: {}",
            first.message
        )));
    }
    response
        .data
        .and_then(|data| data.user)
        .map(ContributionSummary::from)
        .ok_or_else(|| Error::service(format!("user {user} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository(name: &str) -> Repository {
        Repository {
            name: name.to_owned(),
            ..Repository::default()
        }
    }

    #[test]
    fn repository_deserializes_partial_payload() {
        let json = r#"{
            "name": "hello-world",
            "stargazers_count": 42,
            "license": {"spdx_id": "NOASSERTION"},
            "pushed_at": "",
            "updated_at": "2024-01-02T03:04:05Z",
            "topics": ["rust", "svg"]
        }"#;
        let parsed: Repository = serde_json::from_str(json).expect("repository payload");

        assert_eq!(parsed.name, "hello-world");
        assert_eq!(parsed.stargazers_count, 42);
        assert_eq!(parsed.spdx_id(), None);
        assert_eq!(parsed.last_activity(), Some("2024-01-02T03:04:05Z"));
        assert_eq!(parsed.topics, vec!["rust", "svg"]);
        assert!(!parsed.fork);
    }

    #[test]
    fn watchers_prefers_subscribers() {
        let mut repo = repository("a");
        repo.watchers_count = 9;
        assert_eq!(repo.watchers(), 9);
        repo.subscribers_count = Some(3);
        assert_eq!(repo.watchers(), 3);
    }

    #[test]
    fn query_filters_forks_archived_and_excluded() {
        let mut fork = repository("forked");
        fork.fork = true;
        let mut archived = repository("old");
        archived.archived = true;
        let repositories = vec![
            repository("Keep"),
            fork,
            archived,
            repository("Skip-Me"),
            repository(""),
            repository("also-keep"),
        ];
        let query = RepositoryQuery {
            exclude: BTreeSet::from(["skip-me".to_owned()]),
            ..RepositoryQuery::default()
        };

        let names: Vec<String> = query
            .select(repositories)
            .into_iter()
            .map(|repository| repository.name)
            .collect();
        assert_eq!(names, vec!["Keep", "also-keep"]);
    }

    #[test]
    fn query_caps_selection_and_optionally_keeps_forks() {
        let mut fork = repository("fork");
        fork.fork = true;
        let query = RepositoryQuery {
            include_forks: true,
            max_repos: 2,
            ..RepositoryQuery::default()
        };
        let selected = query.select(vec![fork, repository("b"), repository("c")]);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].name, "fork");
    }

    #[test]
    fn language_totals_merge_by_name() {
        let mut totals = BTreeMap::from([("Rust".to_owned(), 10)]);
        merge_language_totals(
            &mut totals,
            BTreeMap::from([("Rust".to_owned(), 5), ("Shell".to_owned(), 1)])
        );
        assert_eq!(totals["Rust"], 15);
        assert_eq!(totals["Shell"], 1);
    }

    #[test]
    fn summary_counts_distinct_contributed_repositories() {
        let json = r#"{
            "data": {"user": {
                "followers": {"totalCount": 12},
                "repositories": {"totalCount": 30},
                "contributionsCollection": {
                    "contributionCalendar": {"totalContributions": 420},
                    "totalCommitContributions": 300,
                    "totalPullRequestContributions": 20,
                    "totalIssueContributions": 7,
                    "totalPullRequestReviewContributions": 3,
                    "commitContributionsByRepository": [
                        {"repository": {"nameWithOwner": "a/one"}},
                        {"repository": {"nameWithOwner": "a/two"}}
                    ],
                    "issueContributionsByRepository": [
                        {"repository": {"nameWithOwner": "a/one"}}
                    ],
                    "pullRequestContributionsByRepository": [
                        {"repository": {"nameWithOwner": "b/three"}}
                    ],
                    "pullRequestReviewContributionsByRepository": []
                }
            }}
        }"#;
        let response: GraphQlResponse<UserData> = serde_json::from_str(json).expect("graphql payload");
        let summary = summary_from_response("a", response).expect("summary");

        assert_eq!(summary.followers, 12);
        assert_eq!(summary.public_repositories, 30);
        assert_eq!(summary.contributions, 420);
        assert_eq!(summary.commits, 300);
        assert_eq!(summary.contributed_repos, 3);
    }

    #[test]
    fn summary_surfaces_graphql_errors() {
        let json = r#"{"data": null, "errors": [{"message": "Bad credentials"}]}"#;
        let response: GraphQlResponse<UserData> = serde_json::from_str(json).expect("graphql payload");
        let error = summary_from_response("a", response).expect_err("graphql error");
        assert!(error.to_string().contains("Bad credentials"));
    }

    #[test]
    fn summary_reports_missing_user() {
        let json = r#"{"data": {"user": null}}"#;
        let response: GraphQlResponse<UserData> = serde_json::from_str(json).expect("graphql payload");
        let error = summary_from_response("ghost", response).expect_err("missing user");
        assert!(error.to_string().contains("ghost"));
    }

    #[tokio::test]
    async fn client_builds_without_token() {
        let client = GitHubClient::new(None);
        assert!(client.is_ok());
        let client = GitHubClient::new(Some("   "));
        assert!(client.is_ok());
    }
}
