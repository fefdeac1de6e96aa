// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Read-only GitHub REST client used to populate the portfolio.
//!
//! Requests go through [`Octocrab`] without authentication. Responses are
//! read raw so that the status code and rate-limit headers survive into
//! [`FetchFailure`] for classification.

use octocrab::{Octocrab, service::middleware::retry::RetryConfig};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::error::{Error, FetchFailure};

/// Page size used for repository and event listings.
pub const PAGE_SIZE: u32 = 100;

const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";
const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// GitHub account details shown in the identity panel.
///
/// Optional text fields are empty strings when GitHub has no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct Profile
{
    pub login:    String,
    /// Avatar image URL.
    pub avatar:   String,
    /// Display name; empty when unset.
    pub name:     String,
    pub bio:      String,
    pub location: String,
    pub company:  String,
}

/// Repository summary as listed by GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct Repository
{
    pub name:             String,
    /// `owner/name`.
    #[serde(default)]
    pub full_name:        String,
    #[serde(default)]
    pub html_url:         String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description:      String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count:      u64,
    /// `true` for forks of another repository.
    #[serde(default)]
    pub fork:             bool,
    /// Primary language; `None` when GitHub reports none.
    #[serde(default)]
    pub language:         Option<String,>,
    /// ISO-8601 timestamp of the last update.
    #[serde(default)]
    pub updated_at:       Option<String,>,
    #[serde(default)]
    pub topics:           Vec<String,>,
}

/// Event from the public activity feed, reduced to what the statistics need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub enum ActivityEvent
{
    /// Push carrying the given number of commits.
    Push
    {
        commits: u32,
    },
    /// Pull request event with its action (`opened`, `closed`, ...).
    PullRequest
    {
        action: Option<String,>,
    },
    /// Issue event with its action.
    Issue
    {
        action: Option<String,>,
    },
    /// Any event kind the statistics ignore.
    Other,
}

#[derive(Debug, Deserialize,)]
struct UserResponse
{
    login:      String,
    #[serde(default)]
    avatar_url: Option<String,>,
    #[serde(default)]
    name:       Option<String,>,
    #[serde(default)]
    bio:        Option<String,>,
    #[serde(default)]
    location:   Option<String,>,
    #[serde(default)]
    company:    Option<String,>,
}

impl From<UserResponse,> for Profile
{
    fn from(user: UserResponse,) -> Self
    {
        Self {
            login:    user.login,
            avatar:   user.avatar_url.unwrap_or_default(),
            name:     user.name.unwrap_or_default(),
            bio:      user.bio.unwrap_or_default(),
            location: user.location.unwrap_or_default(),
            company:  user.company.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize,)]
struct EventResponse
{
    #[serde(rename = "type")]
    kind:    String,
    #[serde(default)]
    payload: EventPayload,
}

#[derive(Debug, Default, Deserialize,)]
struct EventPayload
{
    #[serde(default)]
    action:  Option<String,>,
    #[serde(default)]
    commits: Option<Vec<serde_json::Value,>,>,
    #[serde(default)]
    size:    Option<u32,>,
}

impl From<EventResponse,> for ActivityEvent
{
    fn from(event: EventResponse,) -> Self
    {
        let EventResponse {
            kind,
            payload,
        } = event;

        match kind.as_str() {
            "PushEvent" => {
                let commits = payload
                    .commits
                    .map(|commits| u32::try_from(commits.len(),).unwrap_or(u32::MAX,),)
                    .or(payload.size,)
                    .unwrap_or(0,);
                Self::Push {
                    commits,
                }
            }
            "PullRequestEvent" => Self::PullRequest {
                action: payload.action,
            },
            "IssuesEvent" => Self::Issue {
                action: payload.action,
            },
            _ => Self::Other,
        }
    }
}

/// Thin wrapper over an unauthenticated [`Octocrab`] instance.
#[derive(Debug, Clone,)]
pub struct GitHubClient
{
    octocrab: Octocrab,
}

impl GitHubClient
{
    /// Builds a client targeting the public GitHub API.
    ///
    /// Failed requests are never retried.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, Error,>
    {
        let octocrab = Octocrab::builder()
            .add_retry_config(RetryConfig::None,)
            .build()
            .map_err(|e| Error::service(format!("failed to initialize GitHub client: {e}"),),)?;
        Ok(Self {
            octocrab,
        },)
    }

    /// Builds a client targeting an alternative API root, such as a GitHub
    /// Enterprise host or a local mock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when the URI is invalid or the client
    /// cannot be initialized.
    pub fn with_base_uri(base_uri: &str,) -> Result<Self, Error,>
    {
        let octocrab = Octocrab::builder()
            .base_uri(base_uri,)
            .map_err(|e| Error::service(format!("invalid GitHub base URI '{base_uri}': {e}"),),)?
            .add_retry_config(RetryConfig::None,)
            .build()
            .map_err(|e| Error::service(format!("failed to initialize GitHub client: {e}"),),)?;
        Ok(Self {
            octocrab,
        },)
    }

    /// Fetches the profile of `username`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchFailure`] describing the HTTP status, transport or
    /// decoding problem.
    pub async fn profile(&self, username: &str,) -> Result<Profile, FetchFailure,>
    {
        let user: UserResponse = self.get_json(format!("/users/{username}"),).await?;
        Ok(user.into(),)
    }

    /// Fetches the first page of repositories owned by `username`, most
    /// recently updated first.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchFailure`] describing the failed request.
    pub async fn repositories(&self, username: &str,) -> Result<Vec<Repository,>, FetchFailure,>
    {
        let repositories: Vec<Repository,> = self
            .get_json(format!("/users/{username}/repos?per_page={PAGE_SIZE}&sort=updated"),)
            .await?;
        debug!("Fetched {} repositories for {}", repositories.len(), username);
        Ok(repositories,)
    }

    /// Fetches a single repository by owner and name.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchFailure`] describing the failed request.
    pub async fn repository(&self, owner: &str, name: &str,) -> Result<Repository, FetchFailure,>
    {
        self.get_json(format!("/repos/{owner}/{name}"),).await
    }

    /// Fetches the most recent page of public events for `username`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchFailure`] describing the failed request.
    pub async fn public_events(
        &self,
        username: &str,
    ) -> Result<Vec<ActivityEvent,>, FetchFailure,>
    {
        let events: Vec<EventResponse,> = self
            .get_json(format!("/users/{username}/events/public?per_page={PAGE_SIZE}"),)
            .await?;
        debug!("Fetched {} public events for {}", events.len(), username);
        Ok(events.into_iter().map(ActivityEvent::from,).collect(),)
    }

    async fn get_json<T,>(&self, route: String,) -> Result<T, FetchFailure,>
    where
        T: DeserializeOwned,
    {
        debug!("GET {}", route);

        let response = self.octocrab._get(route.as_str(),).await.map_err(|e| {
            FetchFailure::Transport {
                message: e.to_string(),
            }
        },)?;

        let status = response.status();
        if !status.is_success() {
            let header = |name: &str| {
                response
                    .headers()
                    .get(name,)
                    .and_then(|value| value.to_str().ok(),)
                    .map(str::to_owned,)
            };
            let failure = FetchFailure::Http {
                status:               status.as_u16(),
                rate_limit_reset:     header(RATE_LIMIT_RESET_HEADER,),
                rate_limit_remaining: header(RATE_LIMIT_REMAINING_HEADER,),
            };
            warn!("GET {} failed: {}", route, failure);
            return Err(failure,);
        }

        let body = self.octocrab.body_to_string(response,).await.map_err(|e| {
            FetchFailure::Transport {
                message: e.to_string(),
            }
        },)?;

        serde_json::from_str(&body,).map_err(|e| FetchFailure::Decode {
            message: e.to_string(),
        },)
    }
}

fn null_as_empty<'de, D,>(deserializer: D,) -> Result<String, D::Error,>
where
    D: serde::Deserializer<'de,>,
{
    Ok(Option::<String,>::deserialize(deserializer,)?.unwrap_or_default(),)
}
