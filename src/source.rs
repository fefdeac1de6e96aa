// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Remote data collaborators consumed by the orchestrator.

use std::future::Future;

use crate::{
    blog::{Article, BlogClient},
    error::{Error, FetchFailure},
    github::{ActivityEvent, GitHubClient, Profile, Repository},
    sanitizer::Blog,
};

/// Read-only access to everything the portfolio page loads remotely.
pub trait PortfolioSource
{
    /// Profile of the configured account.
    fn fetch_profile(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Profile, FetchFailure,>,> + Send;

    /// First page of repositories owned by the account.
    fn fetch_repositories(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<Repository,>, FetchFailure,>,> + Send;

    /// Single repository, used for manually listed projects.
    fn fetch_repository(
        &self,
        owner: &str,
        name: &str,
    ) -> impl Future<Output = Result<Repository, FetchFailure,>,> + Send;

    /// Most recent page of public events.
    fn fetch_events(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Vec<ActivityEvent,>, FetchFailure,>,> + Send;

    /// Latest articles from the configured blog.
    fn fetch_articles(
        &self,
        blog: &Blog,
    ) -> impl Future<Output = Result<Vec<Article,>, FetchFailure,>,> + Send;
}

/// Source backed by the live GitHub and blog APIs.
#[derive(Debug, Clone,)]
pub struct HttpSource
{
    github: GitHubClient,
    blog:   BlogClient,
}

impl HttpSource
{
    /// Wraps already configured clients.
    pub fn new(github: GitHubClient, blog: BlogClient,) -> Self
    {
        Self {
            github,
            blog,
        }
    }

    /// Builds clients for the public endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when either HTTP client cannot be created.
    pub fn public() -> Result<Self, Error,>
    {
        Ok(Self::new(GitHubClient::new()?, BlogClient::new()?,),)
    }
}

impl PortfolioSource for HttpSource
{
    async fn fetch_profile(&self, username: &str,) -> Result<Profile, FetchFailure,>
    {
        self.github.profile(username,).await
    }

    async fn fetch_repositories(&self, username: &str,) -> Result<Vec<Repository,>, FetchFailure,>
    {
        self.github.repositories(username,).await
    }

    async fn fetch_repository(&self, owner: &str, name: &str,) -> Result<Repository, FetchFailure,>
    {
        self.github.repository(owner, name,).await
    }

    async fn fetch_events(&self, username: &str,) -> Result<Vec<ActivityEvent,>, FetchFailure,>
    {
        self.github.public_events(username,).await
    }

    async fn fetch_articles(&self, blog: &Blog,) -> Result<Vec<Article,>, FetchFailure,>
    {
        self.blog.articles(blog,).await
    }
}
