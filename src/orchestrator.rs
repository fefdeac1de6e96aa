// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Lifecycle of one round of data loading.
//!
//! Every [`Orchestrator::mount`] starts a new generation. Results are
//! committed only while their generation is still the latest, so a slow
//! response for a previous configuration never overwrites the state of the
//! current one. Every remote call is bounded by the configured timeout.

use std::{
    future::Future,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tracing::{debug, info, warn};

use crate::{
    analytics::{Analytics, setup_events},
    blog::Article,
    classify::{ErrorDescriptor, classify},
    config::RawConfig,
    error::{Error, FetchFailure},
    github::{ActivityEvent, Repository},
    repositories::select_repositories,
    sanitizer::{DEFAULT_THEMES, ProjectMode, SanitizedConfig, sanitize},
    source::PortfolioSource,
    stats::{ActivityStats, aggregate},
    theme::{ThemePersistence, change_theme, initial_theme},
    view::{PageView, Section, ViewState},
};

/// Budget applied to each remote call when none is configured.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15,);

#[derive(Debug, Clone,)]
struct Mounted
{
    raw:    RawConfig,
    config: Option<SanitizedConfig,>,
}

/// Owns the view state and drives loading for a configuration.
pub struct Orchestrator<S,>
{
    source:       Arc<S,>,
    themes:       Arc<dyn ThemePersistence + Send + Sync,>,
    analytics:    Arc<dyn Analytics + Send + Sync,>,
    timeout:      Duration,
    prefers_dark: Option<bool,>,
    generation:   AtomicU64,
    state:        Mutex<ViewState,>,
    mounted:      Mutex<Option<Mounted,>,>,
}

impl<S,> Orchestrator<S,>
where
    S: PortfolioSource,
{
    /// Creates an orchestrator in the loading state with the first built-in
    /// theme and the default per-call timeout.
    pub fn new(
        source: Arc<S,>,
        themes: Arc<dyn ThemePersistence + Send + Sync,>,
        analytics: Arc<dyn Analytics + Send + Sync,>,
    ) -> Self
    {
        let theme = DEFAULT_THEMES.first().copied().unwrap_or_default().to_owned();
        Self {
            source,
            themes,
            analytics,
            timeout: DEFAULT_FETCH_TIMEOUT,
            prefers_dark: None,
            generation: AtomicU64::new(0,),
            state: Mutex::new(ViewState::Loading {
                theme,
            },),
            mounted: Mutex::new(None,),
        }
    }

    /// Sets the budget applied to each remote call.
    pub fn with_timeout(mut self, timeout: Duration,) -> Self
    {
        self.timeout = timeout;
        self
    }

    /// Sets the system dark/light preference used for theme selection.
    pub fn with_color_scheme_hint(mut self, prefers_dark: Option<bool,>,) -> Self
    {
        self.prefers_dark = prefers_dark;
        self
    }

    /// Snapshot of the current view state.
    pub fn state(&self,) -> ViewState
    {
        self.state.lock().unwrap_or_else(PoisonError::into_inner,).clone()
    }

    /// Runs a full loading round for `raw` and returns the resulting state.
    ///
    /// An invalid configuration ends in an error state without any fetch. A
    /// failed profile fetch ends in a classified error state. Otherwise the
    /// page is shown immediately and its remote sections are filled in as
    /// they resolve; a failing section becomes unavailable without affecting
    /// the rest of the page.
    ///
    /// If another mount starts before this one finishes, this round's
    /// remaining results are discarded and the newer state is returned.
    pub async fn mount(&self, raw: &RawConfig,) -> ViewState
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst,) + 1;
        debug!("Starting load round {}", generation);

        let config = match sanitize(raw,) {
            Ok(config,) => config,
            Err(reason,) => {
                warn!("Rejecting configuration: {}", reason);
                self.remember(generation, raw, None,);
                self.commit(generation, ViewState::Error {
                    error: ErrorDescriptor::invalid_configuration(),
                },);
                return self.state();
            }
        };
        self.remember(generation, raw, Some(config.clone(),),);

        let theme = initial_theme(&config.theme_config, self.themes.as_ref(), self.prefers_dark,);
        for event in setup_events(&config,) {
            self.analytics.emit(&event,);
        }
        self.commit(generation, ViewState::Loading {
            theme: theme.clone(),
        },);

        let username = config.github.username.clone();
        let profile = match self.bounded(self.source.fetch_profile(&username,),).await {
            Ok(profile,) => profile,
            Err(failure,) => {
                warn!("Profile fetch for {} failed: {}", username, failure);
                self.commit(generation, ViewState::Error {
                    error: classify(&failure,),
                },);
                return self.state();
            }
        };
        if !self.is_current(generation,) {
            debug!("Discarding profile of superseded round {}", generation);
            return self.state();
        }

        let mut page = PageView {
            repositories: initial_section(config.projects.github.display,),
            stats: initial_section(config.github_stats.display,),
            articles: initial_section(config.blog.display,),
            config,
            theme,
            profile,
        };
        self.commit(generation, ViewState::Content(Box::new(page.clone(),),),);

        let (repositories, stats, articles,) = tokio::join!(
            self.load_repositories(&page.config, &username),
            self.load_stats(&page.config, &username),
            self.load_articles(&page.config),
        );
        if let Some(section,) = repositories {
            page.repositories = section;
        }
        if let Some(section,) = stats {
            page.stats = section;
        }
        if let Some(section,) = articles {
            page.articles = section;
        }

        if self.commit(generation, ViewState::Content(Box::new(page,),),) {
            info!("Load round {} complete for {}", generation, username);
        }
        self.state()
    }

    /// Mounts `raw` only when it differs from the last mounted configuration.
    pub async fn reconfigure(&self, raw: &RawConfig,) -> ViewState
    {
        let unchanged = self
            .mounted
            .lock()
            .unwrap_or_else(PoisonError::into_inner,)
            .as_ref()
            .is_some_and(|mounted| mounted.raw == *raw,);
        if unchanged {
            debug!("Configuration unchanged; keeping current state");
            return self.state();
        }
        self.mount(raw,).await
    }

    /// Persists a new theme choice and applies it to the current state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when no valid configuration is mounted or
    /// the theme is not configured, or the store's error when persisting
    /// fails.
    pub fn select_theme(&self, theme: &str,) -> Result<String, Error,>
    {
        let config = self
            .mounted
            .lock()
            .unwrap_or_else(PoisonError::into_inner,)
            .as_ref()
            .and_then(|mounted| mounted.config.as_ref(),)
            .map(|config| config.theme_config.clone(),)
            .ok_or_else(|| Error::validation("no valid configuration is mounted",),)?;

        let theme = change_theme(&config, self.themes.as_ref(), theme,)?;
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner,);
        match &mut *state {
            ViewState::Loading {
                theme: current,
            } => current.clone_from(&theme,),
            ViewState::Content(page,) => page.theme.clone_from(&theme,),
            ViewState::Error {
                ..
            } => {}
        }
        Ok(theme,)
    }

    async fn load_repositories(
        &self,
        config: &SanitizedConfig,
        username: &str,
    ) -> Option<Section<Vec<Repository,>,>,>
    {
        let projects = &config.projects.github;
        if !projects.display {
            return None;
        }

        let loaded = match projects.mode {
            ProjectMode::Automatic => self
                .bounded(self.source.fetch_repositories(username,),)
                .await
                .map(|repositories| select_repositories(repositories, &projects.automatic,),),
            ProjectMode::Manual => self.load_manual_repositories(&projects.manual.projects,).await,
        };
        Some(section_from(loaded, "repositories",),)
    }

    async fn load_manual_repositories(
        &self,
        entries: &[String],
    ) -> Result<Vec<Repository,>, FetchFailure,>
    {
        let mut repositories = Vec::with_capacity(entries.len(),);
        for entry in entries {
            let Some((owner, name,),) = entry.split_once('/',) else {
                warn!("Skipping manual project {} without an owner", entry);
                continue;
            };
            match self.bounded(self.source.fetch_repository(owner, name,),).await {
                Ok(repository,) => repositories.push(repository,),
                Err(failure,) if failure.status_code() == Some(404,) => {
                    warn!("Skipping missing manual project {}", entry);
                }
                Err(failure,) => return Err(failure,),
            }
        }
        Ok(repositories,)
    }

    async fn load_stats(
        &self,
        config: &SanitizedConfig,
        username: &str,
    ) -> Option<Section<ActivityStats,>,>
    {
        if !config.github_stats.display {
            return None;
        }

        let (repositories, events,): (
            Result<Vec<Repository,>, FetchFailure,>,
            Result<Vec<ActivityEvent,>, FetchFailure,>,
        ) = tokio::join!(
            self.bounded(self.source.fetch_repositories(username)),
            self.bounded(self.source.fetch_events(username)),
        );
        let events = events.unwrap_or_else(|failure| {
            warn!("Events fetch failed, counting no recent activity: {}", failure);
            Vec::new()
        },);
        let loaded = repositories
            .map(|repositories| aggregate(&repositories, &events, &config.github_stats,),);
        Some(section_from(loaded, "statistics",),)
    }

    async fn load_articles(&self, config: &SanitizedConfig,) -> Option<Section<Vec<Article,>,>,>
    {
        if !config.blog.display {
            return None;
        }
        let loaded = self.bounded(self.source.fetch_articles(&config.blog,),).await;
        Some(section_from(loaded, "articles",),)
    }

    async fn bounded<T,>(
        &self,
        request: impl Future<Output = Result<T, FetchFailure,>,>,
    ) -> Result<T, FetchFailure,>
    {
        match tokio::time::timeout(self.timeout, request,).await {
            Ok(result,) => result,
            Err(_elapsed,) => Err(FetchFailure::Timeout {
                after: self.timeout,
            },),
        }
    }

    fn is_current(&self, generation: u64,) -> bool
    {
        self.generation.load(Ordering::SeqCst,) == generation
    }

    /// Replaces the state if `generation` is still the latest round.
    fn commit(&self, generation: u64, next: ViewState,) -> bool
    {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner,);
        if !self.is_current(generation,) {
            debug!("Discarding result of superseded round {}", generation);
            return false;
        }
        *state = next;
        true
    }

    fn remember(&self, generation: u64, raw: &RawConfig, config: Option<SanitizedConfig,>,)
    {
        if self.is_current(generation,) {
            *self.mounted.lock().unwrap_or_else(PoisonError::into_inner,) = Some(Mounted {
                raw: raw.clone(),
                config,
            },);
        }
    }
}

fn initial_section<T,>(display: bool,) -> Section<T,>
{
    if display { Section::Loading } else { Section::Hidden }
}

fn section_from<T,>(loaded: Result<T, FetchFailure,>, label: &str,) -> Section<T,>
{
    match loaded {
        Ok(value,) => Section::Ready(value,),
        Err(failure,) => {
            warn!("Loading {} failed: {}", label, failure);
            Section::Unavailable {
                reason: failure.to_string(),
            }
        }
    }
}
