// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Resolve a configurable GitHub portfolio page into a render-ready view.
//!
//! The library loads an untrusted portfolio configuration, sanitizes it into a
//! fully defaulted [`SanitizedConfig`], and drives one round of data loading
//! against GitHub and the configured blog platform through an
//! [`Orchestrator`]. The outcome is a [`ViewState`]: loading, a terminal error
//! panel described by an [`ErrorDescriptor`], or page content whose remote
//! sections load and fail independently.
//!
//! Remote access goes through the [`PortfolioSource`] trait; theme storage and
//! tracking go through [`ThemePersistence`] and [`Analytics`], so the whole
//! pipeline can run without the network.

mod analytics;
mod blog;
mod classify;
mod colors;
mod config;
mod error;
mod github;
mod lenient;
mod orchestrator;
mod repositories;
mod sanitizer;
mod source;
mod stats;
mod theme;
mod view;

pub use analytics::{Analytics, AnalyticsEvent, NoopAnalytics, TracingAnalytics, setup_events};
pub use blog::{Article, BlogClient, DEV_API_BASE, MEDIUM_API_BASE};
pub use classify::{ErrorDescriptor, ErrorKind, classify, classify_at};
pub use colors::{FALLBACK_LANGUAGE_COLOR, language_color};
pub use config::{RawConfig, load_config};
pub use error::{Error, FetchFailure, InvalidConfig, io_error};
pub use github::{ActivityEvent, GitHubClient, PAGE_SIZE, Profile, Repository};
pub use orchestrator::{DEFAULT_FETCH_TIMEOUT, Orchestrator};
pub use repositories::select_repositories;
pub use sanitizer::{
    ActivityFloors, AutomaticProjects, Blog, BlogSource, Certification, DEFAULT_THEMES,
    Education, Experience, ExternalProject, ExternalProjects, GithubAccount, GithubProjects,
    GithubStats, GoogleAnalytics, Hotjar, ManualProjects, ProjectExclusions, ProjectMode,
    Projects, Publication, Resume, SanitizedConfig, Seo, SkillCategory, Skills, Social, SortKey,
    ThemeConfig, sanitize,
};
pub use source::{HttpSource, PortfolioSource};
pub use stats::{ActivityStats, LanguageShare, TOP_LANGUAGES, aggregate, top_languages};
pub use theme::{
    DEFAULT_THEME_STORE, FileThemeStore, MemoryThemeStore, THEME_STORAGE_KEY, ThemePersistence,
    change_theme, initial_theme,
};
pub use view::{Card, PageView, PlacedCard, Region, RenderDocument, Section, ViewState};
