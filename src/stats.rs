// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Activity statistics derived from repositories and the public events feed.
//!
//! The events feed covers only the most recent page of activity, so every
//! count here is approximate. Commit, pull request and issue counts are
//! raised to the configured [`ActivityFloors`] so that busy accounts with a
//! quiet recent page are not shown as idle; [`ActivityStats::approximate`]
//! records when that happened.

use serde::Serialize;

use crate::{
    colors::language_color,
    github::{ActivityEvent, Repository},
    sanitizer::{ActivityFloors, GithubStats},
};

/// Number of languages kept in the distribution.
pub const TOP_LANGUAGES: usize = 5;

/// Share of repositories written in a language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct LanguageShare
{
    pub name:       String,
    /// Rounded percentage of counted repositories.
    pub percentage: u32,
    pub color:      &'static str,
}

/// Aggregated account statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStats
{
    pub total_stars:    u64,
    pub commits:        u32,
    pub pull_requests:  u32,
    pub issues:         u32,
    /// Number of forked repositories.
    pub contributed_to: u32,
    pub languages:      Vec<LanguageShare,>,
    /// `true` when at least one count was raised to its floor.
    pub approximate:    bool,
}

/// Builds [`ActivityStats`] from the full repository list and the recent
/// events page.
///
/// Only pushes, opened pull requests and opened issues are counted; other
/// events are ignored. Languages listed in `settings.exclude_languages` are
/// removed from both the shares and the denominator, as are repositories
/// without a language.
pub fn aggregate(
    repositories: &[Repository],
    events: &[ActivityEvent],
    settings: &GithubStats,
) -> ActivityStats
{
    let total_stars = repositories.iter().map(|repository| repository.stargazers_count,).sum();
    let contributed_to = saturating_count(repositories.iter().filter(|repository| repository.fork,).count(),);

    let mut commits: u32 = 0;
    let mut pull_requests: u32 = 0;
    let mut issues: u32 = 0;
    for event in events {
        match event {
            ActivityEvent::Push {
                commits: pushed,
            } => commits = commits.saturating_add(*pushed,),
            ActivityEvent::PullRequest {
                action,
            } if is_opened(action.as_deref(),) => pull_requests = pull_requests.saturating_add(1,),
            ActivityEvent::Issue {
                action,
            } if is_opened(action.as_deref(),) => issues = issues.saturating_add(1,),
            _ => {}
        }
    }

    let ActivityFloors {
        commits: commit_floor,
        pull_requests: pull_request_floor,
        issues: issue_floor,
    } = settings.floors;
    let approximate =
        commits < commit_floor || pull_requests < pull_request_floor || issues < issue_floor;

    ActivityStats {
        total_stars,
        commits: commits.max(commit_floor,),
        pull_requests: pull_requests.max(pull_request_floor,),
        issues: issues.max(issue_floor,),
        contributed_to,
        languages: top_languages(repositories, &settings.exclude_languages,),
        approximate,
    }
}

/// Top languages by repository count, highest share first.
///
/// Ties keep the order in which languages were first seen.
pub fn top_languages(repositories: &[Repository], excluded: &[String],) -> Vec<LanguageShare,>
{
    let mut counts: Vec<(&str, usize,),> = Vec::new();
    for language in repositories
        .iter()
        .filter_map(|repository| repository.language.as_deref(),)
        .filter(|language| !language.is_empty() && !excluded.iter().any(|entry| entry.as_str() == *language),)
    {
        match counts.iter_mut().find(|(name, _,)| *name == language,) {
            Some((_, count,),) => *count += 1,
            None => counts.push((language, 1,),),
        }
    }

    let total: usize = counts.iter().map(|(_, count,)| count,).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut shares: Vec<LanguageShare,> = counts
        .into_iter()
        .map(|(name, count,)| LanguageShare {
            name:       name.to_owned(),
            percentage: percentage(count, total,),
            color:      language_color(name,),
        },)
        .collect();
    shares.sort_by(|left, right| right.percentage.cmp(&left.percentage,),);
    shares.truncate(TOP_LANGUAGES,);
    shares
}

fn is_opened(action: Option<&str,>,) -> bool
{
    action.is_none_or(|action| action == "opened",)
}

fn percentage(count: usize, total: usize,) -> u32
{
    let rounded = (count * 200 + total) / (total * 2);
    saturating_count(rounded,)
}

fn saturating_count(count: usize,) -> u32
{
    u32::try_from(count,).unwrap_or(u32::MAX,)
}
