// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Selection of the repositories shown in the projects section.

use std::cmp::Reverse;

use tracing::debug;

use crate::{
    github::Repository,
    sanitizer::{AutomaticProjects, SortKey},
};

/// Filters, orders and truncates fetched repositories for display.
///
/// Repositories whose name or `owner/name` matches an exclusion entry
/// (case-insensitively) are removed, as are forks when fork exclusion is on.
/// The remainder is sorted descending by the configured key; the sort is
/// stable, so equal keys keep the order GitHub returned them in. The result
/// never exceeds `settings.limit`.
///
/// # Examples
///
/// ```
/// use gitfolio::{AutomaticProjects, ProjectExclusions, Repository, SortKey, select_repositories};
///
/// let repo = |name: &str, stars: u64| Repository {
///     name: name.to_owned(),
///     full_name: format!("octocat/{name}"),
///     html_url: String::new(),
///     description: String::new(),
///     stargazers_count: stars,
///     forks_count: 0,
///     fork: false,
///     language: None,
///     updated_at: None,
///     topics: Vec::new(),
/// };
/// let settings = AutomaticProjects {
///     sort_by: SortKey::Stars,
///     limit: 1,
///     exclude: ProjectExclusions { forks: false, projects: vec!["hidden".to_owned()] },
/// };
///
/// let selected = select_repositories(vec![repo("hidden", 99), repo("a", 1), repo("b", 5)], &settings);
/// assert_eq!(selected.len(), 1);
/// assert_eq!(selected[0].name, "b");
/// ```
pub fn select_repositories(
    repositories: Vec<Repository,>,
    settings: &AutomaticProjects,
) -> Vec<Repository,>
{
    let fetched = repositories.len();
    let excluded: Vec<String,> =
        settings.exclude.projects.iter().map(|name| name.to_lowercase(),).collect();

    let mut selected: Vec<Repository,> = repositories
        .into_iter()
        .filter(|repository| !(settings.exclude.forks && repository.fork),)
        .filter(|repository| !is_excluded(repository, &excluded,),)
        .collect();

    match settings.sort_by {
        SortKey::Stars => selected.sort_by_key(|repository| Reverse(repository.stargazers_count,),),
        SortKey::Updated => {
            selected.sort_by(|left, right| right.updated_at.cmp(&left.updated_at,),)
        }
    }
    selected.truncate(settings.limit,);

    debug!("Selected {} of {} repositories", selected.len(), fetched);
    selected
}

fn is_excluded(repository: &Repository, excluded: &[String],) -> bool
{
    let name = repository.name.to_lowercase();
    let full_name = repository.full_name.to_lowercase();
    excluded.iter().any(|entry| *entry == name || *entry == full_name,)
}
