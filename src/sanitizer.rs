// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Transformation logic that converts a raw configuration document into the
//! render-ready view model.
//!
//! Sanitization is pure and deterministic: the same [`RawConfig`] always
//! yields an equal [`SanitizedConfig`]. Every field consumed downstream
//! carries a value after this step (possibly an empty collection), and text
//! values are trimmed so that blank input behaves exactly like missing
//! input. A document that cannot be sanitized produces an [`InvalidConfig`]
//! and nothing else.

use serde::Serialize;

use crate::{
    config::{
        RawAutomaticProjects, RawBlog, RawCertification, RawConfig, RawEducation,
        RawExperience, RawExternalProject, RawGithubProjects, RawGithubStats, RawPublication,
        RawSkill, RawSocial, RawThemeConfig,
    },
    error::InvalidConfig,
};

const DEFAULT_GITHUB_PROJECTS_HEADER: &str = "Github Projects";
const DEFAULT_EXTERNAL_PROJECTS_HEADER: &str = "My Projects";
const DEFAULT_PROJECT_LIMIT: usize = 8;
const DEFAULT_SNIPPET_VERSION: u32 = 6;
const DEFAULT_BLOG_LIMIT: usize = 5;
const DEFAULT_COMMIT_FLOOR: u32 = 100;
const DEFAULT_PULL_REQUEST_FLOOR: u32 = 10;
const DEFAULT_ISSUE_FLOOR: u32 = 5;
/// Characters that would change the meaning of a GitHub API path.
const URL_DELIMITERS: [char; 3] = ['/', '?', '#'];

/// Built-in themes, in the order offered by the theme switcher. The first
/// entry is the default theme.
pub const DEFAULT_THEMES: &[&str] = &[
    "lofi",
    "light",
    "dark",
    "cupcake",
    "bumblebee",
    "emerald",
    "corporate",
    "synthwave",
    "retro",
    "cyberpunk",
    "valentine",
    "halloween",
    "garden",
    "forest",
    "aqua",
    "pastel",
    "fantasy",
    "wireframe",
    "black",
    "luxury",
    "dracula",
    "cmyk",
    "autumn",
    "business",
    "acid",
    "lemonade",
    "night",
    "coffee",
    "winter",
    "dim",
    "nord",
    "sunset",
    "procyon",
];

/// Fully defaulted view model derived from a [`RawConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedConfig
{
    pub github:           GithubAccount,
    pub projects:         Projects,
    pub seo:              Seo,
    /// Replaces the bio fetched from the profile when set.
    pub custom_bio:       Option<String,>,
    pub social:           Social,
    pub resume:           Resume,
    pub skills:           Skills,
    /// Entries with at least a company, a position or a date bound.
    pub experiences:      Vec<Experience,>,
    /// Entries with at least an institution, a degree or a date bound.
    pub educations:       Vec<Education,>,
    /// Entries with at least a body, a name or a year.
    pub certifications:   Vec<Certification,>,
    /// Entries with a title.
    pub publications:     Vec<Publication,>,
    pub google_analytics: GoogleAnalytics,
    pub hotjar:           Hotjar,
    pub blog:             Blog,
    pub github_stats:     GithubStats,
    pub theme_config:     ThemeConfig,
    /// Raw HTML rendered in the footer card.
    pub footer:           Option<String,>,
    /// Whether the page is packaged as a progressive web app.
    #[serde(rename = "enablePWA")]
    pub enable_pwa:       bool,
}

/// Account every remote request is made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct GithubAccount
{
    /// Trimmed login; never blank and free of whitespace and URL delimiters.
    pub username: String,
}

/// Repository and hand-written project sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct Projects
{
    pub github:   GithubProjects,
    pub external: ExternalProjects,
}

/// Settings for the repository section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct GithubProjects
{
    /// `false` hides the section and skips the repository fetch.
    pub display:   bool,
    /// Card heading, `Github Projects` by default.
    pub header:    String,
    pub mode:      ProjectMode,
    pub automatic: AutomaticProjects,
    pub manual:    ManualProjects,
}

/// How the repository section chooses its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "snake_case")]
pub enum ProjectMode
{
    /// Derived from the account's repository list.
    Automatic,
    /// Exactly the repositories listed in `manual.projects`.
    Manual,
}

/// Derivation rules for automatic mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct AutomaticProjects
{
    pub sort_by: SortKey,
    /// Maximum number of repositories shown; never zero.
    pub limit:   usize,
    pub exclude: ProjectExclusions,
}

/// Ordering applied to derived repository lists. Both keys sort descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "snake_case")]
pub enum SortKey
{
    /// Stargazer count.
    Stars,
    /// Last push time.
    Updated,
}

/// Repositories left out of automatic mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct ProjectExclusions
{
    /// Drop forked repositories.
    pub forks:    bool,
    /// Names or `owner/name` full names, compared case-insensitively.
    pub projects: Vec<String,>,
}

/// Repositories listed explicitly for manual mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct ManualProjects
{
    /// `owner/name` entries, fetched one by one in this order.
    pub projects: Vec<String,>,
}

/// Hand-written projects hosted outside GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct ExternalProjects
{
    pub header:   String,
    pub projects: Vec<ExternalProject,>,
}

/// Single external project card; entries without a title are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct ExternalProject
{
    pub title:       String,
    pub description: Option<String,>,
    pub image_url:   Option<String,>,
    pub demo_url:    Option<String,>,
    pub code_url:    Option<String,>,
    pub tech_stack:  Vec<String,>,
    pub highlights:  Vec<String,>,
    /// Marks the project for highlighted presentation.
    pub featured:    bool,
}

/// Page metadata for search engines and link previews.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize,)]
pub struct Seo
{
    pub title:       Option<String,>,
    pub description: Option<String,>,
    #[serde(rename = "imageURL")]
    pub image_url:   Option<String,>,
}

/// Social handles; blank handles are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct Social
{
    pub linkedin:      Option<String,>,
    pub x:             Option<String,>,
    pub mastodon:      Option<String,>,
    pub facebook:      Option<String,>,
    pub instagram:     Option<String,>,
    pub reddit:        Option<String,>,
    pub threads:       Option<String,>,
    pub youtube:       Option<String,>,
    pub udemy:         Option<String,>,
    pub dribbble:      Option<String,>,
    pub behance:       Option<String,>,
    pub medium:        Option<String,>,
    pub dev:           Option<String,>,
    pub stackoverflow: Option<String,>,
    pub website:       Option<String,>,
    pub phone:         Option<String,>,
    pub email:         Option<String,>,
    pub telegram:      Option<String,>,
    pub research_gate: Option<String,>,
    pub discord:       Option<String,>,
}

/// Downloadable resume link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct Resume
{
    /// Empty when no resume is configured.
    pub file_url: String,
}

/// Skills, resolved once from the shape of the first configured element.
///
/// Mixed-shape lists are not supported: elements that do not match the
/// resolved shape are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum Skills
{
    /// Legacy list of skill names.
    Flat(Vec<String,>,),
    /// Skill names grouped under headings.
    Categorized(Vec<SkillCategory,>,),
}

impl Skills
{
    /// Returns `true` when there is nothing to render.
    pub fn is_empty(&self,) -> bool
    {
        match self {
            Self::Flat(names,) => names.is_empty(),
            Self::Categorized(categories,) => categories.is_empty(),
        }
    }
}

/// Heading with the skills listed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct SkillCategory
{
    pub category: String,
    /// Non-blank skill names.
    pub badges:   Vec<String,>,
}

/// Work history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct Experience
{
    pub company:      Option<String,>,
    pub position:     Option<String,>,
    /// Free-form start date; empty when unknown.
    pub from:         String,
    /// Free-form end date; empty when unknown.
    pub to:           String,
    pub company_link: Option<String,>,
    pub company_logo: Option<String,>,
    pub description:  Option<String,>,
    pub technologies: Vec<String,>,
}

/// Education history entry. Dates follow [`Experience`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct Education
{
    pub institution:      Option<String,>,
    pub degree:           Option<String,>,
    pub from:             String,
    pub to:               String,
    pub institution_link: Option<String,>,
    pub institution_logo: Option<String,>,
    pub score:            Option<String,>,
    pub description:      Option<String,>,
}

/// Certification entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct Certification
{
    /// Issuing organisation.
    pub body: Option<String,>,
    pub name: Option<String,>,
    pub year: Option<String,>,
    pub link: Option<String,>,
}

/// Paper or article entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct Publication
{
    pub title:           String,
    pub conference_name: Option<String,>,
    pub journal_name:    Option<String,>,
    pub authors:         Option<String,>,
    pub link:            Option<String,>,
    pub description:     Option<String,>,
}

/// Google Analytics measurement settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize,)]
pub struct GoogleAnalytics
{
    /// Measurement id; tracking is off when absent.
    pub id: Option<String,>,
}

/// Hotjar tracking settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct Hotjar
{
    /// Site id; tracking is off when absent.
    pub id:              Option<String,>,
    /// Tracking snippet version, 6 by default.
    pub snippet_version: u32,
}

/// Blog feed settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct Blog
{
    /// `true` only when a username is set and the source is present and
    /// recognised.
    pub display:  bool,
    /// Platform to read from; `Dev` when none was recognised.
    pub source:   BlogSource,
    pub username: String,
    /// Maximum number of articles shown; never zero.
    pub limit:    usize,
}

/// Publishing platforms the article fetcher understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "snake_case")]
pub enum BlogSource
{
    /// dev.to articles API.
    Dev,
    /// Medium feed read through the rss2json bridge.
    Medium,
}

/// Settings for the activity statistics card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct GithubStats
{
    pub display:           bool,
    /// Languages left out of the language breakdown.
    pub exclude_languages: Vec<String,>,
    pub floors:            ActivityFloors,
}

/// Minimum displayed activity counts.
///
/// The public events feed only covers recent activity, so raw counts
/// understate busy accounts. These floors are a presentation heuristic, not a
/// measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFloors
{
    pub commits:       u32,
    pub pull_requests: u32,
    pub issues:        u32,
}

impl Default for ActivityFloors
{
    fn default() -> Self
    {
        Self {
            commits:       DEFAULT_COMMIT_FLOOR,
            pull_requests: DEFAULT_PULL_REQUEST_FLOOR,
            issues:        DEFAULT_ISSUE_FLOOR,
        }
    }
}

/// Theme selection rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig
{
    /// Always a member of `themes`.
    pub default_theme:                String,
    /// Hides the theme switcher and ignores stored preferences.
    pub disable_switch:               bool,
    /// Follow the system color-scheme hint when nothing is stored.
    pub respect_prefers_color_scheme: bool,
    pub display_avatar_ring:          bool,
    /// Themes offered by the switcher; never empty.
    pub themes:                       Vec<String,>,
}

/// Converts a raw configuration document into the view model.
///
/// # Errors
///
/// Returns [`InvalidConfig`] when the `github` section or its username is
/// missing, or when the username contains whitespace or a URL delimiter
/// (`/`, `?`, `#`). No other input is
/// rejected: malformed optional values fall back to their defaults.
///
/// # Examples
///
/// ```
/// use gitfolio::{RawConfig, sanitize};
///
/// let raw = RawConfig::from_yaml("github: { username: octocat }",).expect("valid yaml",);
/// let config = sanitize(&raw,).expect("valid configuration",);
/// assert_eq!(config.projects.github.automatic.limit, 8);
/// assert_eq!(config.hotjar.snippet_version, 6);
/// assert_eq!(config.resume.file_url, "");
/// ```
pub fn sanitize(raw: &RawConfig,) -> Result<SanitizedConfig, InvalidConfig,>
{
    let github = raw.github.as_ref().ok_or(InvalidConfig::MissingGithub,)?;
    let username = present(github.username.as_deref(),).ok_or(InvalidConfig::MissingUsername,)?;
    if username.chars().any(|c| c.is_whitespace() || URL_DELIMITERS.contains(&c,),) {
        return Err(InvalidConfig::MalformedUsername,);
    }

    let projects = raw.projects.as_ref();

    Ok(SanitizedConfig {
        github:           GithubAccount {
            username,
        },
        projects:         Projects {
            github:   sanitize_github_projects(projects.and_then(|section| section.github.as_ref(),),),
            external: ExternalProjects {
                header:   text_or(
                    projects
                        .and_then(|section| section.external.as_ref(),)
                        .and_then(|external| external.header.as_deref(),),
                    DEFAULT_EXTERNAL_PROJECTS_HEADER,
                ),
                projects: projects
                    .and_then(|section| section.external.as_ref(),)
                    .and_then(|external| external.projects.as_deref(),)
                    .unwrap_or_default()
                    .iter()
                    .filter_map(sanitize_external_project,)
                    .collect(),
            },
        },
        seo:              raw
            .seo
            .as_ref()
            .map(|seo| Seo {
                title:       present(seo.title.as_deref(),),
                description: present(seo.description.as_deref(),),
                image_url:   present(seo.image_url.as_deref(),),
            },)
            .unwrap_or_default(),
        custom_bio:       present(raw.custom_bio.as_deref(),),
        social:           raw.social.as_ref().map(sanitize_social,).unwrap_or_default(),
        resume:           Resume {
            file_url: text_or(
                raw.resume.as_ref().and_then(|resume| resume.file_url.as_deref(),),
                "",
            ),
        },
        skills:           sanitize_skills(raw.skills.as_deref().unwrap_or_default(),),
        experiences:      raw
            .experiences
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(sanitize_experience,)
            .collect(),
        educations:       raw
            .educations
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(sanitize_education,)
            .collect(),
        certifications:   raw
            .certifications
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(sanitize_certification,)
            .collect(),
        publications:     raw
            .publications
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(sanitize_publication,)
            .collect(),
        google_analytics: GoogleAnalytics {
            id: present(raw.google_analytics.as_ref().and_then(|ga| ga.id.as_deref(),),),
        },
        hotjar:           Hotjar {
            id:              present(raw.hotjar.as_ref().and_then(|hotjar| hotjar.id.as_deref(),),),
            snippet_version: raw
                .hotjar
                .as_ref()
                .and_then(|hotjar| hotjar.snippet_version,)
                .filter(|version| *version > 0,)
                .unwrap_or(DEFAULT_SNIPPET_VERSION,),
        },
        blog:             sanitize_blog(raw.blog.as_ref(),),
        github_stats:     sanitize_github_stats(raw.github_stats.as_ref(),),
        theme_config:     sanitize_theme_config(raw.theme_config.as_ref(),),
        footer:           present(raw.footer.as_deref(),),
        enable_pwa:       raw.enable_pwa.unwrap_or(true,),
    },)
}

fn sanitize_github_projects(section: Option<&RawGithubProjects,>,) -> GithubProjects
{
    let mode = match section.and_then(|github| present(github.mode.as_deref(),),) {
        Some(mode,) if mode.eq_ignore_ascii_case("manual",) => ProjectMode::Manual,
        _ => ProjectMode::Automatic,
    };

    GithubProjects {
        display: section.and_then(|github| github.display,).unwrap_or(true,),
        header: text_or(
            section.and_then(|github| github.header.as_deref(),),
            DEFAULT_GITHUB_PROJECTS_HEADER,
        ),
        mode,
        automatic: sanitize_automatic(section.and_then(|github| github.automatic.as_ref(),),),
        manual: ManualProjects {
            projects: section
                .and_then(|github| github.manual.as_ref(),)
                .and_then(|manual| manual.projects.clone(),)
                .unwrap_or_default(),
        },
    }
}

fn sanitize_automatic(section: Option<&RawAutomaticProjects,>,) -> AutomaticProjects
{
    let sort_by = match section.and_then(|automatic| present(automatic.sort_by.as_deref(),),) {
        Some(key,) if key.eq_ignore_ascii_case("updated",) => SortKey::Updated,
        _ => SortKey::Stars,
    };
    let exclude = section.and_then(|automatic| automatic.exclude.as_ref(),);

    AutomaticProjects {
        sort_by,
        limit: section
            .and_then(|automatic| automatic.limit,)
            .filter(|limit| *limit > 0,)
            .map_or(DEFAULT_PROJECT_LIMIT, |limit| limit as usize,),
        exclude: ProjectExclusions {
            forks:    exclude.and_then(|exclude| exclude.forks,).unwrap_or(false,),
            projects: exclude.and_then(|exclude| exclude.projects.clone(),).unwrap_or_default(),
        },
    }
}

fn sanitize_external_project(project: &RawExternalProject,) -> Option<ExternalProject,>
{
    Some(ExternalProject {
        title:       present(project.title.as_deref(),)?,
        description: present(project.description.as_deref(),),
        image_url:   present(project.image_url.as_deref(),),
        demo_url:    present(project.demo_url.as_deref(),),
        code_url:    present(project.code_url.as_deref(),),
        tech_stack:  project.tech_stack.clone().unwrap_or_default(),
        highlights:  project.highlights.clone().unwrap_or_default(),
        featured:    project.featured.unwrap_or(false,),
    },)
}

fn sanitize_social(social: &RawSocial,) -> Social
{
    Social {
        linkedin:      present(social.linkedin.as_deref(),),
        x:             present(social.x.as_deref(),),
        mastodon:      present(social.mastodon.as_deref(),),
        facebook:      present(social.facebook.as_deref(),),
        instagram:     present(social.instagram.as_deref(),),
        reddit:        present(social.reddit.as_deref(),),
        threads:       present(social.threads.as_deref(),),
        youtube:       present(social.youtube.as_deref(),),
        udemy:         present(social.udemy.as_deref(),),
        dribbble:      present(social.dribbble.as_deref(),),
        behance:       present(social.behance.as_deref(),),
        medium:        present(social.medium.as_deref(),),
        dev:           present(social.dev.as_deref(),),
        stackoverflow: present(social.stackoverflow.as_deref(),),
        website:       present(social.website.as_deref(),),
        phone:         present(social.phone.as_deref(),),
        email:         present(social.email.as_deref(),),
        telegram:      present(social.telegram.as_deref(),),
        research_gate: present(social.research_gate.as_deref(),),
        discord:       present(social.discord.as_deref(),),
    }
}

/// Resolves the skills union from the first element only.
fn sanitize_skills(skills: &[RawSkill],) -> Skills
{
    match skills.first() {
        None | Some(RawSkill::Name(_,),) => Skills::Flat(
            skills
                .iter()
                .filter_map(|skill| match skill {
                    RawSkill::Name(name,) => present(Some(name.as_str(),),),
                    RawSkill::Category(_,) | RawSkill::Unrecognized(_,) => None,
                },)
                .collect(),
        ),
        Some(RawSkill::Category(_,) | RawSkill::Unrecognized(_,),) => Skills::Categorized(
            skills
                .iter()
                .filter_map(|skill| match skill {
                    RawSkill::Category(group,) => Some(SkillCategory {
                        category: present(group.category.as_deref(),)?,
                        badges:   group.badges.clone().unwrap_or_default(),
                    },),
                    RawSkill::Name(_,) | RawSkill::Unrecognized(_,) => None,
                },)
                .collect(),
        ),
    }
}

fn sanitize_experience(entry: &RawExperience,) -> Option<Experience,>
{
    let experience = Experience {
        company:      present(entry.company.as_deref(),),
        position:     present(entry.position.as_deref(),),
        from:         text_or(entry.from.as_deref(), "",),
        to:           text_or(entry.to.as_deref(), "",),
        company_link: present(entry.company_link.as_deref(),),
        company_logo: present(entry.company_logo.as_deref(),),
        description:  present(entry.description.as_deref(),),
        technologies: entry.technologies.clone().unwrap_or_default(),
    };

    let identified = experience.company.is_some()
        || experience.position.is_some()
        || !experience.from.is_empty()
        || !experience.to.is_empty();
    identified.then_some(experience,)
}

fn sanitize_education(entry: &RawEducation,) -> Option<Education,>
{
    let education = Education {
        institution:      present(entry.institution.as_deref(),),
        degree:           present(entry.degree.as_deref(),),
        from:             text_or(entry.from.as_deref(), "",),
        to:               text_or(entry.to.as_deref(), "",),
        institution_link: present(entry.institution_link.as_deref(),),
        institution_logo: present(entry.institution_logo.as_deref(),),
        score:            present(entry.score.as_deref(),),
        description:      present(entry.description.as_deref(),),
    };

    let identified = education.institution.is_some()
        || education.degree.is_some()
        || !education.from.is_empty()
        || !education.to.is_empty();
    identified.then_some(education,)
}

fn sanitize_certification(entry: &RawCertification,) -> Option<Certification,>
{
    let certification = Certification {
        body: present(entry.body.as_deref(),),
        name: present(entry.name.as_deref(),),
        year: present(entry.year.as_deref(),),
        link: present(entry.link.as_deref(),),
    };

    let identified = certification.year.is_some()
        || certification.name.is_some()
        || certification.body.is_some();
    identified.then_some(certification,)
}

fn sanitize_publication(entry: &RawPublication,) -> Option<Publication,>
{
    Some(Publication {
        title:           present(entry.title.as_deref(),)?,
        conference_name: present(entry.conference_name.as_deref(),),
        journal_name:    present(entry.journal_name.as_deref(),),
        authors:         present(entry.authors.as_deref(),),
        link:            present(entry.link.as_deref(),),
        description:     present(entry.description.as_deref(),),
    },)
}

fn sanitize_blog(section: Option<&RawBlog,>,) -> Blog
{
    let username = text_or(section.and_then(|blog| blog.username.as_deref(),), "",);
    // A missing or unrecognised source hides the blog.
    let source = section.and_then(|blog| present(blog.source.as_deref(),),).and_then(|source| {
        if source.eq_ignore_ascii_case("dev",) {
            Some(BlogSource::Dev,)
        } else if source.eq_ignore_ascii_case("medium",) {
            Some(BlogSource::Medium,)
        } else {
            None
        }
    },);

    Blog {
        display: !username.is_empty() && source.is_some(),
        source: source.unwrap_or(BlogSource::Dev,),
        username,
        limit: section
            .and_then(|blog| blog.limit,)
            .filter(|limit| *limit > 0,)
            .map_or(DEFAULT_BLOG_LIMIT, |limit| limit as usize,),
    }
}

fn sanitize_github_stats(section: Option<&RawGithubStats,>,) -> GithubStats
{
    let defaults = ActivityFloors::default();
    let floors = section.and_then(|stats| stats.floors.as_ref(),);

    GithubStats {
        display:           section.and_then(|stats| stats.display,).unwrap_or(true,),
        exclude_languages: section
            .and_then(|stats| stats.exclude_languages.clone(),)
            .unwrap_or_default(),
        floors:            ActivityFloors {
            commits:       floors.and_then(|floors| floors.commits,).unwrap_or(defaults.commits,),
            pull_requests: floors
                .and_then(|floors| floors.pull_requests,)
                .unwrap_or(defaults.pull_requests,),
            issues:        floors.and_then(|floors| floors.issues,).unwrap_or(defaults.issues,),
        },
    }
}

fn sanitize_theme_config(section: Option<&RawThemeConfig,>,) -> ThemeConfig
{
    let themes = section
        .and_then(|theme| theme.themes.clone(),)
        .filter(|themes| !themes.is_empty(),)
        .unwrap_or_else(|| DEFAULT_THEMES.iter().map(|theme| (*theme).to_owned(),).collect(),);

    ThemeConfig {
        default_theme: text_or(
            section.and_then(|theme| theme.default_theme.as_deref(),),
            DEFAULT_THEMES[0],
        ),
        disable_switch: section.and_then(|theme| theme.disable_switch,).unwrap_or(false,),
        respect_prefers_color_scheme: section
            .and_then(|theme| theme.respect_prefers_color_scheme,)
            .unwrap_or(false,),
        display_avatar_ring: section.and_then(|theme| theme.display_avatar_ring,).unwrap_or(true,),
        themes,
    }
}

/// Trimmed text, or `None` when the value is missing or blank.
fn present(value: Option<&str,>,) -> Option<String,>
{
    value.map(str::trim,).filter(|value| !value.is_empty(),).map(str::to_owned,)
}

fn text_or(value: Option<&str,>, fallback: &str,) -> String
{
    present(value,).unwrap_or_else(|| fallback.to_owned(),)
}

#[cfg(test)]
mod tests
{
    use super::{
        BlogSource, DEFAULT_THEMES, ProjectMode, SanitizedConfig, Skills, SortKey, sanitize,
    };
    use crate::{config::RawConfig, error::InvalidConfig};

    fn parse(yaml: &str,) -> RawConfig
    {
        RawConfig::from_yaml(yaml,).expect("expected yaml to parse",)
    }

    fn sanitized(yaml: &str,) -> SanitizedConfig
    {
        sanitize(&parse(yaml,),).expect("expected sanitization success",)
    }

    #[test]
    fn minimal_configuration_receives_every_default()
    {
        let config = sanitized("github:\n  username: octocat\n",);

        assert_eq!(config.github.username, "octocat");
        assert!(config.projects.github.display);
        assert_eq!(config.projects.github.header, "Github Projects");
        assert_eq!(config.projects.github.mode, ProjectMode::Automatic);
        assert_eq!(config.projects.github.automatic.sort_by, SortKey::Stars);
        assert_eq!(config.projects.github.automatic.limit, 8);
        assert!(!config.projects.github.automatic.exclude.forks);
        assert!(config.projects.github.automatic.exclude.projects.is_empty());
        assert!(config.projects.github.manual.projects.is_empty());
        assert_eq!(config.projects.external.header, "My Projects");
        assert!(config.projects.external.projects.is_empty());
        assert_eq!(config.resume.file_url, "");
        assert_eq!(config.skills, Skills::Flat(Vec::new()));
        assert!(config.experiences.is_empty());
        assert!(config.educations.is_empty());
        assert!(config.certifications.is_empty());
        assert!(config.publications.is_empty());
        assert_eq!(config.hotjar.snippet_version, 6);
        assert!(config.hotjar.id.is_none());
        assert_eq!(config.blog.username, "");
        assert_eq!(config.blog.source, BlogSource::Dev);
        assert_eq!(config.blog.limit, 5);
        assert!(!config.blog.display);
        assert!(config.github_stats.display);
        assert!(config.github_stats.exclude_languages.is_empty());
        assert_eq!(config.github_stats.floors.commits, 100);
        assert_eq!(config.github_stats.floors.pull_requests, 10);
        assert_eq!(config.github_stats.floors.issues, 5);
        assert_eq!(config.theme_config.default_theme, DEFAULT_THEMES[0]);
        assert!(!config.theme_config.disable_switch);
        assert!(!config.theme_config.respect_prefers_color_scheme);
        assert!(config.theme_config.display_avatar_ring);
        assert_eq!(config.theme_config.themes.len(), DEFAULT_THEMES.len());
        assert!(config.footer.is_none());
        assert!(config.custom_bio.is_none());
        assert!(config.enable_pwa);
    }

    #[test]
    fn missing_github_section_is_invalid()
    {
        let result = sanitize(&RawConfig::default(),);
        assert_eq!(result, Err(InvalidConfig::MissingGithub));
    }

    #[test]
    fn mistyped_github_section_is_invalid()
    {
        let result = sanitize(&parse("github: octocat",),);
        assert_eq!(result, Err(InvalidConfig::MissingGithub));
    }

    #[test]
    fn blank_username_is_invalid()
    {
        let result = sanitize(&parse("github:\n  username: '   '\n",),);
        assert_eq!(result, Err(InvalidConfig::MissingUsername));
    }

    #[test]
    fn username_with_whitespace_is_invalid()
    {
        let result = sanitize(&parse("github:\n  username: octo cat\n",),);
        assert_eq!(result, Err(InvalidConfig::MalformedUsername));
    }

    #[test]
    fn username_with_url_delimiters_is_invalid()
    {
        for username in ["octo/cat", "octo?cat", "octo#cat", "../admin"] {
            let result = sanitize(&parse(&format!("github:\n  username: '{username}'\n"),),);
            assert_eq!(result, Err(InvalidConfig::MalformedUsername), "{username}");
        }
        assert!(sanitize(&parse("github:\n  username: octo-cat_42\n",),).is_ok());
    }

    #[test]
    fn sanitize_is_deterministic()
    {
        let raw = parse(
            r"
            github: { username: octocat }
            skills: [Go, Rust]
            experiences:
              - company: Acme
                from: 2020
            ",
        );

        assert_eq!(sanitize(&raw,), sanitize(&raw,));
    }

    #[test]
    fn zero_and_blank_values_fall_back_to_defaults()
    {
        let config = sanitized(
            r"
            github: { username: octocat }
            projects:
              github:
                header: '  '
                automatic: { limit: 0, sortBy: '' }
            hotjar: { snippetVersion: 0 }
            blog: { limit: 0 }
            themeConfig: { defaultTheme: '', themes: [] }
            ",
        );

        assert_eq!(config.projects.github.header, "Github Projects");
        assert_eq!(config.projects.github.automatic.limit, 8);
        assert_eq!(config.projects.github.automatic.sort_by, SortKey::Stars);
        assert_eq!(config.hotjar.snippet_version, 6);
        assert_eq!(config.blog.limit, 5);
        assert_eq!(config.theme_config.default_theme, "lofi");
        assert_eq!(config.theme_config.themes.len(), DEFAULT_THEMES.len());
    }

    #[test]
    fn explicit_values_are_preserved()
    {
        let config = sanitized(
            r"
            github: { username: ' octocat ' }
            projects:
              github:
                display: false
                mode: manual
                automatic:
                  sortBy: updated
                  limit: 3
                  exclude: { forks: true, projects: [octocat/secret] }
                manual: { projects: [octocat/a, octocat/b] }
            githubStats:
              display: false
              excludeLanguages: [HTML]
              floors: { commits: 0, pullRequests: 2 }
            themeConfig:
              defaultTheme: dracula
              disableSwitch: true
              themes: [dracula, nord]
            enablePWA: false
            ",
        );

        assert_eq!(config.github.username, "octocat");
        assert!(!config.projects.github.display);
        assert_eq!(config.projects.github.mode, ProjectMode::Manual);
        assert_eq!(config.projects.github.automatic.sort_by, SortKey::Updated);
        assert_eq!(config.projects.github.automatic.limit, 3);
        assert!(config.projects.github.automatic.exclude.forks);
        assert_eq!(config.projects.github.automatic.exclude.projects, ["octocat/secret"]);
        assert_eq!(config.projects.github.manual.projects, ["octocat/a", "octocat/b"]);
        assert!(!config.github_stats.display);
        assert_eq!(config.github_stats.exclude_languages, ["HTML"]);
        assert_eq!(config.github_stats.floors.commits, 0);
        assert_eq!(config.github_stats.floors.pull_requests, 2);
        assert_eq!(config.github_stats.floors.issues, 5);
        assert_eq!(config.theme_config.default_theme, "dracula");
        assert!(config.theme_config.disable_switch);
        assert_eq!(config.theme_config.themes, ["dracula", "nord"]);
        assert!(!config.enable_pwa);
    }

    #[test]
    fn timeline_entries_without_identifying_fields_are_dropped()
    {
        let config = sanitized(
            r"
            github: { username: octocat }
            experiences:
              - company: Acme
              - description: only a description
              - from: 2019
            educations:
              - degree: BSc
              - institutionLink: https://example.edu
            certifications:
              - year: 2021
              - link: https://example.com/cert
            publications:
              - title: Paper
              - authors: Nobody
            ",
        );

        assert_eq!(config.experiences.len(), 2);
        assert_eq!(config.experiences[1].from, "2019");
        assert_eq!(config.educations.len(), 1);
        assert_eq!(config.certifications.len(), 1);
        assert_eq!(config.publications.len(), 1);
        assert_eq!(config.publications[0].title, "Paper");
    }

    #[test]
    fn flat_skills_are_detected_from_strings()
    {
        let config = sanitized("github: { username: octocat }\nskills: [Go, Rust]\n",);
        assert_eq!(config.skills, Skills::Flat(vec!["Go".to_owned(), "Rust".to_owned()]));
    }

    #[test]
    fn categorized_skills_are_detected_from_first_element()
    {
        let config = sanitized(
            r"
            github: { username: octocat }
            skills:
              - category: Languages
                badges: [Go]
              - Stray
            ",
        );

        match config.skills {
            Skills::Categorized(categories,) => {
                assert_eq!(categories.len(), 1);
                assert_eq!(categories[0].category, "Languages");
                assert_eq!(categories[0].badges, ["Go"]);
            }
            other => panic!("expected categorized skills, got {other:?}"),
        }
    }

    #[test]
    fn empty_skills_are_flat_and_empty()
    {
        let config = sanitized("github: { username: octocat }\nskills: []\n",);
        assert_eq!(config.skills, Skills::Flat(Vec::new()));
        assert!(config.skills.is_empty());
    }

    #[test]
    fn blog_display_requires_username_and_known_source()
    {
        let medium = sanitized("github: { username: a }\nblog: { username: me, source: medium }\n",);
        assert!(medium.blog.display);
        assert_eq!(medium.blog.source, BlogSource::Medium);

        let unknown =
            sanitized("github: { username: a }\nblog: { username: me, source: hashnode }\n",);
        assert!(!unknown.blog.display);

        let anonymous = sanitized("github: { username: a }\nblog: { source: dev }\n",);
        assert!(!anonymous.blog.display);

        let sourceless = sanitized("github: { username: a }\nblog: { username: me }\n",);
        assert!(!sourceless.blog.display);
        assert_eq!(sourceless.blog.source, BlogSource::Dev);
    }

    #[test]
    fn blank_optional_text_is_absent()
    {
        let config = sanitized(
            r"
            github: { username: octocat }
            customBio: '  '
            footer: '<b>hi</b>'
            social: { email: '', linkedin: octo }
            seo: { title: Portfolio }
            googleAnalytics: { id: '' }
            hotjar: { id: 12345 }
            ",
        );

        assert!(config.custom_bio.is_none());
        assert_eq!(config.footer.as_deref(), Some("<b>hi</b>"));
        assert!(config.social.email.is_none());
        assert_eq!(config.social.linkedin.as_deref(), Some("octo"));
        assert_eq!(config.seo.title.as_deref(), Some("Portfolio"));
        assert!(config.google_analytics.id.is_none());
        assert_eq!(config.hotjar.id.as_deref(), Some("12345"));
    }

    #[test]
    fn external_projects_require_a_title()
    {
        let config = sanitized(
            r"
            github: { username: octocat }
            projects:
              external:
                header: Side Projects
                projects:
                  - title: Tool
                    techStack: [Rust]
                  - description: untitled
            ",
        );

        assert_eq!(config.projects.external.header, "Side Projects");
        assert_eq!(config.projects.external.projects.len(), 1);
        assert_eq!(config.projects.external.projects[0].tech_stack, ["Rust"]);
    }
}
