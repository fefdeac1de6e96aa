// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Raw configuration document describing a portfolio page.
//!
//! The types in this module mirror the structure of the YAML documents
//! authored by users. Every value is optional and decoded leniently: a field
//! of the wrong type is read as absent rather than failing the document. The
//! sanitizer in [`crate::sanitize`] is responsible for turning these loose
//! values into the fully defaulted view model.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{self, Error},
    lenient,
};

/// Root configuration document.
///
/// # Examples
///
/// ```
/// use gitfolio::RawConfig;
///
/// let yaml = r#"
/// github:
///   username: octocat
/// projects:
///   github:
///     automatic:
///       limit: 4
/// "#;
/// let config = RawConfig::from_yaml(yaml,).expect("valid configuration",);
/// assert_eq!(config.github.and_then(|github| github.username).as_deref(), Some("octocat"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig
{
    /// GitHub account the page is built for.
    #[serde(default, deserialize_with = "lenient::section")]
    pub github:           Option<RawGithub,>,
    /// GitHub and external project sections.
    #[serde(default, deserialize_with = "lenient::section")]
    pub projects:         Option<RawProjects,>,
    /// Search engine metadata.
    #[serde(default, deserialize_with = "lenient::section")]
    pub seo:              Option<RawSeo,>,
    /// Bio replacing the one fetched from the GitHub profile.
    #[serde(default, alias = "custom_bio", deserialize_with = "lenient::text")]
    pub custom_bio:       Option<String,>,
    /// Social handles rendered in the details card.
    #[serde(default, deserialize_with = "lenient::section")]
    pub social:           Option<RawSocial,>,
    /// Downloadable resume.
    #[serde(default, deserialize_with = "lenient::section")]
    pub resume:           Option<RawResume,>,
    /// Either a flat list of names or a list of categorized groups.
    #[serde(default, deserialize_with = "lenient::list")]
    pub skills:           Option<Vec<RawSkill,>,>,
    /// Work history entries.
    #[serde(default, deserialize_with = "lenient::list")]
    pub experiences:      Option<Vec<RawExperience,>,>,
    /// Certifications.
    #[serde(default, deserialize_with = "lenient::list")]
    pub certifications:   Option<Vec<RawCertification,>,>,
    /// Education history entries.
    #[serde(default, deserialize_with = "lenient::list")]
    pub educations:       Option<Vec<RawEducation,>,>,
    /// Publications.
    #[serde(default, deserialize_with = "lenient::list")]
    pub publications:     Option<Vec<RawPublication,>,>,
    /// Google Analytics tracking id.
    #[serde(default, alias = "google_analytics", deserialize_with = "lenient::section")]
    pub google_analytics: Option<RawGoogleAnalytics,>,
    /// Hotjar tracking settings.
    #[serde(default, deserialize_with = "lenient::section")]
    pub hotjar:           Option<RawHotjar,>,
    /// Blog feed settings.
    #[serde(default, deserialize_with = "lenient::section")]
    pub blog:             Option<RawBlog,>,
    /// GitHub statistics card settings.
    #[serde(default, alias = "github_stats", deserialize_with = "lenient::section")]
    pub github_stats:     Option<RawGithubStats,>,
    /// Theme selection settings.
    #[serde(default, alias = "theme_config", deserialize_with = "lenient::section")]
    pub theme_config:     Option<RawThemeConfig,>,
    /// Footer markup.
    #[serde(default, deserialize_with = "lenient::text")]
    pub footer:           Option<String,>,
    /// Whether the page is packaged as a progressive web app.
    #[serde(default, rename = "enablePWA", alias = "enable_pwa", deserialize_with = "lenient::flag")]
    pub enable_pwa:       Option<bool,>,
}

impl RawConfig
{
    /// Parses a configuration document from YAML (or JSON) text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the text is not valid YAML or its top
    /// level is not a mapping keyed by text. Values below the top level never
    /// fail the parse: a malformed one is read as absent.
    pub fn from_yaml(contents: &str,) -> Result<Self, Error,>
    {
        Ok(serde_yaml::from_str(contents,)?,)
    }
}

/// Loads a configuration document from the provided path.
///
/// # Errors
///
/// Returns an [`Error::Io`] when the file cannot be read and
/// [`Error::Parse`] when it cannot be decoded.
pub fn load_config(path: &Path,) -> Result<RawConfig, Error,>
{
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    RawConfig::from_yaml(&contents,)
}

/// `github` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
pub struct RawGithub
{
    /// Account login.
    #[serde(default, alias = "user", deserialize_with = "lenient::text")]
    pub username: Option<String,>,
}

/// `projects` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
pub struct RawProjects
{
    /// Repositories pulled from GitHub.
    #[serde(default, deserialize_with = "lenient::section")]
    pub github:   Option<RawGithubProjects,>,
    /// Hand-written project entries.
    #[serde(default, deserialize_with = "lenient::section")]
    pub external: Option<RawExternalProjects,>,
}

/// `projects.github` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
pub struct RawGithubProjects
{
    #[serde(default, deserialize_with = "lenient::flag")]
    pub display:   Option<bool,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub header:    Option<String,>,
    /// `automatic` or `manual`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub mode:      Option<String,>,
    #[serde(default, deserialize_with = "lenient::section")]
    pub automatic: Option<RawAutomaticProjects,>,
    #[serde(default, deserialize_with = "lenient::section")]
    pub manual:    Option<RawManualProjects,>,
}

/// `projects.github.automatic` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct RawAutomaticProjects
{
    /// `stars` or `updated`.
    #[serde(default, alias = "sort_by", deserialize_with = "lenient::text")]
    pub sort_by: Option<String,>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub limit:   Option<u32,>,
    #[serde(default, deserialize_with = "lenient::section")]
    pub exclude: Option<RawProjectExclusions,>,
}

/// `projects.github.automatic.exclude` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
pub struct RawProjectExclusions
{
    #[serde(default, deserialize_with = "lenient::flag")]
    pub forks:    Option<bool,>,
    /// Repository names (`name` or `owner/name`) hidden from the list.
    #[serde(default, deserialize_with = "lenient::strings")]
    pub projects: Option<Vec<String,>,>,
}

/// `projects.github.manual` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
pub struct RawManualProjects
{
    /// Repositories in `owner/name` form, rendered in the listed order.
    #[serde(default, deserialize_with = "lenient::strings")]
    pub projects: Option<Vec<String,>,>,
}

/// `projects.external` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
pub struct RawExternalProjects
{
    #[serde(default, deserialize_with = "lenient::text")]
    pub header:   Option<String,>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub projects: Option<Vec<RawExternalProject,>,>,
}

/// Hand-written project entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct RawExternalProject
{
    #[serde(default, deserialize_with = "lenient::text")]
    pub title:       Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String,>,
    #[serde(default, alias = "image_url", deserialize_with = "lenient::text")]
    pub image_url:   Option<String,>,
    #[serde(default, alias = "link", deserialize_with = "lenient::text")]
    pub demo_url:    Option<String,>,
    #[serde(default, alias = "code_url", deserialize_with = "lenient::text")]
    pub code_url:    Option<String,>,
    #[serde(default, alias = "tech_stack", deserialize_with = "lenient::strings")]
    pub tech_stack:  Option<Vec<String,>,>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub highlights:  Option<Vec<String,>,>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub featured:    Option<bool,>,
}

/// `seo` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
pub struct RawSeo
{
    #[serde(default, deserialize_with = "lenient::text")]
    pub title:       Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String,>,
    #[serde(default, rename = "imageURL", alias = "image_url", deserialize_with = "lenient::text")]
    pub image_url:   Option<String,>,
}

/// `social` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct RawSocial
{
    #[serde(default, deserialize_with = "lenient::text")]
    pub linkedin:      Option<String,>,
    #[serde(default, alias = "twitter", deserialize_with = "lenient::text")]
    pub x:             Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub mastodon:      Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub facebook:      Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub instagram:     Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub reddit:        Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub threads:       Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub youtube:       Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub udemy:         Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub dribbble:      Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub behance:       Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub medium:        Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub dev:           Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub stackoverflow: Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub website:       Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub phone:         Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub email:         Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub telegram:      Option<String,>,
    #[serde(default, alias = "research_gate", deserialize_with = "lenient::text")]
    pub research_gate: Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub discord:       Option<String,>,
}

/// `resume` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct RawResume
{
    #[serde(default, alias = "file_url", deserialize_with = "lenient::text")]
    pub file_url: Option<String,>,
}

/// One element of the `skills` list.
///
/// The list is a structural union: plain names in the legacy shape, or
/// category groups. Anything else is kept as [`RawSkill::Unrecognized`] so
/// the sanitizer can still inspect the first element's shape.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize,)]
#[serde(untagged)]
pub enum RawSkill
{
    /// Legacy flat entry.
    Name(String,),
    /// Categorized group of badges.
    Category(RawSkillCategory,),
    /// Any other shape.
    Unrecognized(Value,),
}

/// Categorized skill group.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize,)]
pub struct RawSkillCategory
{
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: Option<String,>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub badges:   Option<Vec<String,>,>,
}

/// Work history entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct RawExperience
{
    #[serde(default, deserialize_with = "lenient::text")]
    pub company:      Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub position:     Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub from:         Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub to:           Option<String,>,
    #[serde(default, alias = "company_link", deserialize_with = "lenient::text")]
    pub company_link: Option<String,>,
    #[serde(default, alias = "company_logo", deserialize_with = "lenient::text")]
    pub company_logo: Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description:  Option<String,>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub technologies: Option<Vec<String,>,>,
}

/// Certification entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
pub struct RawCertification
{
    #[serde(default, deserialize_with = "lenient::text")]
    pub body: Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub year: Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub link: Option<String,>,
}

/// Education history entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct RawEducation
{
    #[serde(default, deserialize_with = "lenient::text")]
    pub institution:      Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub degree:           Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub from:             Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub to:               Option<String,>,
    #[serde(default, alias = "institution_link", deserialize_with = "lenient::text")]
    pub institution_link: Option<String,>,
    #[serde(default, alias = "institution_logo", deserialize_with = "lenient::text")]
    pub institution_logo: Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub score:            Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description:      Option<String,>,
}

/// Publication entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct RawPublication
{
    #[serde(default, deserialize_with = "lenient::text")]
    pub title:           Option<String,>,
    #[serde(default, alias = "conference_name", deserialize_with = "lenient::text")]
    pub conference_name: Option<String,>,
    #[serde(default, alias = "journal_name", deserialize_with = "lenient::text")]
    pub journal_name:    Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub authors:         Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub link:            Option<String,>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description:     Option<String,>,
}

/// `googleAnalytics` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
pub struct RawGoogleAnalytics
{
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String,>,
}

/// `hotjar` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct RawHotjar
{
    #[serde(default, deserialize_with = "lenient::text")]
    pub id:              Option<String,>,
    #[serde(default, alias = "snippet_version", deserialize_with = "lenient::count")]
    pub snippet_version: Option<u32,>,
}

/// `blog` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
pub struct RawBlog
{
    #[serde(default, deserialize_with = "lenient::text")]
    pub username: Option<String,>,
    /// `dev` or `medium`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub source:   Option<String,>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub limit:    Option<u32,>,
}

/// `githubStats` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct RawGithubStats
{
    #[serde(default, deserialize_with = "lenient::flag")]
    pub display:           Option<bool,>,
    #[serde(default, alias = "exclude_languages", deserialize_with = "lenient::strings")]
    pub exclude_languages: Option<Vec<String,>,>,
    /// Minimum displayed activity counts.
    #[serde(default, deserialize_with = "lenient::section")]
    pub floors:            Option<RawActivityFloors,>,
}

/// `githubStats.floors` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct RawActivityFloors
{
    #[serde(default, deserialize_with = "lenient::count")]
    pub commits:       Option<u32,>,
    #[serde(default, alias = "pull_requests", deserialize_with = "lenient::count")]
    pub pull_requests: Option<u32,>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub issues:        Option<u32,>,
}

/// `themeConfig` section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct RawThemeConfig
{
    #[serde(default, alias = "default_theme", deserialize_with = "lenient::text")]
    pub default_theme:                Option<String,>,
    #[serde(default, alias = "disable_switch", deserialize_with = "lenient::flag")]
    pub disable_switch:               Option<bool,>,
    #[serde(default, alias = "respect_prefers_color_scheme", deserialize_with = "lenient::flag")]
    pub respect_prefers_color_scheme: Option<bool,>,
    #[serde(default, alias = "display_avatar_ring", deserialize_with = "lenient::flag")]
    pub display_avatar_ring:          Option<bool,>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub themes:                       Option<Vec<String,>,>,
}

#[cfg(test)]
mod tests
{
    use std::io::Write;

    use super::{RawConfig, RawSkill, load_config};
    use crate::Error;

    #[test]
    fn parses_camel_case_document()
    {
        let yaml = r"
            github:
              username: octocat
            projects:
              github:
                mode: manual
                automatic:
                  sortBy: updated
                  limit: 3
                  exclude:
                    forks: true
                    projects: [octocat/private]
            hotjar:
              snippetVersion: 7
            themeConfig:
              defaultTheme: dark
            enablePWA: false
        ";

        let config = RawConfig::from_yaml(yaml,).expect("expected parse success",);
        let github_projects =
            config.projects.and_then(|projects| projects.github,).expect("github projects",);
        assert_eq!(github_projects.mode.as_deref(), Some("manual"));
        let automatic = github_projects.automatic.expect("automatic section",);
        assert_eq!(automatic.sort_by.as_deref(), Some("updated"));
        assert_eq!(automatic.limit, Some(3));
        let exclude = automatic.exclude.expect("exclude section",);
        assert_eq!(exclude.forks, Some(true));
        assert_eq!(exclude.projects, Some(vec!["octocat/private".to_owned()]));
        assert_eq!(config.hotjar.and_then(|hotjar| hotjar.snippet_version), Some(7));
        assert_eq!(
            config.theme_config.and_then(|theme| theme.default_theme).as_deref(),
            Some("dark")
        );
        assert_eq!(config.enable_pwa, Some(false));
    }

    #[test]
    fn snake_case_aliases_are_accepted()
    {
        let yaml = r"
            github:
              username: octocat
            custom_bio: hello
            github_stats:
              exclude_languages: [HTML]
        ";

        let config = RawConfig::from_yaml(yaml,).expect("expected parse success",);
        assert_eq!(config.custom_bio.as_deref(), Some("hello"));
        assert_eq!(
            config.github_stats.and_then(|stats| stats.exclude_languages),
            Some(vec!["HTML".to_owned()])
        );
    }

    #[test]
    fn mistyped_sections_are_read_as_absent()
    {
        let yaml = r"
            github:
              username: octocat
            projects: just-a-string
            blog:
              limit: many
            experiences:
              - company: Acme
              - 42
        ";

        let config = RawConfig::from_yaml(yaml,).expect("expected parse success",);
        assert!(config.projects.is_none());
        assert!(config.blog.expect("blog section").limit.is_none());
        assert_eq!(config.experiences.map(|entries| entries.len()), Some(1));
    }

    #[test]
    fn skills_keep_their_structural_shape()
    {
        let yaml = r"
            skills:
              - category: Languages
                badges: [Go, Rust]
              - Plain
              - 42
        ";

        let config = RawConfig::from_yaml(yaml,).expect("expected parse success",);
        let skills = config.skills.expect("skills",);
        assert!(matches!(skills[0], RawSkill::Category(_)));
        assert!(matches!(skills[1], RawSkill::Name(_)));
        assert!(matches!(skills[2], RawSkill::Unrecognized(_)));
    }

    #[test]
    fn sections_with_sequence_keys_are_read_as_absent()
    {
        let yaml = "github:\n  username: octocat\nsocial:\n  ? [a]\n  : x\n  linkedin: me\n";

        let config = RawConfig::from_yaml(yaml,).expect("expected parse success",);
        assert!(config.social.is_none());
        assert_eq!(config.github.and_then(|github| github.username).as_deref(), Some("octocat"));
    }

    #[test]
    fn sequence_keys_at_the_top_level_are_rejected()
    {
        let result = RawConfig::from_yaml("github: { username: a }\n? [a]\n: x\n",);
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn non_mapping_documents_are_rejected()
    {
        let result = RawConfig::from_yaml("- just\n- a list\n",);
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn load_config_reads_document_from_disk()
    {
        let mut file = tempfile::NamedTempFile::new().expect("expected temp file",);
        write!(file, "github:\n  username: octocat\n").expect("expected write to succeed",);

        let config = load_config(file.path(),).expect("expected load to succeed",);
        assert_eq!(config.github.and_then(|github| github.username).as_deref(), Some("octocat"));
    }

    #[test]
    fn load_config_reports_io_errors()
    {
        let path = std::path::Path::new("/nonexistent/gitfolio.yaml",);
        let error = load_config(path,).expect_err("expected io error",);
        assert!(matches!(error, Error::Io { .. }));
    }
}
