// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Render decision produced by the orchestrator.
//!
//! A view is either still [`ViewState::Loading`], a terminal
//! [`ViewState::Error`] that replaces the whole page, or
//! [`ViewState::Content`]. Content owns one [`Section`] per remotely loaded
//! panel so that a failing section degrades on its own.

use serde::Serialize;

use crate::{
    blog::Article,
    classify::ErrorDescriptor,
    github::{Profile, Repository},
    sanitizer::SanitizedConfig,
    stats::ActivityStats,
};

/// Top-level state of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState
{
    /// Remote data is still loading; the page shell uses `theme`.
    Loading
    {
        theme: String,
    },
    /// Invalid configuration or failed profile fetch; replaces the page.
    Error
    {
        error: ErrorDescriptor,
    },
    Content(Box<PageView,>,),
}

impl ViewState
{
    /// Returns the page when the view holds content.
    pub fn content(&self,) -> Option<&PageView,>
    {
        match self {
            Self::Content(page,) => Some(page.as_ref(),),
            Self::Loading {
                ..
            }
            | Self::Error {
                ..
            } => None,
        }
    }

    /// Returns the error panel when the view failed.
    pub fn error(&self,) -> Option<&ErrorDescriptor,>
    {
        match self {
            Self::Error {
                error,
            } => Some(error,),
            _ => None,
        }
    }
}

/// Loading status of a remotely populated panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Section<T,>
{
    /// Disabled by configuration; never fetched.
    Hidden,
    Loading,
    /// Data loaded; may still be empty.
    Ready(T,),
    /// Fetch failed; the panel shows a placeholder.
    Unavailable
    {
        reason: String,
    },
}

impl<T,> Section<T,>
{
    /// Returns `true` when the section is disabled by configuration.
    pub fn is_hidden(&self,) -> bool
    {
        matches!(self, Self::Hidden)
    }

    /// Returns the loaded data, if any.
    ///
    /// ```
    /// use gitfolio::Section;
    ///
    /// assert_eq!(Section::Ready(3,).ready(), Some(&3));
    /// assert!(Section::<u32,>::Hidden.ready().is_none());
    /// ```
    pub fn ready(&self,) -> Option<&T,>
    {
        match self {
            Self::Ready(value,) => Some(value,),
            _ => None,
        }
    }
}

/// Fully loaded page body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct PageView
{
    /// Configuration the page was loaded for.
    pub config:       SanitizedConfig,
    /// Active theme name.
    pub theme:        String,
    pub profile:      Profile,
    /// Projects section, already filtered, sorted and truncated.
    pub repositories: Section<Vec<Repository,>,>,
    pub stats:        Section<ActivityStats,>,
    /// Blog section, truncated to the configured limit.
    pub articles:     Section<Vec<Article,>,>,
}

/// Page column a card is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "snake_case")]
pub enum Region
{
    Sidebar,
    Main,
    Footer,
}

/// Presentational panel of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "snake_case")]
pub enum Card
{
    Details,
    Experiences,
    Educations,
    Certifications,
    Skills,
    Stats,
    GithubProjects,
    ExternalProjects,
    Publications,
    Blog,
    Footer,
}

impl Card
{
    /// Column the card is rendered in.
    ///
    /// ```
    /// use gitfolio::{Card, Region};
    ///
    /// assert_eq!(Card::Experiences.region(), Region::Sidebar);
    /// assert_eq!(Card::Blog.region(), Region::Main);
    /// ```
    pub fn region(self,) -> Region
    {
        match self {
            Self::Details | Self::Experiences | Self::Educations | Self::Certifications => {
                Region::Sidebar
            }
            Self::Skills
            | Self::Stats
            | Self::GithubProjects
            | Self::ExternalProjects
            | Self::Publications
            | Self::Blog => Region::Main,
            Self::Footer => Region::Footer,
        }
    }
}

impl PageView
{
    /// Cards to render, in page order.
    ///
    /// Config-backed cards appear only when their section is non-empty;
    /// remotely loaded cards appear unless their section is hidden.
    pub fn cards(&self,) -> Vec<Card,>
    {
        let config = &self.config;
        let candidates = [
            (Card::Details, true,),
            (Card::Experiences, !config.experiences.is_empty(),),
            (Card::Educations, !config.educations.is_empty(),),
            (Card::Certifications, !config.certifications.is_empty(),),
            (Card::Skills, !config.skills.is_empty(),),
            (Card::Stats, !self.stats.is_hidden(),),
            (Card::GithubProjects, !self.repositories.is_hidden(),),
            (Card::ExternalProjects, !config.projects.external.projects.is_empty(),),
            (Card::Publications, !config.publications.is_empty(),),
            (Card::Blog, !self.articles.is_hidden(),),
            (Card::Footer, config.footer.is_some(),),
        ];
        candidates.into_iter().filter(|(_, visible,)| *visible,).map(|(card, _,)| card,).collect()
    }

    /// Cards to render in a single region.
    pub fn cards_in(&self, region: Region,) -> Vec<Card,>
    {
        self.cards().into_iter().filter(|card| card.region() == region,).collect()
    }
}

/// Serializable output combining the state with the resolved card layout.
#[derive(Debug, Serialize,)]
pub struct RenderDocument<'a,>
{
    pub view:  &'a ViewState,
    /// Visible cards in page order; omitted unless the view holds content.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<PlacedCard,>,
}

/// Card paired with its region in the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize,)]
pub struct PlacedCard
{
    pub card:   Card,
    pub region: Region,
}

impl<'a,> RenderDocument<'a,>
{
    /// Resolves the card layout for `view`.
    pub fn new(view: &'a ViewState,) -> Self
    {
        let cards = view
            .content()
            .map(|page| {
                page.cards()
                    .into_iter()
                    .map(|card| PlacedCard {
                        card,
                        region: card.region(),
                    },)
                    .collect()
            },)
            .unwrap_or_default();
        Self {
            view,
            cards,
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::{Card, PageView, Region, RenderDocument, Section, ViewState};
    use crate::{
        classify::ErrorDescriptor,
        config::RawConfig,
        github::Profile,
        sanitizer::sanitize,
    };

    fn page(yaml: &str,) -> PageView
    {
        let raw = RawConfig::from_yaml(yaml,).expect("valid yaml",);
        PageView {
            config:       sanitize(&raw,).expect("valid config",),
            theme:        "lofi".to_owned(),
            profile:      Profile {
                login:    "acme".to_owned(),
                avatar:   String::new(),
                name:     "Acme".to_owned(),
                bio:      String::new(),
                location: String::new(),
                company:  String::new(),
            },
            repositories: Section::Ready(Vec::new(),),
            stats:        Section::Loading,
            articles:     Section::Hidden,
        }
    }

    #[test]
    fn minimal_page_shows_details_and_remote_sections()
    {
        let page = page("github: { username: acme }",);
        assert_eq!(page.cards(), vec![Card::Details, Card::Stats, Card::GithubProjects]);
    }

    #[test]
    fn populated_sections_add_cards_to_their_regions()
    {
        let page = page(
            "github: { username: acme }\n\
             skills: [Rust]\n\
             experiences: [{ company: Acme }]\n\
             publications: [{ title: Paper }]\n\
             footer: Made with care",
        );

        assert_eq!(page.cards_in(Region::Sidebar,), vec![Card::Details, Card::Experiences]);
        assert_eq!(page.cards_in(Region::Main,), vec![
            Card::Skills,
            Card::Stats,
            Card::GithubProjects,
            Card::Publications
        ]);
        assert_eq!(page.cards_in(Region::Footer,), vec![Card::Footer]);
    }

    #[test]
    fn unavailable_sections_keep_their_card()
    {
        let mut page = page("github: { username: acme }",);
        page.stats = Section::Unavailable {
            reason: "timeout".to_owned(),
        };
        assert!(page.cards().contains(&Card::Stats));
    }

    #[test]
    fn render_document_serializes_state_and_layout()
    {
        let view = ViewState::Content(Box::new(page("github: { username: acme }",),),);
        let json = serde_json::to_value(RenderDocument::new(&view,),).expect("serializable",);

        assert_eq!(json["view"]["state"], "content");
        assert_eq!(json["view"]["repositories"]["status"], "ready");
        assert_eq!(json["view"]["articles"]["status"], "hidden");
        assert_eq!(json["cards"][0]["card"], "details");
        assert_eq!(json["cards"][0]["region"], "sidebar");
    }

    #[test]
    fn error_state_has_no_cards()
    {
        let view = ViewState::Error {
            error: ErrorDescriptor::generic(),
        };
        let json = serde_json::to_value(RenderDocument::new(&view,),).expect("serializable",);
        assert_eq!(json["view"]["state"], "error");
        assert_eq!(json["view"]["error"]["title"], "Oops!!");
        assert!(json.get("cards",).is_none());
    }
}
