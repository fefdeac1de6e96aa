// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Article fetchers for the blog section (dev.to and Medium).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::{Error, FetchFailure},
    sanitizer::{Blog, BlogSource},
};

/// Public dev.to API root.
pub const DEV_API_BASE: &str = "https://dev.to";
/// rss2json bridge used to read Medium feeds as JSON.
pub const MEDIUM_API_BASE: &str = "https://api.rss2json.com";

/// Article as rendered in the blog card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(rename_all = "camelCase")]
pub struct Article
{
    pub title:        String,
    pub link:         String,
    /// Publication timestamp as reported by the platform.
    pub published_at: String,
    /// Plain text; markup is stripped from Medium descriptions.
    pub description:  String,
    pub thumbnail:    Option<String,>,
    pub categories:   Vec<String,>,
}

#[derive(Debug, Deserialize,)]
struct DevArticle
{
    title:        String,
    url:          String,
    #[serde(default)]
    published_at: Option<String,>,
    #[serde(default)]
    description:  Option<String,>,
    #[serde(default)]
    cover_image:  Option<String,>,
    #[serde(default)]
    social_image: Option<String,>,
    #[serde(default)]
    tag_list:     Vec<String,>,
}

impl From<DevArticle,> for Article
{
    fn from(article: DevArticle,) -> Self
    {
        Self {
            title:        article.title,
            link:         article.url,
            published_at: article.published_at.unwrap_or_default(),
            description:  article.description.unwrap_or_default(),
            thumbnail:    article.cover_image.or(article.social_image,),
            categories:   article.tag_list,
        }
    }
}

#[derive(Debug, Deserialize,)]
struct MediumFeed
{
    #[serde(default)]
    items: Vec<MediumItem,>,
}

#[derive(Debug, Deserialize,)]
struct MediumItem
{
    title:       String,
    link:        String,
    #[serde(default, rename = "pubDate")]
    pub_date:    Option<String,>,
    #[serde(default)]
    description: Option<String,>,
    #[serde(default)]
    thumbnail:   Option<String,>,
    #[serde(default)]
    categories:  Vec<String,>,
}

impl From<MediumItem,> for Article
{
    fn from(item: MediumItem,) -> Self
    {
        Self {
            title:        item.title,
            link:         item.link,
            published_at: item.pub_date.unwrap_or_default(),
            description:  strip_markup(item.description.as_deref().unwrap_or_default(),),
            thumbnail:    item.thumbnail.filter(|url| !url.trim().is_empty(),),
            categories:   item.categories,
        }
    }
}

/// HTTP client for the supported publishing platforms.
#[derive(Debug, Clone,)]
pub struct BlogClient
{
    http:        reqwest::Client,
    dev_base:    String,
    medium_base: String,
}

impl BlogClient
{
    /// Builds a client targeting the public platforms.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, Error,>
    {
        Self::with_base_urls(DEV_API_BASE, MEDIUM_API_BASE,)
    }

    /// Builds a client with alternative API roots.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when the HTTP client cannot be initialized.
    pub fn with_base_urls(dev_base: &str, medium_base: &str,) -> Result<Self, Error,>
    {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gitfolio/", env!("CARGO_PKG_VERSION")),)
            .build()
            .map_err(|e| Error::service(format!("failed to initialize blog client: {e}"),),)?;
        Ok(Self {
            http,
            dev_base: dev_base.trim_end_matches('/',).to_owned(),
            medium_base: medium_base.trim_end_matches('/',).to_owned(),
        },)
    }

    /// Fetches the latest articles for the configured account, keeping at
    /// most `blog.limit` of them.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchFailure`] when the platform cannot be reached, answers
    /// with a non-success status or returns an unexpected body.
    pub async fn articles(&self, blog: &Blog,) -> Result<Vec<Article,>, FetchFailure,>
    {
        let mut articles = match blog.source {
            BlogSource::Dev => self.dev_articles(&blog.username,).await?,
            BlogSource::Medium => self.medium_articles(&blog.username,).await?,
        };
        articles.truncate(blog.limit,);
        debug!("Fetched {} articles for {}", articles.len(), blog.username);
        Ok(articles,)
    }

    async fn dev_articles(&self, username: &str,) -> Result<Vec<Article,>, FetchFailure,>
    {
        let url = format!("{}/api/articles", self.dev_base);
        let articles: Vec<DevArticle,> = self.get_json(&url, &[("username", username,)],).await?;
        Ok(articles.into_iter().map(Article::from,).collect(),)
    }

    async fn medium_articles(&self, username: &str,) -> Result<Vec<Article,>, FetchFailure,>
    {
        let url = format!("{}/v1/api.json", self.medium_base);
        let feed_url = format!("https://medium.com/feed/@{username}");
        let feed: MediumFeed = self.get_json(&url, &[("rss_url", feed_url.as_str(),)],).await?;
        Ok(feed.items.into_iter().map(Article::from,).collect(),)
    }

    async fn get_json<T,>(&self, url: &str, query: &[(&str, &str,)],) -> Result<T, FetchFailure,>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.http.get(url,).query(query,).send().await.map_err(|e| {
            FetchFailure::Transport {
                message: e.to_string(),
            }
        },)?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {} failed with status {}", url, status);
            return Err(FetchFailure::status(status.as_u16(),),);
        }

        response.json::<T,>().await.map_err(|e| FetchFailure::Decode {
            message: e.to_string(),
        },)
    }
}

/// Removes HTML tags, decodes character references and collapses whitespace.
fn strip_markup(html: &str,) -> String
{
    let mut text = String::with_capacity(html.len(),);
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ',);
            }
            _ if !in_tag => text.push(ch,),
            _ => {}
        }
    }
    decode_entities(&text,).split_whitespace().collect::<Vec<_,>>().join(" ",)
}

/// Longest reference body considered, e.g. `#x10FFFF`.
const MAX_ENTITY_LEN: usize = 8;

/// Replaces named and numeric character references. Unknown references are
/// kept verbatim.
fn decode_entities(text: &str,) -> String
{
    let mut decoded = String::with_capacity(text.len(),);
    let mut rest = text;
    while let Some(start,) = rest.find('&',) {
        decoded.push_str(&rest[..start],);
        let tail = &rest[start + 1..];
        let reference = tail
            .find(';',)
            .filter(|end| *end <= MAX_ENTITY_LEN,)
            .and_then(|end| entity(&tail[..end],).map(|ch| (ch, end,),),);
        match reference {
            Some((ch, end,),) => {
                decoded.push(ch,);
                rest = &tail[end + 1..];
            }
            None => {
                decoded.push('&',);
                rest = tail;
            }
        }
    }
    decoded.push_str(rest,);
    decoded
}

fn entity(name: &str,) -> Option<char,>
{
    match name {
        "amp" => Some('&',),
        "lt" => Some('<',),
        "gt" => Some('>',),
        "quot" => Some('"',),
        "apos" => Some('\'',),
        "nbsp" => Some(' ',),
        _ => {
            let number = name.strip_prefix('#',)?;
            let code = match number.strip_prefix(['x', 'X',],) {
                Some(hex,) => u32::from_str_radix(hex, 16,).ok()?,
                None => number.parse::<u32,>().ok()?,
            };
            char::from_u32(code,)
        }
    }
}

#[cfg(test)]
mod tests
{
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use super::{BlogClient, strip_markup};
    use crate::{
        error::FetchFailure,
        sanitizer::{Blog, BlogSource},
    };

    fn blog(source: BlogSource, limit: usize,) -> Blog
    {
        Blog {
            display: true,
            source,
            username: "acme".to_owned(),
            limit,
        }
    }

    #[test]
    fn markup_is_stripped_and_whitespace_collapsed()
    {
        assert_eq!(
            strip_markup("<p>Hello <b>world</b></p>\n<figure><img src=\"x\"></figure>Bye",),
            "Hello world Bye"
        );
    }

    #[test]
    fn character_references_are_decoded_after_tags_are_removed()
    {
        assert_eq!(
            strip_markup("<p>Tom &amp; Jerry&#39;s &lt;b&gt;&nbsp;&#x2764;</p> AT&T &bogus;",),
            "Tom & Jerry's <b> \u{2764} AT&T &bogus;"
        );
    }

    #[tokio::test]
    async fn dev_articles_are_mapped_and_truncated()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/api/articles",),)
            .and(query_param("username", "acme",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!([
                {
                    "title": "First",
                    "url": "https://dev.to/acme/first",
                    "published_at": "2024-05-01T10:00:00Z",
                    "description": "Intro",
                    "cover_image": null,
                    "social_image": "https://dev.to/social.png",
                    "tag_list": ["rust", "async"]
                },
                { "title": "Second", "url": "https://dev.to/acme/second" },
                { "title": "Third", "url": "https://dev.to/acme/third" }
            ]),),)
            .mount(&server,)
            .await;

        let client = BlogClient::with_base_urls(&server.uri(), &server.uri(),).expect("client",);
        let articles = client.articles(&blog(BlogSource::Dev, 2,),).await.expect("articles",);

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].thumbnail.as_deref(), Some("https://dev.to/social.png"));
        assert_eq!(articles[0].categories, vec!["rust".to_owned(), "async".to_owned()]);
        assert_eq!(articles[1].published_at, "");
    }

    #[tokio::test]
    async fn medium_feed_is_read_through_the_bridge()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/v1/api.json",),)
            .and(query_param("rss_url", "https://medium.com/feed/@acme",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!({
                "status": "ok",
                "items": [{
                    "title": "Post",
                    "link": "https://medium.com/@acme/post",
                    "pubDate": "2024-05-01 10:00:00",
                    "thumbnail": "",
                    "description": "<p>Body <em>text</em></p>",
                    "categories": ["rust"]
                }]
            }),),)
            .mount(&server,)
            .await;

        let client = BlogClient::with_base_urls(&server.uri(), &server.uri(),).expect("client",);
        let articles = client.articles(&blog(BlogSource::Medium, 5,),).await.expect("articles",);

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].description, "Body text");
        assert!(articles[0].thumbnail.is_none());
    }

    #[tokio::test]
    async fn server_errors_surface_their_status()
    {
        let server = MockServer::start().await;
        Mock::given(method("GET",),)
            .and(path("/api/articles",),)
            .respond_with(ResponseTemplate::new(503,),)
            .mount(&server,)
            .await;

        let client = BlogClient::with_base_urls(&server.uri(), &server.uri(),).expect("client",);
        let failure = client.articles(&blog(BlogSource::Dev, 5,),).await.expect_err("503",);
        assert_eq!(failure, FetchFailure::status(503,));
    }
}
