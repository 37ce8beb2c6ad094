//! iTunes podcast directory provider.
//!
//! Implements [`PodcastRepository`] over two public Apple endpoints: the RSS
//! generator for per-country top-podcast charts and the search API. Both
//! return JSON; the wire shapes are mapped into [`PodcastFeed`] values here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use resona_core::{CoreError, PodcastFeed, PodcastRepository, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

const ITUNES_BASE_URL: &str = "https://itunes.apple.com";

/// Default timeout for HTTP requests (10 seconds)
const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default number of retry attempts
const DEFAULT_MAX_RETRIES: u32 = 3;

const PROVIDER_NAME: &str = "itunes";

/// iTunes podcast directory client.
pub struct ItunesPodcastRepository {
    client: ClientWithMiddleware,
    base_url: String,
}

impl ItunesPodcastRepository {
    /// Create a new iTunes client with default 10-second timeout and 3 retries.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        let base_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(concat!("Resona/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(DEFAULT_MAX_RETRIES);
        let client = ClientBuilder::new(base_client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: ITUNES_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different base URL. Used by tests and mirrors.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        info!("iTunes GET: {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CoreError::FeedProviderFailed {
                provider: PROVIDER_NAME.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("iTunes returned status: {status}");
            return Err(CoreError::FeedProviderFailed {
                provider: PROVIDER_NAME.to_string(),
                reason: format!("iTunes returned status: {status}"),
            });
        }

        Ok(response.text().await?)
    }
}

/// Wire shape of the RSS top-podcasts response. Apple nests every scalar in a
/// `label` object; only the fields mapped into [`PodcastFeed`] are declared,
/// serde ignores the rest.
#[derive(Debug, Deserialize)]
struct RssResponse {
    feed: RssFeed,
}

#[derive(Debug, Deserialize)]
struct RssFeed {
    #[serde(default)]
    entry: Vec<RssEntry>,
}

#[derive(Debug, Deserialize)]
struct RssEntry {
    #[serde(rename = "im:name")]
    name: Label,
    #[serde(rename = "im:artist")]
    artist: Option<Label>,
    #[serde(rename = "im:image", default)]
    images: Vec<Label>,
    id: RssId,
    category: Option<Category>,
    #[serde(rename = "im:releaseDate")]
    release_date: Option<Label>,
}

#[derive(Debug, Deserialize)]
struct Label {
    label: String,
}

#[derive(Debug, Deserialize)]
struct RssId {
    attributes: RssIdAttributes,
}

#[derive(Debug, Deserialize)]
struct RssIdAttributes {
    #[serde(rename = "im:id")]
    im_id: String,
}

#[derive(Debug, Deserialize)]
struct Category {
    attributes: CategoryAttributes,
}

#[derive(Debug, Deserialize)]
struct CategoryAttributes {
    label: String,
}

/// Wire shape of the search API response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    collection_id: u64,
    collection_name: String,
    #[serde(default)]
    artist_name: String,
    artwork_url600: Option<String>,
    primary_genre_name: Option<String>,
    release_date: Option<String>,
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

fn parse_top_feeds(body: &str) -> Result<Vec<PodcastFeed>> {
    let response: RssResponse =
        serde_json::from_str(body).map_err(|e| CoreError::FeedParseError {
            reason: e.to_string(),
        })?;

    Ok(response
        .feed
        .entry
        .into_iter()
        .map(|entry| {
            let mut feed = PodcastFeed::new(
                entry.id.attributes.im_id,
                entry.name.label,
                entry.artist.map(|a| a.label).unwrap_or_default(),
            );
            // Images are ordered smallest to largest; keep the largest.
            if let Some(image) = entry.images.into_iter().next_back() {
                feed = feed.with_artwork_url(image.label);
            }
            if let Some(category) = entry.category {
                feed = feed.with_genre(category.attributes.label);
            }
            if let Some(date) = entry.release_date.as_ref().and_then(|d| parse_date(&d.label)) {
                feed = feed.with_release_date(date);
            }
            feed
        })
        .collect())
}

fn parse_search(body: &str) -> Result<Vec<PodcastFeed>> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| CoreError::FeedParseError {
            reason: e.to_string(),
        })?;

    Ok(response
        .results
        .into_iter()
        .map(|result| {
            let mut feed = PodcastFeed::new(
                result.collection_id.to_string(),
                result.collection_name,
                result.artist_name,
            );
            if let Some(url) = result.artwork_url600 {
                feed = feed.with_artwork_url(url);
            }
            if let Some(genre) = result.primary_genre_name {
                feed = feed.with_genre(genre);
            }
            if let Some(date) = result.release_date.as_deref().and_then(parse_date) {
                feed = feed.with_release_date(date);
            }
            feed
        })
        .collect())
}

#[async_trait]
impl PodcastRepository for ItunesPodcastRepository {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn top_feeds(&self, country: &str, limit: usize) -> Result<Vec<PodcastFeed>> {
        let url = format!(
            "{}/{}/rss/toppodcasts/limit={limit}/json",
            self.base_url,
            urlencoding::encode(country)
        );

        let body = self.get_text(&url).await?;
        let feeds = parse_top_feeds(&body)?;
        info!("iTunes chart for {country} returned {} feeds", feeds.len());
        Ok(feeds)
    }

    async fn search(&self, term: &str, limit: usize) -> Result<Vec<PodcastFeed>> {
        let url = format!(
            "{}/search?media=podcast&term={}&limit={limit}",
            self.base_url,
            urlencoding::encode(term)
        );

        let body = self.get_text(&url).await?;
        let feeds = parse_search(&body)?;
        info!("iTunes search for {term:?} returned {} feeds", feeds.len());
        Ok(feeds)
    }
}
