//! Podcast feed value types used by the discover screen.

use chrono::{DateTime, Utc};

/// A podcast feed entry as surfaced by a directory provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodcastFeed {
    /// Directory-specific feed identifier (string-typed; formats differ per
    /// directory and are treated as opaque)
    pub id: String,
    /// Feed title
    pub title: String,
    /// Publisher or author name
    pub author: String,
    /// Remote artwork image, if the directory provided one
    pub artwork_url: Option<String>,
    /// Primary genre label
    pub genre: Option<String>,
    /// Most recent episode release date
    pub release_date: Option<DateTime<Utc>>,
}

impl PodcastFeed {
    /// Create a new feed entry with no artwork, genre, or release date.
    pub fn new(id: impl Into<String>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            artwork_url: None,
            genre: None,
            release_date: None,
        }
    }

    /// Set the artwork URL.
    #[must_use]
    pub fn with_artwork_url(mut self, url: impl Into<String>) -> Self {
        self.artwork_url = Some(url.into());
        self
    }

    /// Set the genre label.
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Set the release date.
    #[must_use]
    pub const fn with_release_date(mut self, date: DateTime<Utc>) -> Self {
        self.release_date = Some(date);
        self
    }
}
