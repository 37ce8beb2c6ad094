//! Data-access collaborator traits consumed by the feature view-models.

use crate::error::Result;
use crate::music::{Album, AlbumId, Artist, ArtistId, Song, SongId};
use crate::player::{RepeatMode, ShuffleMode};
use crate::podcast::PodcastFeed;
use async_trait::async_trait;

/// Music library access plus playback-mode persistence.
///
/// Lookups are asynchronous and may suspend the caller; an absent entity is
/// reported as `None`, and any lower-level lookup fault is expected to be
/// handled (logged, swallowed) by the implementation rather than surfaced.
/// Mode setters likewise report nothing back: a failed write is not
/// observable to the caller.
#[async_trait]
pub trait MusicRepository: Send + Sync {
    /// Look up a song by id.
    async fn song(&self, id: SongId) -> Option<Song>;

    /// Look up an album, including its songs in track order.
    async fn album(&self, id: AlbumId) -> Option<Album>;

    /// Look up an artist, including their albums.
    async fn artist(&self, id: ArtistId) -> Option<Artist>;

    /// Current shuffle mode.
    fn shuffle_mode(&self) -> ShuffleMode;

    /// Persist a new shuffle mode. Failures are not observable to the caller.
    async fn set_shuffle_mode(&self, mode: ShuffleMode);

    /// Current repeat mode.
    fn repeat_mode(&self) -> RepeatMode;

    /// Persist a new repeat mode. Failures are not observable to the caller.
    async fn set_repeat_mode(&self, mode: RepeatMode);
}

/// Podcast directory access for the discover screen.
#[async_trait]
pub trait PodcastRepository: Send + Sync {
    /// Returns a human-readable name for this directory.
    fn name(&self) -> &'static str;

    /// Top feeds for a country, most popular first.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be reached or its response
    /// cannot be parsed.
    async fn top_feeds(&self, country: &str, limit: usize) -> Result<Vec<PodcastFeed>>;

    /// Search the directory for feeds matching `term`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be reached or its response
    /// cannot be parsed.
    async fn search(&self, term: &str, limit: usize) -> Result<Vec<PodcastFeed>>;
}
