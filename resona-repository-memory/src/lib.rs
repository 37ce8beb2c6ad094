//! In-memory repository implementations.
//!
//! These back the feature view-models in tests and in embedders that load a
//! library up front instead of querying a media store on demand.

use async_trait::async_trait;
use resona_core::{
    Album, AlbumId, Artist, ArtistId, CoreError, MusicRepository, PodcastFeed, PodcastRepository,
    RepeatMode, Result, ShuffleMode, Song, SongId,
};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::warn;

/// Playback modes held alongside the library.
#[derive(Debug, Default)]
struct Modes {
    shuffle: ShuffleMode,
    repeat: RepeatMode,
}

/// A `MusicRepository` over maps populated at construction time.
#[derive(Debug, Default)]
pub struct MemoryMusicRepository {
    songs: HashMap<SongId, Song>,
    albums: HashMap<AlbumId, Album>,
    artists: HashMap<ArtistId, Artist>,
    modes: RwLock<Modes>,
}

impl MemoryMusicRepository {
    /// Create an empty repository with default playback modes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add songs, keyed by their ids.
    #[must_use]
    pub fn with_songs(mut self, songs: impl IntoIterator<Item = Song>) -> Self {
        self.songs.extend(songs.into_iter().map(|s| (s.id, s)));
        self
    }

    /// Add albums, keyed by their ids. Album songs are also indexed as songs.
    #[must_use]
    pub fn with_albums(mut self, albums: impl IntoIterator<Item = Album>) -> Self {
        for album in albums {
            self.songs
                .extend(album.songs.iter().cloned().map(|s| (s.id, s)));
            self.albums.insert(album.id, album);
        }
        self
    }

    /// Add artists, keyed by their ids. Their albums and songs are indexed too.
    #[must_use]
    pub fn with_artists(mut self, artists: impl IntoIterator<Item = Artist>) -> Self {
        for artist in artists {
            for album in &artist.albums {
                self.songs
                    .extend(album.songs.iter().cloned().map(|s| (s.id, s)));
                self.albums.insert(album.id, album.clone());
            }
            self.artists.insert(artist.id, artist);
        }
        self
    }

    /// Set the initial shuffle mode.
    #[must_use]
    pub fn with_shuffle_mode(self, mode: ShuffleMode) -> Self {
        if let Ok(mut modes) = self.modes.write() {
            modes.shuffle = mode;
        }
        self
    }
}

#[async_trait]
impl MusicRepository for MemoryMusicRepository {
    async fn song(&self, id: SongId) -> Option<Song> {
        self.songs.get(&id).cloned()
    }

    async fn album(&self, id: AlbumId) -> Option<Album> {
        self.albums.get(&id).cloned()
    }

    async fn artist(&self, id: ArtistId) -> Option<Artist> {
        self.artists.get(&id).cloned()
    }

    fn shuffle_mode(&self) -> ShuffleMode {
        self.modes.read().map(|m| m.shuffle).unwrap_or_default()
    }

    async fn set_shuffle_mode(&self, mode: ShuffleMode) {
        match self.modes.write() {
            Ok(mut modes) => modes.shuffle = mode,
            Err(_) => warn!("Playback mode lock poisoned, dropping shuffle write"),
        }
    }

    fn repeat_mode(&self) -> RepeatMode {
        self.modes.read().map(|m| m.repeat).unwrap_or_default()
    }

    async fn set_repeat_mode(&self, mode: RepeatMode) {
        match self.modes.write() {
            Ok(mut modes) => modes.repeat = mode,
            Err(_) => warn!("Playback mode lock poisoned, dropping repeat write"),
        }
    }
}

/// A `PodcastRepository` over a fixed feed list.
///
/// The whole list is returned for any country; `limit` and search terms are
/// applied to it. A failure can be injected to exercise error paths.
#[derive(Debug, Default)]
pub struct MemoryPodcastRepository {
    feeds: Vec<PodcastFeed>,
    fail_with: Option<String>,
}

impl MemoryPodcastRepository {
    /// Create a repository serving the given feeds.
    #[must_use]
    pub fn new(feeds: Vec<PodcastFeed>) -> Self {
        Self {
            feeds,
            fail_with: None,
        }
    }

    /// Make every call fail with the given reason.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            feeds: Vec::new(),
            fail_with: Some(reason.into()),
        }
    }

    fn check_failure(&self) -> Result<()> {
        match &self.fail_with {
            Some(reason) => Err(CoreError::FeedProviderFailed {
                provider: "memory".to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PodcastRepository for MemoryPodcastRepository {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn top_feeds(&self, _country: &str, limit: usize) -> Result<Vec<PodcastFeed>> {
        self.check_failure()?;
        Ok(self.feeds.iter().take(limit).cloned().collect())
    }

    async fn search(&self, term: &str, limit: usize) -> Result<Vec<PodcastFeed>> {
        self.check_failure()?;
        let term = term.to_lowercase();
        Ok(self
            .feeds
            .iter()
            .filter(|f| {
                f.title.to_lowercase().contains(&term) || f.author.to_lowercase().contains(&term)
            })
            .take(limit)
            .cloned()
            .collect())
    }
}
