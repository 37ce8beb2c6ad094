//! Music library value types.

use crate::time::DurationExt;
use std::path::PathBuf;
use std::time::Duration;

/// Numeric identifier of a song in the music library.
pub type SongId = u64;
/// Numeric identifier of an album.
pub type AlbumId = u64;
/// Numeric identifier of an artist.
pub type ArtistId = u64;

/// Artwork reference attached to songs and albums.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Artwork {
    /// No artwork is available; the UI falls back to a placeholder.
    #[default]
    Unknown,
    /// Remote artwork image.
    Url(String),
    /// Artwork stored on the local filesystem.
    File(PathBuf),
}

/// A single song. Immutable once loaded from the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    /// Library identifier
    pub id: SongId,
    /// Song title
    pub title: String,
    /// Artist name
    pub artist: String,
    /// Artist identifier
    pub artist_id: ArtistId,
    /// Album title
    pub album: String,
    /// Album identifier
    pub album_id: AlbumId,
    /// Track duration
    pub duration: Duration,
    /// Artwork reference
    pub artwork: Artwork,
}

impl Song {
    /// Create a new song with unknown artwork.
    pub fn new(
        id: SongId,
        title: impl Into<String>,
        artist: impl Into<String>,
        artist_id: ArtistId,
        album: impl Into<String>,
        album_id: AlbumId,
        duration: Duration,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            artist_id,
            album: album.into(),
            album_id,
            duration,
            artwork: Artwork::Unknown,
        }
    }

    /// Attach an artwork reference.
    #[must_use]
    pub fn with_artwork(mut self, artwork: Artwork) -> Self {
        self.artwork = artwork;
        self
    }

    /// Get duration in whole seconds, saturating at `u32::MAX`.
    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration.as_secs_u32()
    }
}

/// An album and its songs, in track order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    /// Library identifier
    pub id: AlbumId,
    /// Album title
    pub title: String,
    /// Artist name
    pub artist: String,
    /// Artist identifier
    pub artist_id: ArtistId,
    /// Songs on the album, in track order
    pub songs: Vec<Song>,
    /// Artwork reference
    pub artwork: Artwork,
}

impl Album {
    /// Create a new album.
    pub fn new(
        id: AlbumId,
        title: impl Into<String>,
        artist: impl Into<String>,
        artist_id: ArtistId,
        songs: Vec<Song>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            artist_id,
            songs,
            artwork: Artwork::Unknown,
        }
    }

    /// Attach an artwork reference.
    #[must_use]
    pub fn with_artwork(mut self, artwork: Artwork) -> Self {
        self.artwork = artwork;
        self
    }

    /// Total play time of the album.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.songs.iter().map(|s| s.duration).sum()
    }
}

/// An artist and their albums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    /// Library identifier
    pub id: ArtistId,
    /// Artist name
    pub name: String,
    /// Albums by this artist
    pub albums: Vec<Album>,
}

impl Artist {
    /// Create a new artist.
    pub fn new(id: ArtistId, name: impl Into<String>, albums: Vec<Album>) -> Self {
        Self {
            id,
            name: name.into(),
            albums,
        }
    }

    /// All songs across the artist's albums, album by album in track order.
    #[must_use]
    pub fn songs(&self) -> Vec<Song> {
        self.albums
            .iter()
            .flat_map(|album| album.songs.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: SongId, title: &str) -> Song {
        Song::new(id, title, "Artist", 1, "Album", 10, Duration::from_secs(180))
    }

    #[test]
    fn test_song_new() {
        let song = Song::new(
            1,
            "Test Song",
            "Test Artist",
            2,
            "Test Album",
            3,
            Duration::from_secs(183),
        );

        assert_eq!(song.id, 1);
        assert_eq!(song.title, "Test Song");
        assert_eq!(song.artist, "Test Artist");
        assert_eq!(song.album, "Test Album");
        assert_eq!(song.artwork, Artwork::Unknown);
        assert_eq!(song.duration_secs(), 183);
    }

    #[test]
    fn test_song_with_artwork() {
        let song = song(1, "Song").with_artwork(Artwork::Url("http://example/a.png".into()));
        assert_eq!(song.artwork, Artwork::Url("http://example/a.png".into()));
    }

    #[test]
    fn test_album_duration() {
        let album = Album::new(10, "Album", "Artist", 1, vec![song(1, "A"), song(2, "B")]);
        assert_eq!(album.duration(), Duration::from_secs(360));
    }

    #[test]
    fn test_artist_songs_flattens_albums_in_order() {
        let first = Album::new(10, "First", "Artist", 1, vec![song(1, "A"), song(2, "B")]);
        let second = Album::new(11, "Second", "Artist", 1, vec![song(3, "C")]);
        let artist = Artist::new(1, "Artist", vec![first, second]);

        let ids: Vec<SongId> = artist.songs().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
