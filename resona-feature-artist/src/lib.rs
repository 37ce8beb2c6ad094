//! Artist detail screen view-model.

use resona_core::{
    Artist, ArtistId, MusicController, MusicRepository, PlayerEvent, ScreenError, ScreenState,
    ScreenStateHolder, ShuffleMode, Song,
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

/// Data shown by the artist detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistDetailUiState {
    pub artist: Artist,
}

/// View-model backing the artist detail screen.
pub struct ArtistDetailViewModel {
    repository: Arc<dyn MusicRepository>,
    controller: Arc<dyn MusicController>,
    screen_state: ScreenStateHolder<ArtistDetailUiState>,
}

impl ArtistDetailViewModel {
    /// Create a view-model in the `Loading` state.
    #[must_use]
    pub fn new(repository: Arc<dyn MusicRepository>, controller: Arc<dyn MusicController>) -> Self {
        Self {
            repository,
            controller,
            screen_state: ScreenStateHolder::new(),
        }
    }

    /// Snapshot of the current screen state.
    #[must_use]
    pub fn state(&self) -> ScreenState<ArtistDetailUiState> {
        self.screen_state.get()
    }

    /// Subscribe to screen state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ScreenState<ArtistDetailUiState>> {
        self.screen_state.subscribe()
    }

    /// Resolve the artist and publish one terminal screen state.
    pub async fn fetch(&self, artist_id: ArtistId) {
        let next = match self.repository.artist(artist_id).await {
            Some(artist) => ScreenState::Idle(ArtistDetailUiState { artist }),
            None => {
                warn!("Artist {artist_id} not found, surfacing no-data");
                ScreenState::Error(ScreenError::NoData)
            }
        };

        self.screen_state.publish(next);
    }

    /// Start playback of `songs` at `index`.
    pub fn on_new_play(&self, songs: Vec<Song>, index: usize) {
        self.controller.player_event(PlayerEvent::NewPlay {
            index,
            queue: songs,
            play_when_ready: true,
        });
    }

    /// Turn shuffle on, then start playback of `songs` from the top.
    pub async fn on_shuffle_play(&self, songs: Vec<Song>) {
        self.repository.set_shuffle_mode(ShuffleMode::On).await;
        self.controller.player_event(PlayerEvent::NewPlay {
            index: 0,
            queue: songs,
            play_when_ready: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resona_core::{Album, SongId};
    use resona_repository_memory::MemoryMusicRepository;
    use std::sync::Mutex;
    use std::time::Duration;

    fn song(id: SongId, title: &str) -> Song {
        Song::new(id, title, "Artist", 1, "Album", 10, Duration::from_secs(240))
    }

    fn artist() -> Artist {
        let first = Album::new(10, "First", "Artist", 1, vec![song(1, "A"), song(2, "B")]);
        let second = Album::new(11, "Second", "Artist", 1, vec![song(3, "C")]);
        Artist::new(1, "Artist", vec![first, second])
    }

    #[derive(Default)]
    struct RecordingController {
        events: Mutex<Vec<PlayerEvent>>,
    }

    impl RecordingController {
        fn events(&self) -> Vec<PlayerEvent> {
            self.events.lock().map(|e| e.clone()).unwrap_or_default()
        }
    }

    impl MusicController for RecordingController {
        fn player_event(&self, event: PlayerEvent) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_publishes_artist_with_albums() {
        let repository = Arc::new(MemoryMusicRepository::new().with_artists([artist()]));
        let controller = Arc::new(RecordingController::default());
        let vm = ArtistDetailViewModel::new(repository, controller);

        vm.fetch(1).await;

        let state = vm.state();
        let ui = match state.as_idle() {
            Some(ui) => ui,
            None => panic!("expected idle state, got {state:?}"),
        };
        assert_eq!(ui.artist.albums.len(), 2);
        assert_eq!(ui.artist.songs().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_unknown_artist_publishes_error() {
        let repository = Arc::new(MemoryMusicRepository::new());
        let controller = Arc::new(RecordingController::default());
        let vm = ArtistDetailViewModel::new(repository, controller);

        vm.fetch(404).await;

        assert_eq!(vm.state(), ScreenState::Error(ScreenError::NoData));
    }

    #[tokio::test]
    async fn test_shuffle_play_over_all_artist_songs() {
        let repository = Arc::new(MemoryMusicRepository::new().with_artists([artist()]));
        let controller = Arc::new(RecordingController::default());
        let vm = ArtistDetailViewModel::new(repository.clone(), controller.clone());

        vm.on_shuffle_play(artist().songs()).await;

        assert_eq!(repository.shuffle_mode(), ShuffleMode::On);
        let events = controller.events();
        match events.as_slice() {
            [PlayerEvent::NewPlay {
                index,
                queue,
                play_when_ready,
            }] => {
                assert_eq!(*index, 0);
                assert_eq!(queue.len(), 3);
                assert!(*play_when_ready);
            }
            other => panic!("expected one NewPlay, got {other:?}"),
        }
    }
}
