//! Album detail screen view-model.

use resona_core::{
    Album, AlbumId, MusicController, MusicRepository, PlayerEvent, ScreenError, ScreenState,
    ScreenStateHolder, ShuffleMode, Song,
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

/// Data shown by the album detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumDetailUiState {
    pub album: Album,
}

/// View-model backing the album detail screen.
pub struct AlbumDetailViewModel {
    repository: Arc<dyn MusicRepository>,
    controller: Arc<dyn MusicController>,
    screen_state: ScreenStateHolder<AlbumDetailUiState>,
}

impl AlbumDetailViewModel {
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
    pub fn state(&self) -> ScreenState<AlbumDetailUiState> {
        self.screen_state.get()
    }

    /// Subscribe to screen state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ScreenState<AlbumDetailUiState>> {
        self.screen_state.subscribe()
    }

    /// Resolve the album and publish one terminal screen state.
    pub async fn fetch(&self, album_id: AlbumId) {
        let next = match self.repository.album(album_id).await {
            Some(album) => ScreenState::Idle(AlbumDetailUiState { album }),
            None => {
                warn!("Album {album_id} not found, surfacing no-data");
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
