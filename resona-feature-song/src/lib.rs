//! Song detail screen view-model.
//!
//! Mediates between UI events and the repository/controller collaborators:
//! an explicit `fetch` resolves the requested songs and publishes exactly one
//! terminal screen state, while the play actions forward a single
//! [`PlayerEvent`] to the controller without touching screen state.

use resona_core::{
    MusicController, MusicRepository, PlayerEvent, ScreenError, ScreenState, ScreenStateHolder,
    ShuffleMode, Song, SongId,
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Data shown by the song detail screen. Created once per successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongDetailUiState {
    /// Resolved songs, in the order they were requested
    pub songs: Vec<Song>,
}

/// View-model backing the song detail screen.
pub struct SongDetailViewModel {
    repository: Arc<dyn MusicRepository>,
    controller: Arc<dyn MusicController>,
    screen_state: ScreenStateHolder<SongDetailUiState>,
}

impl SongDetailViewModel {
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
    pub fn state(&self) -> ScreenState<SongDetailUiState> {
        self.screen_state.get()
    }

    /// Subscribe to screen state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ScreenState<SongDetailUiState>> {
        self.screen_state.subscribe()
    }

    /// Resolve `song_ids` and publish one terminal screen state.
    ///
    /// Every id is looked up, in order; if all resolve the screen becomes
    /// `Idle` with the songs in request order, otherwise `Error`. Overlapping
    /// calls are not coordinated against each other: whichever call publishes
    /// last determines the observed state.
    pub async fn fetch(&self, song_ids: &[SongId]) {
        let mut songs = Vec::with_capacity(song_ids.len());
        for &id in song_ids {
            songs.push(self.repository.song(id).await);
        }

        let next = if songs.iter().all(Option::is_some) {
            ScreenState::Idle(SongDetailUiState {
                songs: songs.into_iter().flatten().collect(),
            })
        } else {
            warn!("Song lookup left unresolved ids, surfacing no-data");
            ScreenState::Error(ScreenError::NoData)
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
    ///
    /// The mode write is issued before the dispatch; if it fails inside the
    /// repository nothing is rolled back or surfaced here.
    pub async fn on_shuffle_play(&self, songs: Vec<Song>) {
        self.repository.set_shuffle_mode(ShuffleMode::On).await;
        info!("Shuffle play over {} songs", songs.len());
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
    use async_trait::async_trait;
    use resona_core::{Album, AlbumId, Artist, ArtistId, RepeatMode};
    use resona_repository_memory::MemoryMusicRepository;
    use std::sync::Mutex;
    use std::time::Duration;

    fn song(id: SongId, title: &str) -> Song {
        Song::new(id, title, "Artist", 1, "Album", 10, Duration::from_secs(180))
    }

    /// Controller double that records every dispatched event.
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

    /// Repository/controller pair sharing one call log, for ordering checks.
    #[derive(Default)]
    struct OrderProbe {
        calls: Mutex<Vec<&'static str>>,
    }

    impl OrderProbe {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }

        fn record(&self, call: &'static str) {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call);
            }
        }
    }

    #[async_trait]
    impl MusicRepository for OrderProbe {
        async fn song(&self, _id: SongId) -> Option<Song> {
            None
        }

        async fn album(&self, _id: AlbumId) -> Option<Album> {
            None
        }

        async fn artist(&self, _id: ArtistId) -> Option<Artist> {
            None
        }

        fn shuffle_mode(&self) -> ShuffleMode {
            ShuffleMode::Off
        }

        async fn set_shuffle_mode(&self, _mode: ShuffleMode) {
            self.record("set_shuffle_mode");
        }

        fn repeat_mode(&self) -> RepeatMode {
            RepeatMode::Off
        }

        async fn set_repeat_mode(&self, _mode: RepeatMode) {
            self.record("set_repeat_mode");
        }
    }

    impl MusicController for OrderProbe {
        fn player_event(&self, _event: PlayerEvent) {
            self.record("player_event");
        }
    }

    fn view_model_with_songs(songs: Vec<Song>) -> (SongDetailViewModel, Arc<RecordingController>) {
        let repository = Arc::new(MemoryMusicRepository::new().with_songs(songs));
        let controller = Arc::new(RecordingController::default());
        (
            SongDetailViewModel::new(repository, controller.clone()),
            controller,
        )
    }

    #[tokio::test]
    async fn test_fetch_publishes_idle_in_request_order() {
        let (vm, _) = view_model_with_songs(vec![song(1, "A"), song(2, "B"), song(3, "C")]);
        assert!(vm.state().is_loading());

        vm.fetch(&[3, 1, 2]).await;

        let state = vm.state();
        let ui = match state.as_idle() {
            Some(ui) => ui,
            None => panic!("expected idle state, got {state:?}"),
        };
        let ids: Vec<SongId> = ui.songs.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_missing_id_publishes_error() {
        let (vm, _) = view_model_with_songs(vec![song(1, "A")]);

        vm.fetch(&[1, 42]).await;

        assert_eq!(vm.state(), ScreenState::Error(ScreenError::NoData));
    }

    #[tokio::test]
    async fn test_fetch_empty_publishes_empty_idle() {
        let (vm, _) = view_model_with_songs(vec![]);

        vm.fetch(&[]).await;

        assert_eq!(
            vm.state(),
            ScreenState::Idle(SongDetailUiState { songs: vec![] })
        );
    }

    #[tokio::test]
    async fn test_loading_observed_before_idle() {
        let (vm, _) = view_model_with_songs(vec![song(1, "A")]);
        let rx = vm.subscribe();
        assert!(rx.borrow().is_loading());

        vm.fetch(&[1]).await;
        assert!(rx.borrow().is_idle());
    }

    #[tokio::test]
    async fn test_on_new_play_dispatches_single_event_without_publish() {
        let (vm, controller) = view_model_with_songs(vec![]);
        let queue = vec![song(1, "A"), song(2, "B")];

        vm.on_new_play(queue.clone(), 1);

        assert_eq!(
            controller.events(),
            vec![PlayerEvent::NewPlay {
                index: 1,
                queue,
                play_when_ready: true,
            }]
        );
        // Dispatch must not touch the screen state.
        assert!(vm.state().is_loading());
    }

    #[tokio::test]
    async fn test_on_shuffle_play_sets_mode_before_dispatch() {
        let probe = Arc::new(OrderProbe::default());
        let vm = SongDetailViewModel::new(probe.clone(), probe.clone());

        vm.on_shuffle_play(vec![song(1, "A")]).await;

        assert_eq!(probe.calls(), vec!["set_shuffle_mode", "player_event"]);
    }

    #[tokio::test]
    async fn test_on_shuffle_play_dispatches_from_index_zero() {
        let repository = Arc::new(MemoryMusicRepository::new());
        let controller = Arc::new(RecordingController::default());
        let vm = SongDetailViewModel::new(repository.clone(), controller.clone());
        let queue = vec![song(1, "A"), song(2, "B")];

        vm.on_shuffle_play(queue.clone()).await;

        assert_eq!(repository.shuffle_mode(), ShuffleMode::On);
        assert_eq!(
            controller.events(),
            vec![PlayerEvent::NewPlay {
                index: 0,
                queue,
                play_when_ready: true,
            }]
        );
    }

    #[tokio::test]
    async fn test_overlapping_fetches_last_write_wins() {
        let repository = Arc::new(MemoryMusicRepository::new().with_songs(vec![
            song(1, "A"),
            song(2, "B"),
        ]));
        let controller = Arc::new(RecordingController::default());
        let vm = Arc::new(SongDetailViewModel::new(repository, controller));

        let first = tokio::spawn({
            let vm = vm.clone();
            async move { vm.fetch(&[1]).await }
        });
        let second = tokio::spawn({
            let vm = vm.clone();
            async move { vm.fetch(&[2]).await }
        });
        let (a, b) = tokio::join!(first, second);
        assert!(a.is_ok() && b.is_ok());

        // Either call may have published last; both outcomes are valid.
        let state = vm.state();
        let ui = match state.as_idle() {
            Some(ui) => ui,
            None => panic!("expected idle state, got {state:?}"),
        };
        let ids: Vec<SongId> = ui.songs.iter().map(|s| s.id).collect();
        assert!(ids == vec![1] || ids == vec![2], "unexpected winner: {ids:?}");
    }
}
