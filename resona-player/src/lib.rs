//! Playback queue and state machine.
//!
//! [`Player`] is the in-process [`MusicController`]: view-models hand it
//! [`PlayerEvent`]s synchronously, a background task consumes them in order,
//! and the resulting [`PlaybackStatus`] is published through a watch channel
//! for whatever UI or media-session layer sits on top.

use rand::rng;
use rand::seq::SliceRandom;
use resona_core::{
    MusicController, MusicRepository, PlaybackStatus, PlayerEvent, RepeatMode, ShuffleMode, Song,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Queue state owned by the player task.
#[derive(Debug, Default)]
struct PlayerInner {
    queue: Vec<Song>,
    /// Unshuffled queue, kept while shuffle is on so it can be restored
    original_queue: Option<Vec<Song>>,
    index: usize,
    status: PlaybackStatus,
    position: Duration,
    shuffle: ShuffleMode,
    repeat: RepeatMode,
}

impl PlayerInner {
    fn current_song(&self) -> Option<Song> {
        self.queue.get(self.index).cloned()
    }

    /// Shuffle the queue, keeping the song at `self.index` first.
    fn shuffle_queue(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        self.original_queue = Some(self.queue.clone());
        let current = self.queue.remove(self.index.min(self.queue.len() - 1));
        self.queue.shuffle(&mut rng());
        self.queue.insert(0, current);
        self.index = 0;
        self.shuffle = ShuffleMode::On;
    }

    /// Restore the unshuffled queue, keeping the current song selected.
    fn unshuffle_queue(&mut self) {
        if let Some(original) = self.original_queue.take() {
            let current_id = self.current_song().map(|s| s.id);
            self.queue = original;
            self.index = current_id
                .and_then(|id| self.queue.iter().position(|s| s.id == id))
                .unwrap_or(0);
        }
        self.shuffle = ShuffleMode::Off;
    }
}

/// In-process playback controller.
///
/// Created with [`Player::new`]; does nothing until [`Player::start`] spawns
/// the consuming task. Events dispatched before the task starts are buffered
/// in order.
pub struct Player {
    repository: Arc<dyn MusicRepository>,
    inner: Mutex<PlayerInner>,
    status_tx: watch::Sender<PlaybackStatus>,
    event_tx: mpsc::UnboundedSender<PlayerEvent>,
    event_rx: Mutex<Option<mpsc::UnboundedReceiver<PlayerEvent>>>,
    cancel_token: CancellationToken,
}

impl Player {
    /// Create a stopped player reading playback modes from `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn MusicRepository>) -> Arc<Self> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (status_tx, _) = watch::channel(PlaybackStatus::Stopped);

        Arc::new(Self {
            repository,
            inner: Mutex::new(PlayerInner::default()),
            status_tx,
            event_tx,
            event_rx: Mutex::new(Some(event_rx)),
            cancel_token: CancellationToken::new(),
        })
    }

    /// Get a clone of the cancellation token.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Signal the player task to stop.
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }

    /// Subscribe to playback status changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PlaybackStatus> {
        self.status_tx.subscribe()
    }

    /// Current playback status.
    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.status_tx.borrow().clone()
    }

    /// Snapshot of the queue in play order.
    #[must_use]
    pub fn queue(&self) -> Vec<Song> {
        self.with_inner(|inner| inner.queue.clone())
    }

    /// Index of the current song within the queue.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.with_inner(|inner| inner.index)
    }

    /// Seek position within the current song.
    #[must_use]
    pub fn position(&self) -> Duration {
        self.with_inner(|inner| inner.position)
    }

    /// Start the event-consuming task.
    ///
    /// Calling `start` twice is a no-op for the second caller: the receiver
    /// has already been taken and the task exits immediately.
    #[must_use]
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn run(&self) {
        let Some(mut rx) = self.event_rx.lock().ok().and_then(|mut slot| slot.take()) else {
            warn!("Player event receiver already taken, not starting a second task");
            return;
        };

        info!("Player task started");

        loop {
            tokio::select! {
                () = self.cancel_token.cancelled() => {
                    info!("Player shutting down");
                    break;
                }
                event = rx.recv() => {
                    match event {
                        Some(event) => self.handle_event(event),
                        None => break,
                    }
                }
            }
        }
    }

    fn with_inner<R>(&self, f: impl FnOnce(&PlayerInner) -> R) -> R {
        match self.inner.lock() {
            Ok(inner) => f(&inner),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn handle_event(&self, event: PlayerEvent) {
        debug!("Player event: {event:?}");
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };

        match event {
            PlayerEvent::NewPlay {
                index,
                queue,
                play_when_ready,
            } => self.new_play(&mut inner, index, queue, play_when_ready),
            PlayerEvent::Pause => {
                if let PlaybackStatus::Playing(song) = inner.status.clone() {
                    inner.status = PlaybackStatus::Paused(song);
                }
            }
            PlayerEvent::Resume => {
                if let PlaybackStatus::Paused(song) = inner.status.clone() {
                    inner.status = PlaybackStatus::Playing(song);
                }
            }
            PlayerEvent::Stop => {
                let shuffle = inner.shuffle;
                let repeat = inner.repeat;
                *inner = PlayerInner {
                    shuffle,
                    repeat,
                    ..PlayerInner::default()
                };
            }
            PlayerEvent::SkipToNext => Self::skip_to_next(&mut inner),
            PlayerEvent::SkipToPrevious => {
                inner.index = inner.index.saturating_sub(1);
                inner.position = Duration::ZERO;
                Self::play_current(&mut inner);
            }
            PlayerEvent::SkipToQueue(index) => {
                if index < inner.queue.len() {
                    inner.index = index;
                    inner.position = Duration::ZERO;
                    Self::play_current(&mut inner);
                } else {
                    warn!("SkipToQueue({index}) outside queue of {}", inner.queue.len());
                }
            }
            PlayerEvent::Seek(position) => {
                inner.position = position;
            }
            PlayerEvent::Shuffle(ShuffleMode::On) => {
                if inner.shuffle == ShuffleMode::Off {
                    inner.shuffle_queue();
                }
            }
            PlayerEvent::Shuffle(ShuffleMode::Off) => {
                if inner.shuffle == ShuffleMode::On {
                    inner.unshuffle_queue();
                }
            }
            PlayerEvent::Repeat(mode) => {
                inner.repeat = mode;
            }
        }

        self.status_tx.send_replace(inner.status.clone());
    }

    fn new_play(
        &self,
        inner: &mut PlayerInner,
        index: usize,
        queue: Vec<Song>,
        play_when_ready: bool,
    ) {
        if queue.is_empty() || index >= queue.len() {
            warn!(
                "Ignoring NewPlay at index {index} into queue of {}",
                queue.len()
            );
            return;
        }

        inner.queue = queue;
        inner.original_queue = None;
        inner.index = index;
        inner.position = Duration::ZERO;
        inner.repeat = self.repository.repeat_mode();
        inner.shuffle = ShuffleMode::Off;

        // The repository holds the mode selected in the UI; it is read once
        // per queue load, later Shuffle events override it.
        if self.repository.shuffle_mode() == ShuffleMode::On {
            inner.shuffle_queue();
        }

        if let Some(song) = inner.current_song() {
            info!("New queue of {} starting at {}", inner.queue.len(), song.title);
            inner.status = if play_when_ready {
                PlaybackStatus::Playing(song)
            } else {
                PlaybackStatus::Paused(song)
            };
        }
    }

    fn skip_to_next(inner: &mut PlayerInner) {
        inner.position = Duration::ZERO;

        match inner.repeat {
            RepeatMode::One => {
                Self::play_current(inner);
            }
            RepeatMode::All if inner.index + 1 >= inner.queue.len() => {
                inner.index = 0;
                Self::play_current(inner);
            }
            _ => {
                if inner.index + 1 < inner.queue.len() {
                    inner.index += 1;
                    Self::play_current(inner);
                } else {
                    // Ran off the end of the queue.
                    inner.queue.clear();
                    inner.original_queue = None;
                    inner.index = 0;
                    inner.status = PlaybackStatus::Stopped;
                }
            }
        }
    }

    fn play_current(inner: &mut PlayerInner) {
        if let Some(song) = inner.current_song() {
            let paused = matches!(inner.status, PlaybackStatus::Paused(_));
            inner.status = if paused {
                PlaybackStatus::Paused(song)
            } else {
                PlaybackStatus::Playing(song)
            };
        }
    }
}

impl MusicController for Player {
    fn player_event(&self, event: PlayerEvent) {
        // Fire-and-forget: a closed channel means the player task is gone and
        // the command is dropped, which the dispatch contract allows.
        if self.event_tx.send(event).is_err() {
            warn!("Player task gone, dropping event");
        }
    }
}
