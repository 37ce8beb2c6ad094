//! Playback command and mode types shared between view-models and the player.

use crate::music::Song;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Whether the playback queue is shuffled.
///
/// Process-wide playback setting held by the repository; read by the player
/// when a new queue is loaded. Writes are not serialized by this crate, the
/// single UI-driven writer is expected to do that itself if it needs stronger
/// consistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShuffleMode {
    On,
    #[default]
    Off,
}

impl ShuffleMode {
    /// The opposite mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }
}

/// Queue repeat behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    #[default]
    Off,
    /// Wrap around to the start of the queue.
    All,
    /// Repeat the current song.
    One,
}

impl RepeatMode {
    /// Cycle Off -> All -> One -> Off.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

/// A playback command issued to the controller.
///
/// Constructed per user action and consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Replace the queue and start playback at `index`.
    NewPlay {
        /// Position in `queue` to start from
        index: usize,
        /// The new queue, in presentation order
        queue: Vec<Song>,
        /// Start playing immediately instead of loading paused
        play_when_ready: bool,
    },
    /// Pause the current song.
    Pause,
    /// Resume the paused song.
    Resume,
    /// Stop playback and clear the queue.
    Stop,
    /// Advance to the next song, honoring the repeat mode.
    SkipToNext,
    /// Return to the previous song.
    SkipToPrevious,
    /// Jump to a song already in the queue.
    SkipToQueue(usize),
    /// Seek within the current song.
    Seek(Duration),
    /// Change the shuffle mode for the current queue.
    Shuffle(ShuffleMode),
    /// Change the repeat mode.
    Repeat(RepeatMode),
}

/// What the player is currently doing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing(Song),
    Paused(Song),
}

impl PlaybackStatus {
    /// The song being played or paused, if any.
    #[must_use]
    pub const fn song(&self) -> Option<&Song> {
        match self {
            Self::Playing(song) | Self::Paused(song) => Some(song),
            Self::Stopped => None,
        }
    }

    /// Check whether a song is actively playing.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self, Self::Playing(_))
    }
}
