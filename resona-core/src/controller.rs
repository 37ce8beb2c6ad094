//! Playback controller collaborator trait.

use crate::player::PlayerEvent;

/// Accepts playback commands and drives actual media playback.
///
/// Dispatch is synchronous and fire-and-forget: the caller hands over a
/// well-formed [`PlayerEvent`] and receives no acknowledgement. View-models
/// treat dispatch as an always-succeeding command; delivery faults are the
/// implementation's concern.
pub trait MusicController: Send + Sync {
    /// Dispatch a playback command.
    fn player_event(&self, event: PlayerEvent);
}
