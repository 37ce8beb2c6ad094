//! Screen load state and the observable holder that carries it to the UI.

use crate::error::ScreenError;
use tokio::sync::watch;

/// Load status of a screen's data.
///
/// Every screen starts in `Loading`. A fetch resolves to exactly one terminal
/// state: `Idle` with the loaded payload, or `Error` with a user-visible
/// failure. Within one fetch there is no transition back to `Loading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState<T> {
    /// Data is being resolved.
    Loading,
    /// Data loaded successfully.
    Idle(T),
    /// Data could not be loaded.
    Error(ScreenError),
}

impl<T> ScreenState<T> {
    /// Check whether the screen is still loading.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check whether data loaded successfully.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle(_))
    }

    /// Check whether loading failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Get the loaded payload, if any.
    #[must_use]
    pub const fn as_idle(&self) -> Option<&T> {
        match self {
            Self::Idle(data) => Some(data),
            _ => None,
        }
    }

    /// Get the failure, if any.
    #[must_use]
    pub const fn as_error(&self) -> Option<&ScreenError> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Map the loaded payload, leaving the other variants untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ScreenState<U> {
        match self {
            Self::Loading => ScreenState::Loading,
            Self::Idle(data) => ScreenState::Idle(f(data)),
            Self::Error(error) => ScreenState::Error(error),
        }
    }
}

/// Single-writer, multi-reader holder for a screen's [`ScreenState`].
///
/// The owning view-model publishes into the holder; the presentation layer
/// subscribes and only ever observes complete values. Publishing is a total
/// operation: it succeeds with or without subscribers, and concurrent
/// publishers racing into the same holder resolve to last-write-wins.
#[derive(Debug)]
pub struct ScreenStateHolder<T> {
    tx: watch::Sender<ScreenState<T>>,
}

impl<T: Clone> ScreenStateHolder<T> {
    /// Create a holder initialized to [`ScreenState::Loading`].
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ScreenState::Loading);
        Self { tx }
    }

    /// Publish a new state, replacing the current one.
    pub fn publish(&self, next: ScreenState<T>) {
        // send_replace never fails, even with zero subscribers.
        self.tx.send_replace(next);
    }

    /// Get a snapshot of the current state.
    #[must_use]
    pub fn get(&self) -> ScreenState<T> {
        self.tx.borrow().clone()
    }

    /// Subscribe to state changes.
    ///
    /// The receiver observes the value current at subscription time and every
    /// later published value it keeps up with; intermediate values may be
    /// skipped but a torn value is never seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ScreenState<T>> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Default for ScreenStateHolder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_state_accessors() {
        let loading: ScreenState<u32> = ScreenState::Loading;
        assert!(loading.is_loading());
        assert!(!loading.is_idle());
        assert!(loading.as_idle().is_none());

        let idle = ScreenState::Idle(7u32);
        assert!(idle.is_idle());
        assert_eq!(idle.as_idle(), Some(&7));

        let error: ScreenState<u32> = ScreenState::Error(ScreenError::NoData);
        assert!(error.is_error());
        assert_eq!(error.as_error(), Some(&ScreenError::NoData));
    }

    #[test]
    fn test_screen_state_map() {
        let idle = ScreenState::Idle(21u32).map(|n| n * 2);
        assert_eq!(idle, ScreenState::Idle(42));

        let error: ScreenState<u32> = ScreenState::Error(ScreenError::NoData);
        assert_eq!(error.map(|n| n * 2), ScreenState::Error(ScreenError::NoData));
    }

    #[test]
    fn test_holder_starts_loading() {
        let holder: ScreenStateHolder<u32> = ScreenStateHolder::new();
        assert!(holder.get().is_loading());
    }

    #[test]
    fn test_publish_without_subscribers() {
        let holder: ScreenStateHolder<u32> = ScreenStateHolder::new();
        holder.publish(ScreenState::Idle(1));
        assert_eq!(holder.get(), ScreenState::Idle(1));
    }

    #[test]
    fn test_last_write_wins() {
        let holder: ScreenStateHolder<u32> = ScreenStateHolder::new();
        holder.publish(ScreenState::Idle(1));
        holder.publish(ScreenState::Error(ScreenError::NoData));
        holder.publish(ScreenState::Idle(3));
        assert_eq!(holder.get(), ScreenState::Idle(3));
    }

    #[tokio::test]
    async fn test_subscriber_observes_publish() {
        let holder: ScreenStateHolder<u32> = ScreenStateHolder::new();
        let mut rx = holder.subscribe();
        assert!(rx.borrow().is_loading());

        holder.publish(ScreenState::Idle(5));
        assert!(rx.changed().await.is_ok());
        assert_eq!(*rx.borrow(), ScreenState::Idle(5));
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_latest_only() {
        let holder: ScreenStateHolder<u32> = ScreenStateHolder::new();
        holder.publish(ScreenState::Idle(1));
        holder.publish(ScreenState::Idle(2));

        let rx = holder.subscribe();
        assert_eq!(*rx.borrow(), ScreenState::Idle(2));
    }
}
