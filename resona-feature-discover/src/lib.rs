//! Podcast discover screen view-model.
//!
//! Browses a podcast directory's top feeds for a selectable country and
//! searches it by term. Unlike the music detail screens, the collaborator
//! here returns `Result`s, so directory failures surface as a distinct
//! feed-unavailable screen error.

use resona_core::{
    DiscoverConfig, PodcastFeed, PodcastRepository, ScreenError, ScreenState, ScreenStateHolder,
};
use std::sync::{Arc, RwLock};
use tokio::sync::watch;
use tracing::{info, warn};

/// Data shown by the discover screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverUiState {
    /// Feeds to display, most popular (or best match) first
    pub feeds: Vec<PodcastFeed>,
}

/// View-model backing the podcast discover screen.
pub struct DiscoverViewModel {
    repository: Arc<dyn PodcastRepository>,
    screen_state: ScreenStateHolder<DiscoverUiState>,
    country: RwLock<String>,
    feed_limit: usize,
}

impl DiscoverViewModel {
    /// Create a view-model in the `Loading` state with the configured country.
    #[must_use]
    pub fn new(repository: Arc<dyn PodcastRepository>, config: &DiscoverConfig) -> Self {
        Self {
            repository,
            screen_state: ScreenStateHolder::new(),
            country: RwLock::new(config.country.clone()),
            feed_limit: config.feed_limit,
        }
    }

    /// Snapshot of the current screen state.
    #[must_use]
    pub fn state(&self) -> ScreenState<DiscoverUiState> {
        self.screen_state.get()
    }

    /// Subscribe to screen state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ScreenState<DiscoverUiState>> {
        self.screen_state.subscribe()
    }

    /// The country code the feed chart is scoped to.
    #[must_use]
    pub fn country(&self) -> String {
        match self.country.read() {
            Ok(country) => country.clone(),
            Err(_) => "us".to_string(),
        }
    }

    /// Select a new country and reload the chart for it.
    pub async fn save_country(&self, code: impl Into<String>) {
        let code = code.into();
        info!("Discover country changed to {code}");
        if let Ok(mut country) = self.country.write() {
            *country = code;
        }
        self.fetch().await;
    }

    /// Load the top feeds for the selected country and publish the result.
    ///
    /// An empty chart is a valid `Idle` outcome; only a directory failure
    /// publishes an error.
    pub async fn fetch(&self) {
        let country = self.country();
        let next = match self.repository.top_feeds(&country, self.feed_limit).await {
            Ok(feeds) => ScreenState::Idle(DiscoverUiState { feeds }),
            Err(e) => {
                warn!("Directory {} failed: {e}", self.repository.name());
                ScreenState::Error(ScreenError::FeedUnavailable {
                    reason: e.to_string(),
                })
            }
        };

        self.screen_state.publish(next);
    }

    /// Search the directory and publish the matches.
    pub async fn search(&self, term: &str) {
        let next = match self.repository.search(term, self.feed_limit).await {
            Ok(feeds) => ScreenState::Idle(DiscoverUiState { feeds }),
            Err(e) => {
                warn!("Directory {} search failed: {e}", self.repository.name());
                ScreenState::Error(ScreenError::FeedUnavailable {
                    reason: e.to_string(),
                })
            }
        };

        self.screen_state.publish(next);
    }
}
