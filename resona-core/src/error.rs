use std::path::PathBuf;
use thiserror::Error;

/// User-visible failure carried inside [`ScreenState::Error`](crate::ScreenState::Error).
///
/// Screens surface a fixed, coarse error kind rather than the underlying
/// collaborator fault; anything finer-grained is logged at the boundary and
/// swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    /// A requested entity could not be resolved in full.
    #[error("no data available")]
    NoData,

    /// The podcast feed could not be loaded.
    #[error("feed unavailable: {reason}")]
    FeedUnavailable { reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    // Configuration errors
    #[error("Config file not found at {path}. A template has been created - please edit it and restart.")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("Failed to parse config file: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    // Feed errors
    #[error("Feed response could not be parsed: {reason}")]
    FeedParseError { reason: String },

    #[error("Feed provider {provider} failed: {reason}")]
    FeedProviderFailed { provider: String, reason: String },

    // Network errors
    #[error("Network request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    // IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
