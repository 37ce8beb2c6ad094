pub mod config;
pub mod controller;
pub mod error;
pub mod music;
pub mod paths;
pub mod player;
pub mod podcast;
pub mod repository;
pub mod screen;
pub mod time;

pub use config::{build_config_template, DiscoverConfig, PlaybackConfig, PlayerConfig};
pub use controller::MusicController;
pub use error::{CoreError, Result, ScreenError};
pub use music::{Album, AlbumId, Artist, ArtistId, Artwork, Song, SongId};
pub use paths::{config_dir, config_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use player::{PlaybackStatus, PlayerEvent, RepeatMode, ShuffleMode};
pub use podcast::PodcastFeed;
pub use repository::{MusicRepository, PodcastRepository};
pub use screen::{ScreenState, ScreenStateHolder};
pub use time::DurationExt;
