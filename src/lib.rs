//! Video player whose control strip adapts to the window width while a single
//! playback controller stays the source of truth for play state, position,
//! volume, mute and fullscreen.

pub mod config;
pub mod error;
pub mod ops;
pub mod renderer;
pub mod types;
pub mod ui;

pub use config::PlayerConfig;
pub use error::PlayerError;
pub use renderer::adapter::{AdapterEvent, FullscreenHost, MediaAdapter};
pub use renderer::player_bridge::PlaybackController;
