//! Seams between the playback controller and the host platform.
//!
//! [`MediaAdapter`] wraps the platform playback primitive and
//! [`FullscreenHost`] wraps whatever can take the window fullscreen. Both are
//! command interfaces: the result of a command is observed afterwards through
//! [`MediaAdapter::is_paused`] and [`MediaAdapter::poll_event`], never assumed.

use crate::error::PlayerError;

/// Lifecycle notifications raised by the media primitive itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterEvent {
    /// Position reached the end with no further advance. Raised once per
    /// playthrough; the primitive is paused when this is delivered.
    Ended,
    /// The primitive started playing, whoever asked it to.
    Started,
    /// The primitive paused, whoever asked it to.
    Paused,
}

/// Capability interface over a single playback primitive.
pub trait MediaAdapter {
    fn play(&mut self) -> Result<(), PlayerError>;
    fn pause(&mut self) -> Result<(), PlayerError>;
    fn seek(&mut self, position_secs: f64) -> Result<(), PlayerError>;
    fn set_volume(&mut self, volume: f64);
    fn set_muted(&mut self, muted: bool);

    /// Position in seconds.
    fn current_time(&self) -> f64;
    /// Length in seconds, `None` until metadata has loaded.
    fn duration(&self) -> Option<f64>;
    /// Whether the primitive is (or is about to be) paused.
    fn is_paused(&self) -> bool;

    /// Next pending lifecycle notification, if any. Never blocks.
    fn poll_event(&mut self) -> Option<AdapterEvent>;

    /// Releases the primitive and drops event subscriptions.
    fn detach(&mut self);
}

/// Host capability able to enter and leave fullscreen.
pub trait FullscreenHost {
    fn set_fullscreen(&mut self, fullscreen: bool);
}
