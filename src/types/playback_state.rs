use serde::{Deserialize, Serialize};

use crate::types::control_mode::ControlMode;

/// Where the session sits in its play lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPhase {
    /// Never played, or stopped and rewound.
    Idle,
    Playing,
    Paused,
    /// Reached the end of the media. Playing again restarts from 0.
    Ended,
}

/// Mutable state of one mounted player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub progress_percent: f64,
    pub volume: f64,
    pub muted: bool,
    pub is_fullscreen: bool,
    pub control_mode: ControlMode,
}

impl PlaybackState {
    pub fn new(control_mode: ControlMode) -> Self {
        Self {
            is_playing: false,
            progress_percent: 0.0,
            volume: 1.0,
            muted: false,
            is_fullscreen: false,
            control_mode,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(ControlMode::Custom)
    }
}

/// Snapshot handed to the control strips each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackView {
    pub is_playing: bool,
    pub progress_percent: f64,
    pub volume: f64,
    pub muted: bool,
    pub is_fullscreen: bool,
    pub control_mode: ControlMode,
    pub phase: PlaybackPhase,
    /// Seconds, as reported by the adapter.
    pub current_time: f64,
    /// Seconds, `None` until metadata is loaded.
    pub duration: Option<f64>,
}

impl PlaybackView {
    /// Formats the position as `m:ss / m:ss` for the time label.
    pub fn time_label(&self) -> String {
        let total = match self.duration {
            Some(d) if d.is_finite() => format_clock(d),
            _ => "--:--".to_string(),
        };
        format!("{} / {}", format_clock(self.current_time), total)
    }
}

/// User intents collected from one frame of a control strip.
///
/// Strips are stateless views: they read a [`PlaybackView`] and return this,
/// and the controller applies it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlsResponse {
    pub toggle_playback: bool,
    pub stop: bool,
    /// Seek-bar percentage the user dragged to.
    pub seek_to: Option<f64>,
    pub set_volume: Option<f64>,
    pub toggle_mute: bool,
    pub toggle_fullscreen: bool,
}

impl ControlsResponse {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn format_clock(seconds: f64) -> String {
    let secs = if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    };
    let (h, m, s) = (secs / 3600, (secs / 60) % 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(current_time: f64, duration: Option<f64>) -> PlaybackView {
        PlaybackView {
            is_playing: false,
            progress_percent: 0.0,
            volume: 1.0,
            muted: false,
            is_fullscreen: false,
            control_mode: ControlMode::Custom,
            phase: PlaybackPhase::Idle,
            current_time,
            duration,
        }
    }

    #[test]
    fn test_time_label() {
        assert_eq!(view(65.4, Some(600.0)).time_label(), "1:05 / 10:00");
        assert_eq!(view(3.0, Some(3725.0)).time_label(), "0:03 / 1:02:05");
        assert_eq!(view(0.0, None).time_label(), "0:00 / --:--");
    }

    #[test]
    fn test_view_serializes_snake_case_enums() {
        let json = serde_json::to_value(view(0.0, None)).unwrap();
        assert_eq!(json["control_mode"], "custom");
        assert_eq!(json["phase"], "idle");
        assert!(json["duration"].is_null());
    }
}
