use serde::{Deserialize, Serialize};

/// Viewport width, in logical pixels, below which the native strip is used.
pub const DEFAULT_BREAKPOINT_PX: f32 = 767.0;

/// Which control strip is drawn under the media surface.
///
/// This is routing only. Switching modes never touches playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    /// Compact strip standing in for the platform's own media controls.
    Native,
    /// Full custom strip: play/pause, stop, seek, mute, volume, fullscreen.
    Custom,
}

impl ControlMode {
    pub fn for_viewport_width(width: f32, breakpoint: f32) -> Self {
        if width < breakpoint {
            ControlMode::Native
        } else {
            ControlMode::Custom
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_viewport_uses_native_controls() {
        assert_eq!(
            ControlMode::for_viewport_width(600.0, DEFAULT_BREAKPOINT_PX),
            ControlMode::Native
        );
        assert_eq!(
            ControlMode::for_viewport_width(766.9, DEFAULT_BREAKPOINT_PX),
            ControlMode::Native
        );
    }

    #[test]
    fn test_breakpoint_itself_is_custom() {
        assert_eq!(
            ControlMode::for_viewport_width(767.0, DEFAULT_BREAKPOINT_PX),
            ControlMode::Custom
        );
        assert_eq!(
            ControlMode::for_viewport_width(800.0, DEFAULT_BREAKPOINT_PX),
            ControlMode::Custom
        );
    }
}
