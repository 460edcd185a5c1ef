pub mod control_mode;
pub mod media;
pub mod playback_state;
