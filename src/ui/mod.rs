pub mod app;
pub mod controls;
pub mod video_player;
