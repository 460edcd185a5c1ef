pub mod adapter;
pub mod gst_adapter;
pub mod player_bridge;
