use gstreamer as gst;
use thiserror::Error;

/// Errors raised while building the player or talking to the media pipeline.
///
/// Command failures against a running pipeline never reach the user; the
/// controller logs them and reconciles from the adapter's observed state.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("GStreamer initialisation failed: {0}")]
    GstInit(#[source] gst::glib::Error),

    #[error("failed to build playback pipeline: {0}")]
    Pipeline(String),

    #[error("pipeline refused state change to {target:?}")]
    StateChange {
        target: gst::State,
        #[source]
        source: gst::StateChangeError,
    },

    #[error("seek to {position:.3}s rejected")]
    Seek {
        position: f64,
        #[source]
        source: gst::glib::BoolError,
    },

    #[error("media adapter rejected {0}")]
    Rejected(&'static str),

    #[error("config file error: {0}")]
    Config(#[from] std::io::Error),

    #[error("config file is not valid JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("no media selected")]
    NoMedia,

    #[error("window system error: {0}")]
    Window(String),
}
