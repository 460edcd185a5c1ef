use std::path::Path;

use gstreamer as gst;
use gstreamer_pbutils as gst_pbutils;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PlayerError;

/// The media resource a player is mounted against, plus its poster image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSource {
    pub uri: String,
    /// Image shown on the surface until playback first starts.
    pub poster: Option<String>,
}

impl MediaSource {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            poster: None,
        }
    }

    /// Builds a source from a local path or an existing URI.
    pub fn from_location(location: &str) -> Result<Self, PlayerError> {
        Ok(Self::new(to_uri(location)?))
    }

    pub fn with_poster(mut self, poster: &str) -> Result<Self, PlayerError> {
        self.poster = Some(to_uri(poster)?);
        Ok(self)
    }
}

/// Metadata probed before the pipeline is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub duration: Option<f64>,
    pub dimensions: Option<(u32, u32)>,
}

impl MediaInfo {
    /// Probes `source` with the GStreamer discoverer.
    ///
    /// Probing is advisory: failures yield an empty `MediaInfo` and the
    /// player falls back to whatever the pipeline reports once prerolled.
    pub fn probe(source: &MediaSource) -> Self {
        if gst::init().is_err() {
            return Self::default();
        }
        let discoverer = match gst_pbutils::Discoverer::new(gst::ClockTime::from_seconds(5)) {
            Ok(d) => d,
            Err(e) => {
                warn!(error = %e, "could not create discoverer");
                return Self::default();
            }
        };
        let info = match discoverer.discover_uri(&source.uri) {
            Ok(info) => info,
            Err(e) => {
                warn!(uri = %source.uri, error = %e, "media probe failed");
                return Self::default();
            }
        };

        let probed = Self {
            duration: info
                .duration()
                .map(|d| d.nseconds() as f64 / 1_000_000_000.0),
            dimensions: info
                .video_streams()
                .first()
                .map(|v| (v.width(), v.height())),
        };
        debug!(uri = %source.uri, ?probed, "probed media");
        probed
    }

    /// Width over height, when the video stream size is known.
    pub fn aspect_ratio(&self) -> Option<f32> {
        match self.dimensions {
            Some((w, h)) if w > 0 && h > 0 => Some(w as f32 / h as f32),
            _ => None,
        }
    }
}

fn to_uri(location: &str) -> Result<String, PlayerError> {
    if location.contains("://") {
        return Ok(location.to_string());
    }
    let abs_path = std::fs::canonicalize(Path::new(location))?;
    Ok(path_to_file_uri(&abs_path.to_string_lossy()))
}

#[cfg(windows)]
fn path_to_file_uri(path: &str) -> String {
    let mut path = path.replace('\\', "/");
    if let Some(stripped) = path.strip_prefix("//?/") {
        path = stripped.to_string();
    }
    format!("file:///{}", path)
}

#[cfg(not(windows))]
fn path_to_file_uri(path: &str) -> String {
    format!("file://{}", path)
}
