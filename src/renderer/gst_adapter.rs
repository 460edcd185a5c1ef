use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use tracing::{debug, warn};

use crate::error::PlayerError;
use crate::renderer::adapter::{AdapterEvent, MediaAdapter};
use crate::types::media::MediaSource;

#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>, // RGBA, tightly packed
    pub width: u32,
    pub height: u32,
}

/// [`MediaAdapter`] over a GStreamer `playbin` whose video sink is an RGBA
/// `appsink`, so the UI can upload decoded frames as textures.
#[derive(Debug)]
pub struct GstAdapter {
    playbin: gst::Element,
    sink: gst_app::AppSink,
    bus: gst::Bus,
    detached: bool,
}

impl GstAdapter {
    /// Builds the pipeline for `source` and prerolls it paused, so duration
    /// and the first frame become available without starting playback.
    pub fn open(source: &MediaSource) -> Result<Self, PlayerError> {
        gst::init().map_err(PlayerError::GstInit)?;

        let caps = gst_video::VideoCapsBuilder::new()
            .format(gst_video::VideoFormat::Rgba)
            .build();
        let sink = gst_app::AppSink::builder()
            .caps(&caps)
            .max_buffers(1)
            .drop(true)
            .build();

        let playbin = gst::ElementFactory::make("playbin")
            .property("uri", source.uri.as_str())
            .property("video-sink", &sink)
            .build()
            .map_err(|e| PlayerError::Pipeline(e.to_string()))?;
        let bus = playbin
            .bus()
            .ok_or_else(|| PlayerError::Pipeline("playbin has no bus".to_string()))?;

        playbin
            .set_state(gst::State::Paused)
            .map_err(|source| PlayerError::StateChange {
                target: gst::State::Paused,
                source,
            })?;
        debug!(uri = %source.uri, "pipeline prerolling");

        Ok(Self {
            playbin,
            sink,
            bus,
            detached: false,
        })
    }

    /// Newly decoded frame, if one arrived since the last call. Never blocks.
    ///
    /// While paused the preroll sample is returned, so a seek on a paused
    /// pipeline still refreshes the picture.
    pub fn take_frame(&mut self) -> Option<VideoFrame> {
        let sample = self
            .sink
            .try_pull_sample(gst::ClockTime::ZERO)
            .or_else(|| {
                if self.target_state() == gst::State::Playing {
                    None
                } else {
                    self.sink.try_pull_preroll(gst::ClockTime::ZERO)
                }
            })?;
        frame_from_sample(&sample)
    }

    fn set_state(&self, target: gst::State) -> Result<(), PlayerError> {
        self.playbin
            .set_state(target)
            .map(|_| ())
            .map_err(|source| PlayerError::StateChange { target, source })
    }

    /// State the pipeline is in, or heading to if a change is pending.
    fn target_state(&self) -> gst::State {
        let (_, current, pending) = self.playbin.state(Some(gst::ClockTime::ZERO));
        if pending == gst::State::VoidPending {
            current
        } else {
            pending
        }
    }
}

impl MediaAdapter for GstAdapter {
    fn play(&mut self) -> Result<(), PlayerError> {
        if self.detached {
            return Err(PlayerError::Rejected("play"));
        }
        self.set_state(gst::State::Playing)
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.set_state(gst::State::Paused)
    }

    fn seek(&mut self, position_secs: f64) -> Result<(), PlayerError> {
        let position =
            gst::ClockTime::from_nseconds((position_secs.max(0.0) * 1_000_000_000.0) as u64);
        self.playbin
            .seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT, position)
            .map_err(|source| PlayerError::Seek {
                position: position_secs,
                source,
            })
    }

    fn set_volume(&mut self, volume: f64) {
        self.playbin.set_property("volume", volume);
    }

    fn set_muted(&mut self, muted: bool) {
        self.playbin.set_property("mute", muted);
    }

    fn current_time(&self) -> f64 {
        self.playbin
            .query_position::<gst::ClockTime>()
            .map(|t| t.nseconds() as f64 / 1_000_000_000.0)
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.playbin
            .query_duration::<gst::ClockTime>()
            .map(|t| t.nseconds() as f64 / 1_000_000_000.0)
            .filter(|d| *d > 0.0)
    }

    fn is_paused(&self) -> bool {
        self.detached || self.target_state() != gst::State::Playing
    }

    fn poll_event(&mut self) -> Option<AdapterEvent> {
        if self.detached {
            return None;
        }
        while let Some(msg) = self.bus.pop() {
            use gst::MessageView;
            match msg.view() {
                MessageView::Eos(..) => {
                    // Park at the end like a media element does.
                    self.set_state(gst::State::Paused).ok();
                    return Some(AdapterEvent::Ended);
                }
                MessageView::Error(err) => {
                    warn!(
                        error = %err.error(),
                        debug = ?err.debug(),
                        "pipeline error"
                    );
                    self.set_state(gst::State::Paused).ok();
                    return Some(AdapterEvent::Paused);
                }
                MessageView::StateChanged(change)
                    if msg.src() == Some(self.playbin.upcast_ref::<gst::Object>()) =>
                {
                    match change.current() {
                        gst::State::Playing => return Some(AdapterEvent::Started),
                        gst::State::Paused if change.old() == gst::State::Playing => {
                            return Some(AdapterEvent::Paused);
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn detach(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        self.playbin.set_state(gst::State::Null).ok();
        debug!("pipeline released");
    }
}

impl Drop for GstAdapter {
    fn drop(&mut self) {
        self.detach();
    }
}

fn frame_from_sample(sample: &gst::Sample) -> Option<VideoFrame> {
    let info = gst_video::VideoInfo::from_caps(sample.caps()?).ok()?;
    let buffer = sample.buffer()?;
    let map = buffer.map_readable().ok()?;

    let width = info.width();
    let height = info.height();
    let row_bytes = width as usize * 4;
    let stride = info.stride()[0] as usize;
    let src = map.as_slice();

    let data = if stride == row_bytes {
        src.get(..row_bytes * height as usize)?.to_vec()
    } else {
        let mut data = Vec::with_capacity(row_bytes * height as usize);
        for row in 0..height as usize {
            let start = row * stride;
            data.extend_from_slice(src.get(start..start + row_bytes)?);
        }
        data
    };

    Some(VideoFrame {
        data,
        width,
        height,
    })
}
