use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::config::PlayerConfig;
use crate::ops::progress::{clamp_percent, clamp_volume, progress_percent, seek_target};
use crate::ops::sampler::ProgressSampler;
use crate::renderer::adapter::{AdapterEvent, FullscreenHost, MediaAdapter};
use crate::types::control_mode::ControlMode;
use crate::types::playback_state::{ControlsResponse, PlaybackPhase, PlaybackState, PlaybackView};

/// Owns one playback session and keeps it in step with a media adapter.
///
/// All mutation happens on the caller's thread: commands from the control
/// strips, [`on_viewport_resize`](Self::on_viewport_resize) from the window,
/// and [`poll`](Self::poll) once per frame for adapter events and sampler
/// ticks. The sampler is `Some` exactly while `is_playing` is true.
///
/// Dropping the controller is unmount: the sampler is cancelled and the
/// adapter detached.
#[derive(Debug)]
pub struct PlaybackController<A: MediaAdapter> {
    session_id: Uuid,
    adapter: A,
    state: PlaybackState,
    phase: PlaybackPhase,
    sampler: Option<ProgressSampler>,
    sample_interval: Duration,
    breakpoint_px: f32,
}

impl<A: MediaAdapter> PlaybackController<A> {
    /// Creates a session for `adapter` and pushes the configured volume and
    /// mute state to it.
    pub fn mount(mut adapter: A, config: &PlayerConfig, viewport_width: f32) -> Self {
        let session_id = Uuid::new_v4();
        let control_mode = ControlMode::for_viewport_width(viewport_width, config.breakpoint_px);

        let mut state = PlaybackState::new(control_mode);
        state.volume = config.effective_volume();
        state.muted = config.start_muted;
        adapter.set_volume(state.volume);
        adapter.set_muted(state.muted);

        info!(%session_id, ?control_mode, viewport_width, "playback session mounted");

        let mut controller = Self {
            session_id,
            adapter,
            state,
            phase: PlaybackPhase::Idle,
            sampler: None,
            sample_interval: config.sample_interval(),
            breakpoint_px: config.breakpoint_px,
        };
        // The primitive may already be running (autoplay).
        controller.reconcile(Instant::now());
        controller
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn sampler_active(&self) -> bool {
        self.sampler.is_some()
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn view(&self) -> PlaybackView {
        PlaybackView {
            is_playing: self.state.is_playing,
            progress_percent: self.state.progress_percent,
            volume: self.state.volume,
            muted: self.state.muted,
            is_fullscreen: self.state.is_fullscreen,
            control_mode: self.state.control_mode,
            phase: self.phase,
            current_time: self.adapter.current_time(),
            duration: self.adapter.duration(),
        }
    }

    /// Idle, Paused or Ended -> Playing.
    pub fn play(&mut self) {
        if self.state.is_playing && !self.adapter.is_paused() {
            return;
        }
        if self.phase == PlaybackPhase::Ended && self.adapter.current_time() > 0.0 {
            // Not every primitive rewinds on end.
            if let Err(e) = self.adapter.seek(0.0) {
                warn!(session_id = %self.session_id, error = %e, "rewind before replay failed");
            }
        }
        if let Err(e) = self.adapter.play() {
            warn!(session_id = %self.session_id, error = %e, "play command rejected");
        }
        self.reconcile(Instant::now());
        if !self.state.is_playing {
            debug!(session_id = %self.session_id, phase = ?self.phase, "play not honoured, staying paused");
        }
    }

    /// Playing -> Paused. Calling it while already paused changes nothing.
    pub fn pause(&mut self) {
        if let Err(e) = self.adapter.pause() {
            warn!(session_id = %self.session_id, error = %e, "pause command rejected");
        }
        if self.state.is_playing {
            self.leave_playing(PlaybackPhase::Paused);
        }
        self.reconcile(Instant::now());
    }

    /// Chooses play or pause from the primitive's own paused flag.
    pub fn toggle_play_pause(&mut self) {
        if self.adapter.is_paused() {
            self.play();
        } else {
            self.pause();
        }
    }

    /// A click on the media surface.
    pub fn click_surface(&mut self) {
        self.toggle_play_pause();
    }

    /// Any -> Idle: pauses, rewinds to 0 and cancels the sampler in one step.
    pub fn stop(&mut self) {
        self.cancel_sampler();
        if let Err(e) = self.adapter.pause() {
            warn!(session_id = %self.session_id, error = %e, "pause on stop rejected");
        }
        if let Err(e) = self.adapter.seek(0.0) {
            warn!(session_id = %self.session_id, error = %e, "rewind on stop rejected");
        }
        self.state.is_playing = false;
        self.state.progress_percent = 0.0;
        self.phase = PlaybackPhase::Idle;
        debug!(session_id = %self.session_id, "stopped");
    }

    /// Seeks to `percent` of the duration and shows it immediately.
    ///
    /// Ignored while the duration is unknown.
    pub fn seek_to(&mut self, percent: f64) {
        let Some(percent) = clamp_percent(percent) else {
            return;
        };
        let Some(target) = seek_target(percent, self.adapter.duration()) else {
            debug!(session_id = %self.session_id, percent, "duration unknown, seek skipped");
            return;
        };
        if let Err(e) = self.adapter.seek(target) {
            warn!(session_id = %self.session_id, error = %e, "seek rejected");
        }
        self.state.progress_percent = percent;
        if self.phase == PlaybackPhase::Ended {
            self.phase = PlaybackPhase::Paused;
        }
        trace!(session_id = %self.session_id, percent, target, "seeked");
    }

    pub fn set_volume(&mut self, volume: f64) {
        let Some(volume) = clamp_volume(volume) else {
            return;
        };
        self.state.volume = volume;
        self.adapter.set_volume(volume);
    }

    /// Mute is a separate flag; the stored volume is left as is.
    pub fn set_muted(&mut self, muted: bool) {
        self.state.muted = muted;
        self.adapter.set_muted(muted);
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.state.muted);
    }

    pub fn toggle_fullscreen(&mut self, host: &mut dyn FullscreenHost) {
        let target = !self.state.is_fullscreen;
        host.set_fullscreen(target);
        self.state.is_fullscreen = target;
        debug!(session_id = %self.session_id, fullscreen = target, "fullscreen toggled");
    }

    /// Mirrors a fullscreen change made outside the controls, e.g. Escape.
    pub fn sync_fullscreen(&mut self, observed: bool) {
        if self.state.is_fullscreen != observed {
            debug!(session_id = %self.session_id, fullscreen = observed, "fullscreen changed by host");
            self.state.is_fullscreen = observed;
        }
    }

    /// Recomputes the control mode. Playback state is never touched.
    pub fn on_viewport_resize(&mut self, width: f32) {
        let mode = ControlMode::for_viewport_width(width, self.breakpoint_px);
        if mode != self.state.control_mode {
            debug!(session_id = %self.session_id, width, from = ?self.state.control_mode, to = ?mode, "control mode switched");
            self.state.control_mode = mode;
        }
    }

    /// Applies one frame of control-strip intents in a fixed order.
    pub fn apply(&mut self, response: &ControlsResponse, host: &mut dyn FullscreenHost) {
        if response.toggle_playback {
            self.toggle_play_pause();
        }
        if response.stop {
            self.stop();
        }
        if let Some(percent) = response.seek_to {
            self.seek_to(percent);
        }
        if let Some(volume) = response.set_volume {
            self.set_volume(volume);
        }
        if response.toggle_mute {
            self.toggle_mute();
        }
        if response.toggle_fullscreen {
            self.toggle_fullscreen(host);
        }
    }

    /// Drains adapter events, reconciles the play flag and fires the sampler
    /// when due. Returns the time until the next sampler tick, if running.
    pub fn poll(&mut self, now: Instant) -> Option<Duration> {
        while let Some(event) = self.adapter.poll_event() {
            match event {
                AdapterEvent::Ended => self.on_ended(),
                AdapterEvent::Started | AdapterEvent::Paused => self.reconcile(now),
            }
        }
        self.reconcile(now);

        let due = self
            .sampler
            .as_mut()
            .is_some_and(|sampler| sampler.fire_if_due(now));
        if due {
            self.sample_progress();
        }
        self.sampler.as_ref().map(|s| s.time_until_due(now))
    }

    fn on_ended(&mut self) {
        self.leave_playing(PlaybackPhase::Ended);
        self.state.progress_percent = 0.0;
        debug!(session_id = %self.session_id, "media ended");
    }

    fn sample_progress(&mut self) {
        match progress_percent(self.adapter.current_time(), self.adapter.duration()) {
            Some(percent) => self.state.progress_percent = percent,
            None => trace!(session_id = %self.session_id, "duration unknown, sample skipped"),
        }
    }

    /// Aligns `is_playing` and the sampler with what the adapter reports.
    fn reconcile(&mut self, now: Instant) {
        let playing = !self.adapter.is_paused();
        if playing {
            if !self.state.is_playing || self.sampler.is_none() {
                self.enter_playing(now);
            }
        } else if self.state.is_playing {
            self.leave_playing(PlaybackPhase::Paused);
        }
    }

    fn enter_playing(&mut self, now: Instant) {
        self.state.is_playing = true;
        self.phase = PlaybackPhase::Playing;
        if self.sampler.is_none() {
            self.sampler = Some(ProgressSampler::start(self.sample_interval, now));
            debug!(session_id = %self.session_id, interval = ?self.sample_interval, "sampler started");
        }
    }

    fn leave_playing(&mut self, phase: PlaybackPhase) {
        self.state.is_playing = false;
        self.phase = phase;
        self.cancel_sampler();
    }

    fn cancel_sampler(&mut self) {
        if let Some(sampler) = self.sampler.take() {
            debug!(session_id = %self.session_id, ticks = sampler.ticks(), "sampler stopped");
        }
    }
}

impl<A: MediaAdapter> Drop for PlaybackController<A> {
    fn drop(&mut self) {
        self.cancel_sampler();
        self.adapter.detach();
        info!(session_id = %self.session_id, "playback session unmounted");
    }
}
