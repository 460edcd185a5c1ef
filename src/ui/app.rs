use std::time::{Duration, Instant};

use eframe::egui;

use crate::config::PlayerConfig;
use crate::renderer::adapter::{FullscreenHost, MediaAdapter};
use crate::renderer::gst_adapter::GstAdapter;
use crate::renderer::player_bridge::PlaybackController;
use crate::types::media::{MediaInfo, MediaSource};
use crate::types::playback_state::ControlsResponse;
use crate::ui::controls::control_strip;
use crate::ui::video_player::VideoSurface;

/// Repaint cadence while frames are flowing.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// How often the bus is checked while paused, to notice external changes.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct PlayerApp {
    controller: PlaybackController<GstAdapter>,
    surface: VideoSurface,
    viewport: ViewportObserver,
}

impl PlayerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        adapter: GstAdapter,
        source: &MediaSource,
        info: &MediaInfo,
        config: &PlayerConfig,
    ) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        let controller = PlaybackController::mount(adapter, config, config.window_size[0]);
        Self {
            controller,
            surface: VideoSurface::new(source.poster.clone(), info.aspect_ratio()),
            viewport: ViewportObserver::default(),
        }
    }
}

/// Last value read from a host input that raises no change event.
#[derive(Debug)]
struct Observed<T> {
    last: Option<T>,
}

impl<T> Default for Observed<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: Copy + PartialEq> Observed<T> {
    /// `Some(value)` only when it differs from the previous observation.
    fn changed(&mut self, value: T) -> Option<T> {
        if self.last == Some(value) {
            return None;
        }
        self.last = Some(value);
        Some(value)
    }
}

/// Turns per-frame viewport readings into controller notifications.
///
/// The viewport's fullscreen flag lags a `ViewportCommand` by a frame or
/// more, so only a transition counts as an external change.
#[derive(Debug, Default)]
struct ViewportObserver {
    width: Observed<f32>,
    fullscreen: Observed<bool>,
}

impl ViewportObserver {
    fn forward<A: MediaAdapter>(
        &mut self,
        controller: &mut PlaybackController<A>,
        width: f32,
        fullscreen: Option<bool>,
    ) {
        if let Some(width) = self.width.changed(width) {
            controller.on_viewport_resize(width);
        }
        if let Some(fullscreen) = fullscreen.and_then(|f| self.fullscreen.changed(f)) {
            controller.sync_fullscreen(fullscreen);
        }
    }
}

/// Fullscreen through the eframe viewport.
struct ViewportHost<'a>(&'a egui::Context);

impl FullscreenHost for ViewportHost<'_> {
    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.0
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
    }
}

impl eframe::App for PlayerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let width = ctx.screen_rect().width();
        let fullscreen = ctx.input(|i| i.viewport().fullscreen);
        self.viewport.forward(&mut self.controller, width, fullscreen);

        let next_sample = self.controller.poll(Instant::now());
        if let Some(frame) = self.controller.adapter_mut().take_frame() {
            self.surface.update_frame(ctx, &frame);
        }

        let view = self.controller.view();
        self.surface.note_playing(view.is_playing);
        let mut response = ControlsResponse::default();

        egui::TopBottomPanel::bottom("controls_panel").show(ctx, |ui| {
            response = control_strip(ui, &view);
        });
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                if self.surface.show(ui).clicked() {
                    response.toggle_playback = true;
                }
            });

        if !response.is_empty() {
            self.controller.apply(&response, &mut ViewportHost(ctx));
        }

        if self.controller.state().is_playing {
            ctx.request_repaint_after(FRAME_INTERVAL);
        } else {
            ctx.request_repaint_after(next_sample.unwrap_or(IDLE_POLL_INTERVAL));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::adapter::fake::{FakeAdapter, FakeHost};
    use crate::types::control_mode::ControlMode;

    fn mounted() -> PlaybackController<FakeAdapter> {
        PlaybackController::mount(FakeAdapter::new(Some(60.0)), &PlayerConfig::default(), 1024.0)
    }

    #[test]
    fn test_observed_reports_only_transitions() {
        let mut seen = Observed::default();
        assert_eq!(seen.changed(false), Some(false));
        assert_eq!(seen.changed(false), None);
        assert_eq!(seen.changed(true), Some(true));
        assert_eq!(seen.changed(true), None);
    }

    #[test]
    fn test_stale_fullscreen_reading_keeps_toggle() {
        let mut ctl = mounted();
        let mut host = FakeHost::default();
        let mut viewport = ViewportObserver::default();
        viewport.forward(&mut ctl, 1024.0, Some(false));

        ctl.toggle_fullscreen(&mut host);
        // The viewport has not caught up yet and still reports windowed.
        viewport.forward(&mut ctl, 1024.0, Some(false));
        viewport.forward(&mut ctl, 1024.0, Some(false));

        assert!(ctl.state().is_fullscreen);
        assert_eq!(host.requests, vec![true]);
    }

    #[test]
    fn test_fullscreen_exit_by_host_is_mirrored() {
        let mut ctl = mounted();
        let mut host = FakeHost::default();
        let mut viewport = ViewportObserver::default();
        viewport.forward(&mut ctl, 1024.0, Some(false));

        ctl.toggle_fullscreen(&mut host);
        viewport.forward(&mut ctl, 1024.0, Some(true));
        assert!(ctl.state().is_fullscreen);

        // Escape pressed: the window leaves fullscreen on its own.
        viewport.forward(&mut ctl, 1024.0, Some(false));
        assert!(!ctl.state().is_fullscreen);
        assert_eq!(host.requests, vec![true]);
    }

    #[test]
    fn test_unknown_fullscreen_reading_is_ignored() {
        let mut ctl = mounted();
        let mut host = FakeHost::default();
        let mut viewport = ViewportObserver::default();

        ctl.toggle_fullscreen(&mut host);
        viewport.forward(&mut ctl, 1024.0, None);

        assert!(ctl.state().is_fullscreen);
    }

    #[test]
    fn test_width_change_switches_control_mode() {
        let mut ctl = mounted();
        let mut viewport = ViewportObserver::default();
        viewport.forward(&mut ctl, 1024.0, None);
        assert_eq!(ctl.state().control_mode, ControlMode::Custom);

        viewport.forward(&mut ctl, 500.0, None);
        assert_eq!(ctl.state().control_mode, ControlMode::Native);
    }
}
