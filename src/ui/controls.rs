//! Control strips drawn under the media surface.
//!
//! Both strips only read a [`PlaybackView`] and report what the user did;
//! the controller decides what happens.

use eframe::egui;

use crate::types::control_mode::ControlMode;
use crate::types::playback_state::{ControlsResponse, PlaybackView};

const TIME_LABEL_WIDTH: f32 = 110.0;
const VOLUME_SLIDER_WIDTH: f32 = 80.0;

/// Draws the strip matching `view.control_mode`.
pub fn control_strip(ui: &mut egui::Ui, view: &PlaybackView) -> ControlsResponse {
    match view.control_mode {
        ControlMode::Native => native_strip(ui, view),
        ControlMode::Custom => custom_strip(ui, view),
    }
}

/// Full strip: [Play/Pause] [Stop] [Seek] [Time] [Mute] [Volume] [Fullscreen]
pub fn custom_strip(ui: &mut egui::Ui, view: &PlaybackView) -> ControlsResponse {
    let mut response = ControlsResponse::default();

    ui.horizontal(|ui| {
        if play_pause_button(ui, view.is_playing) {
            response.toggle_playback = true;
        }
        if ui.button("⏹").on_hover_text("Stop").clicked() {
            response.stop = true;
        }

        // Room for mute, volume and fullscreen on the right.
        let seek_width =
            (ui.available_width() - TIME_LABEL_WIDTH - VOLUME_SLIDER_WIDTH - 120.0).max(80.0);
        if let Some(percent) = seek_bar(ui, view, seek_width) {
            response.seek_to = Some(percent);
        }
        ui.label(view.time_label());

        if mute_button(ui, view.muted) {
            response.toggle_mute = true;
        }
        let mut volume = view.volume;
        ui.spacing_mut().slider_width = VOLUME_SLIDER_WIDTH;
        let volume_slider = egui::Slider::new(&mut volume, 0.0..=1.0)
            .step_by(0.05)
            .show_value(false);
        if ui.add(volume_slider).changed() {
            response.set_volume = Some(volume);
        }

        let (icon, hint) = if view.is_fullscreen {
            ("🗗", "Exit fullscreen")
        } else {
            ("⛶", "Fullscreen")
        };
        if ui.button(icon).on_hover_text(hint).clicked() {
            response.toggle_fullscreen = true;
        }
    });

    response
}

/// Compact strip used on narrow viewports, in place of the platform's own
/// media controls.
pub fn native_strip(ui: &mut egui::Ui, view: &PlaybackView) -> ControlsResponse {
    let mut response = ControlsResponse::default();

    ui.horizontal(|ui| {
        if play_pause_button(ui, view.is_playing) {
            response.toggle_playback = true;
        }
        let seek_width = (ui.available_width() - TIME_LABEL_WIDTH - 40.0).max(60.0);
        if let Some(percent) = seek_bar(ui, view, seek_width) {
            response.seek_to = Some(percent);
        }
        ui.label(view.time_label());
        if mute_button(ui, view.muted) {
            response.toggle_mute = true;
        }
    });

    response
}

fn play_pause_button(ui: &mut egui::Ui, is_playing: bool) -> bool {
    let (icon, hint) = if is_playing {
        ("⏸", "Pause")
    } else {
        ("▶", "Play")
    };
    ui.button(icon).on_hover_text(hint).clicked()
}

fn mute_button(ui: &mut egui::Ui, muted: bool) -> bool {
    let (icon, hint) = if muted {
        ("🔇", "Unmute")
    } else {
        ("🔊", "Mute")
    };
    ui.button(icon).on_hover_text(hint).clicked()
}

/// Seek slider over `[0, 100]`. Disabled until the duration is known.
fn seek_bar(ui: &mut egui::Ui, view: &PlaybackView, width: f32) -> Option<f64> {
    let mut percent = view.progress_percent;
    ui.spacing_mut().slider_width = width;
    let slider = egui::Slider::new(&mut percent, 0.0..=100.0).show_value(false);
    let changed = ui.add_enabled(view.duration.is_some(), slider).changed();
    changed.then_some(percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::playback_state::PlaybackPhase;

    fn view(control_mode: ControlMode) -> PlaybackView {
        PlaybackView {
            is_playing: true,
            progress_percent: 42.0,
            volume: 0.8,
            muted: false,
            is_fullscreen: false,
            control_mode,
            phase: PlaybackPhase::Playing,
            current_time: 42.0,
            duration: Some(100.0),
        }
    }

    fn render(view: &PlaybackView) -> ControlsResponse {
        let ctx = egui::Context::default();
        let mut response = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                response = Some(control_strip(ui, view));
            });
        });
        response.unwrap()
    }

    #[test]
    fn test_strips_report_nothing_without_input() {
        assert!(render(&view(ControlMode::Custom)).is_empty());
        assert!(render(&view(ControlMode::Native)).is_empty());
    }

    #[test]
    fn test_controls_response_is_empty() {
        assert!(ControlsResponse::default().is_empty());
        let response = ControlsResponse {
            seek_to: Some(10.0),
            ..ControlsResponse::default()
        };
        assert!(!response.is_empty());
    }
}
