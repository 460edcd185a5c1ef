use eframe::egui;

use crate::renderer::gst_adapter::VideoFrame;

const DEFAULT_ASPECT_RATIO: f32 = 16.0 / 9.0;

/// The clickable media surface: decoded frames, or the poster image until
/// playback first starts.
pub struct VideoSurface {
    pub texture: Option<egui::TextureHandle>,
    pub poster: Option<String>,
    pub aspect_ratio: f32,
    has_played: bool,
}

impl VideoSurface {
    pub fn new(poster: Option<String>, aspect_ratio: Option<f32>) -> Self {
        Self {
            texture: None,
            poster,
            aspect_ratio: aspect_ratio.unwrap_or(DEFAULT_ASPECT_RATIO),
            has_played: false,
        }
    }

    /// Latches once playback has started; stop or end never bring the
    /// poster back.
    pub fn note_playing(&mut self, is_playing: bool) {
        self.has_played |= is_playing;
    }

    pub fn poster_visible(&self) -> bool {
        self.poster.is_some() && !self.has_played
    }

    /// Upload `frame` into the surface texture.
    pub fn update_frame(&mut self, ctx: &egui::Context, frame: &VideoFrame) {
        if frame.width == 0 || frame.height == 0 {
            return;
        }
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize],
            &frame.data,
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("video_frame", image, egui::TextureOptions::LINEAR));
            }
        }
        self.aspect_ratio = frame.width as f32 / frame.height as f32;
    }

    /// Show the surface, letterboxed into the available space.
    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let available = ui.available_size();
        let size = fit_to_aspect(available, self.aspect_ratio);
        let offset = (available - size) * 0.5;
        let rect = egui::Rect::from_min_size(ui.cursor().min + offset, size);
        let response = ui.allocate_rect(rect, egui::Sense::click());

        ui.painter().rect_filled(rect, 0.0, egui::Color32::BLACK);
        match (&self.texture, &self.poster) {
            (_, Some(poster)) if !self.has_played => {
                egui::Image::new(poster.as_str())
                    .fit_to_exact_size(size)
                    .paint_at(ui, rect);
            }
            (Some(texture), _) => {
                egui::Image::from_texture(texture).paint_at(ui, rect);
            }
            _ => {
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "No frame loaded",
                    egui::FontId::proportional(14.0),
                    egui::Color32::GRAY,
                );
            }
        }
        response
    }
}

/// Largest size with the given aspect ratio that fits in `available`.
pub fn fit_to_aspect(available: egui::Vec2, aspect_ratio: f32) -> egui::Vec2 {
    if available.x <= 0.0 || available.y <= 0.0 || !aspect_ratio.is_normal() {
        return available.max(egui::Vec2::ZERO);
    }
    let width = available.x.min(available.y * aspect_ratio);
    egui::vec2(width, width / aspect_ratio)
}
