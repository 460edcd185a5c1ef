use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vidstrip::renderer::gst_adapter::GstAdapter;
use vidstrip::types::media::{MediaInfo, MediaSource};
use vidstrip::ui::app::PlayerApp;
use vidstrip::{PlayerConfig, PlayerError};

#[derive(Debug, Parser)]
#[command(name = "vidstrip", version, about = "Video player with adaptive controls")]
struct Cli {
    /// Media file or URI. A file picker opens when omitted.
    media: Option<String>,

    /// Poster image shown before playback starts.
    #[arg(long)]
    poster: Option<String>,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width (px) below which the compact controls are used.
    #[arg(long)]
    breakpoint: Option<f32>,

    /// Progress sampling interval while playing.
    #[arg(long)]
    sample_interval_ms: Option<u64>,

    /// Start muted.
    #[arg(long)]
    muted: bool,
}

fn main() -> Result<(), PlayerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vidstrip=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let media = match cli.media.clone() {
        Some(media) => media,
        None => pick_media().ok_or(PlayerError::NoMedia)?,
    };
    let mut source = MediaSource::from_location(&media)?;
    if let Some(poster) = cli.poster.as_deref() {
        source = source.with_poster(poster)?;
    }

    let media_info = MediaInfo::probe(&source);
    let adapter = GstAdapter::open(&source)?;
    info!(uri = %source.uri, duration = ?media_info.duration, "opening player");

    let title = format!("vidstrip - {}", display_name(&media));
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            Ok(Box::new(PlayerApp::new(
                cc,
                adapter,
                &source,
                &media_info,
                &config,
            )))
        }),
    )
    .map_err(|e| PlayerError::Window(e.to_string()))
}

fn load_config(cli: &Cli) -> Result<PlayerConfig, PlayerError> {
    let mut config = match &cli.config {
        Some(path) => PlayerConfig::load_from_file(path)?,
        None => PlayerConfig::default(),
    };
    if let Some(breakpoint) = cli.breakpoint {
        config.breakpoint_px = breakpoint;
    }
    if let Some(interval) = cli.sample_interval_ms {
        config.sample_interval_ms = interval;
    }
    if cli.muted {
        config.start_muted = true;
    }
    Ok(config)
}

fn pick_media() -> Option<String> {
    rfd::FileDialog::new()
        .add_filter("Media", &["mp4", "mov", "mkv", "webm", "avi", "mp3", "ogg"])
        .pick_file()
        .map(|path| path.to_string_lossy().to_string())
}

fn display_name(media: &str) -> &str {
    media.rsplit(['/', '\\']).next().unwrap_or(media)
}
