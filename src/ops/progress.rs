//! Position arithmetic shared by the sampler and the seek bar.
//!
//! Every function here treats a missing, zero, negative or non-finite
//! duration as "metadata not loaded yet" and returns `None` instead of a
//! `NaN` or infinite value.

/// Returns the usable duration, or `None` while metadata is unavailable.
pub fn known_duration(duration: Option<f64>) -> Option<f64> {
    duration.filter(|d| d.is_finite() && *d > 0.0)
}

/// Converts a playback position into a percentage in `[0, 100]`.
pub fn progress_percent(current_time: f64, duration: Option<f64>) -> Option<f64> {
    let duration = known_duration(duration)?;
    if !current_time.is_finite() {
        return None;
    }
    Some((current_time / duration * 100.0).clamp(0.0, 100.0))
}

/// Maps a seek-bar percentage onto a position in seconds.
pub fn seek_target(percent: f64, duration: Option<f64>) -> Option<f64> {
    let duration = known_duration(duration)?;
    let percent = clamp_percent(percent)?;
    Some(percent / 100.0 * duration)
}

pub fn clamp_percent(percent: f64) -> Option<f64> {
    percent.is_finite().then(|| percent.clamp(0.0, 100.0))
}

pub fn clamp_volume(volume: f64) -> Option<f64> {
    volume.is_finite().then(|| volume.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent_halfway() {
        assert_eq!(progress_percent(30.0, Some(60.0)), Some(50.0));
    }

    #[test]
    fn test_progress_percent_skips_unknown_duration() {
        assert_eq!(progress_percent(12.0, None), None);
        assert_eq!(progress_percent(12.0, Some(f64::NAN)), None);
        assert_eq!(progress_percent(12.0, Some(0.0)), None);
        assert_eq!(progress_percent(12.0, Some(f64::INFINITY)), None);
    }

    #[test]
    fn test_progress_percent_clamps_overshoot() {
        // Decoders occasionally report a position a few ms past the end.
        assert_eq!(progress_percent(60.2, Some(60.0)), Some(100.0));
        assert_eq!(progress_percent(-1.0, Some(60.0)), Some(0.0));
    }

    #[test]
    fn test_seek_target() {
        assert_eq!(seek_target(25.0, Some(200.0)), Some(50.0));
        assert_eq!(seek_target(0.0, Some(200.0)), Some(0.0));
        assert_eq!(seek_target(100.0, Some(200.0)), Some(200.0));
        assert_eq!(seek_target(150.0, Some(200.0)), Some(200.0));
        assert_eq!(seek_target(50.0, None), None);
        assert_eq!(seek_target(f64::NAN, Some(200.0)), None);
    }

    #[test]
    fn test_clamp_volume() {
        assert_eq!(clamp_volume(0.35), Some(0.35));
        assert_eq!(clamp_volume(1.4), Some(1.0));
        assert_eq!(clamp_volume(-0.2), Some(0.0));
        assert_eq!(clamp_volume(f64::NAN), None);
    }
}
