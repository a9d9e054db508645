use serde::Serialize;

use crate::foundation::core::{SketchDuration, frame_interval_ms};
use crate::settings::resolve::ResolvedSettings;

/// Timing configuration the clock is built from. Derived once from [`ResolvedSettings`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClockConfig {
    /// Loop length.
    pub duration: SketchDuration,
    /// Interactive playback frame rate; `None` means uncapped.
    pub play_fps: Option<u32>,
    /// Frame rate used while recording.
    pub export_fps: u32,
    /// Frames per loop during playback.
    pub total_frames: Option<u64>,
    /// Frames per loop while recording.
    pub export_total_frames: Option<u64>,
}

impl ClockConfig {
    /// Extract the timing fields of resolved settings.
    pub fn from_settings(settings: &ResolvedSettings) -> Self {
        Self {
            duration: settings.duration,
            play_fps: settings.play_fps,
            export_fps: settings.export_fps,
            total_frames: settings.total_frames,
            export_total_frames: settings.export_total_frames,
        }
    }

    /// Minimum spacing between rendered playback frames, or `None` when uncapped.
    pub fn frame_interval(&self) -> Option<f64> {
        self.play_fps.map(frame_interval_ms)
    }

    /// Exact spacing between recorded frames.
    pub fn export_interval(&self) -> f64 {
        frame_interval_ms(self.export_fps)
    }
}

/// Mutable temporal bookkeeping. Owned by [`Clock`](crate::Clock); exposed read-only.
///
/// All values are milliseconds on the host's monotonic timeline, shifted by the accumulated
/// pause time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClockState {
    /// Current pause-adjusted timestamp.
    pub timestamp: f64,
    /// Origin of the current loop iteration (or recording).
    pub start_time: f64,
    /// Timestamp the previous rendered frame is measured from.
    pub last_timestamp: f64,
    /// Pause-adjusted timestamp at which the current pause began.
    pub paused_start_time: f64,
    /// Total wall time spent paused.
    pub paused_duration: f64,
    /// Throttle interval derived from `play_fps`.
    pub frame_interval: Option<f64>,
    /// One-shot request for a hard clock reset on the next tick.
    pub time_resetted: bool,
    /// Next frame index handed out when playback is uncapped.
    pub next_frame: u64,
    /// Synthetic frame counter driving the recording regime.
    pub record_frame_count: u64,
}

impl ClockState {
    pub(crate) fn new(cfg: &ClockConfig) -> Self {
        Self {
            timestamp: 0.0,
            start_time: 0.0,
            last_timestamp: 0.0,
            paused_start_time: 0.0,
            paused_duration: 0.0,
            frame_interval: cfg.frame_interval(),
            // The first tick establishes the time origin.
            time_resetted: true,
            next_frame: 0,
            record_frame_count: 0,
        }
    }
}

/// Per-tick values handed to the sketch. Written only by the clock.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationProps {
    /// Milliseconds elapsed in the current loop iteration.
    pub time: f64,
    /// Milliseconds since the previous rendered frame.
    pub delta_time: f64,
    /// `time / duration` in `[0, 1)`; `0` when the loop is unbounded.
    pub playhead: f64,
    /// Frame index; see [`Clock::advance`](crate::Clock::advance) for the four regimes.
    pub frame: u64,
    /// Frames per loop for the current mode (playback or recording).
    pub total_frames: Option<u64>,
    /// Loop length.
    pub duration: SketchDuration,
    /// Physical surface width.
    pub width: u32,
    /// Physical surface height.
    pub height: u32,
    /// Physical pixels per logical pixel.
    pub pixel_ratio: f64,
}

impl AnimationProps {
    pub(crate) fn initial(cfg: &ClockConfig) -> Self {
        Self {
            time: 0.0,
            delta_time: 0.0,
            playhead: 0.0,
            frame: 0,
            total_frames: cfg.total_frames,
            duration: cfg.duration,
            width: 0,
            height: 0,
            pixel_ratio: 1.0,
        }
    }
}
