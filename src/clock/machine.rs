use crate::clock::state::{AnimationProps, ClockConfig, ClockState};
use crate::foundation::core::SketchDuration;

/// Result of one clock step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Paused: props are frozen, nothing to render.
    Paused,
    /// Less than one frame interval elapsed since the last rendered frame.
    Throttled,
    /// Props were advanced and should be rendered.
    Render {
        /// The time origin was reset on this tick (start, loop wrap or recording start).
        reset: bool,
        /// Recording reached its last frame on this tick.
        finished: bool,
    },
}

impl Advance {
    /// `true` when the tick produced new props.
    pub fn should_render(self) -> bool {
        matches!(self, Self::Render { .. })
    }
}

/// Frame index for a fixed playback rate.
///
/// Bounded loops derive the frame from the playhead so it always agrees with the elapsed
/// fraction, even after throttled ticks. Unbounded loops derive it from elapsed time.
pub fn fixed_rate_frame(
    duration: SketchDuration,
    fps: u32,
    total_frames: Option<u64>,
    time: f64,
    playhead: f64,
) -> u64 {
    match (duration, total_frames) {
        (SketchDuration::Finite(_), Some(total)) => {
            let f = (playhead * total as f64).floor().max(0.0) as u64;
            f.min(total.saturating_sub(1))
        }
        _ => (time * f64::from(fps) / 1000.0).floor().max(0.0) as u64,
    }
}

/// Time/frame clock and pause/record mode machine.
///
/// The clock is fed raw host timestamps (milliseconds, non-decreasing) and derives
/// [`AnimationProps`] from them. It never fails: negative deltas are clamped and logged, a
/// zero-length loop wraps on every tick.
#[derive(Clone, Debug)]
pub struct Clock {
    cfg: ClockConfig,
    state: ClockState,
    props: AnimationProps,
    paused: bool,
}

impl Clock {
    /// Create a clock. The first tick establishes the time origin.
    pub fn new(cfg: ClockConfig) -> Self {
        Self {
            state: ClockState::new(&cfg),
            props: AnimationProps::initial(&cfg),
            cfg,
            paused: false,
        }
    }

    /// Timing configuration.
    pub fn config(&self) -> &ClockConfig {
        &self.cfg
    }

    /// Current bookkeeping.
    pub fn state(&self) -> &ClockState {
        &self.state
    }

    /// Props computed by the most recent rendered tick.
    pub fn props(&self) -> &AnimationProps {
        &self.props
    }

    /// `true` while paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flip between paused and playing. Returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    /// Freeze props. Pause time is measured from the last tick's timestamp.
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.state.paused_start_time = self.state.timestamp;
    }

    /// Resume after [`Clock::pause`]. The next tick continues from the frozen time.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Request a hard reset of the time origin on the next tick.
    pub fn request_reset(&mut self) {
        self.state.time_resetted = true;
    }

    /// Echo new surface dimensions into props.
    pub fn set_surface(&mut self, width: u32, height: u32, pixel_ratio: f64) {
        self.props.width = width;
        self.props.height = height;
        self.props.pixel_ratio = pixel_ratio;
    }

    /// Playback step.
    ///
    /// Frame rule:
    /// - bounded, fixed fps: `floor(playhead * total_frames)`
    /// - unbounded, fixed fps: `floor(time * fps / 1000)`
    /// - uncapped fps: one frame per rendered tick, restarting at `0` on every reset
    pub fn advance(&mut self, raw_timestamp: f64) -> Advance {
        if self.paused {
            self.accumulate_pause(raw_timestamp);
            return Advance::Paused;
        }

        let ts = raw_timestamp - self.state.paused_duration;
        self.state.timestamp = ts;

        let mut reset = false;
        if self.state.time_resetted {
            self.reset_origin(ts);
            // Hard resets start a fresh delta as well.
            self.state.last_timestamp = ts;
            reset = true;
        }

        let mut time = ts - self.state.start_time;
        if let SketchDuration::Finite(duration) = self.cfg.duration
            && !reset
            && time >= duration
        {
            self.reset_origin(ts);
            reset = true;
            time = 0.0;
        }

        let mut delta = ts - self.state.last_timestamp;
        if delta < 0.0 {
            tracing::warn!(
                delta_ms = delta,
                "clock went backwards; clamping deltaTime to 0"
            );
            delta = 0.0;
        }

        let interval = self.state.frame_interval;
        if let Some(interval) = interval
            && !reset
            && delta < interval
        {
            return Advance::Throttled;
        }

        let playhead = self.cfg.duration.playhead(time);
        let frame = match self.cfg.play_fps {
            Some(fps) => {
                fixed_rate_frame(self.cfg.duration, fps, self.cfg.total_frames, time, playhead)
            }
            None => {
                let f = self.state.next_frame;
                self.state.next_frame += 1;
                f
            }
        };

        self.props.time = time;
        self.props.delta_time = delta;
        self.props.playhead = playhead;
        self.props.frame = frame;
        self.props.total_frames = self.cfg.total_frames;

        self.state.last_timestamp = match interval {
            // Carry the remainder so rounding error does not compound over throttled ticks.
            Some(interval) if !reset => ts - (delta % interval),
            _ => ts,
        };

        Advance::Render {
            reset,
            finished: false,
        }
    }

    /// Start the recording regime: the next [`Clock::advance_recording`] emits frame `0`.
    pub fn begin_recording(&mut self) {
        self.state.record_frame_count = 0;
    }

    /// Recording step.
    ///
    /// Time is synthetic: `time = n * 1000 / export_fps` for the `n`-th recorded frame, so the
    /// output is identical no matter how long rendering and encoding take in wall time.
    pub fn advance_recording(&mut self, raw_timestamp: f64) -> Advance {
        if self.paused {
            self.accumulate_pause(raw_timestamp);
            return Advance::Paused;
        }
        self.state.timestamp = raw_timestamp - self.state.paused_duration;

        let n = match self.cfg.export_total_frames {
            Some(total) if total > 0 => self.state.record_frame_count.min(total - 1),
            _ => self.state.record_frame_count,
        };
        let time = n as f64 * 1000.0 / f64::from(self.cfg.export_fps);

        self.props.time = time;
        self.props.delta_time = self.cfg.export_interval();
        self.props.playhead = self.cfg.duration.playhead(time);
        self.props.frame = n;
        self.props.total_frames = self.cfg.export_total_frames;

        self.state.record_frame_count = n + 1;
        let finished = self
            .cfg
            .export_total_frames
            .is_some_and(|total| n.saturating_add(1) >= total);

        Advance::Render {
            reset: n == 0,
            finished,
        }
    }

    /// Give back the frame number handed out by the last [`Clock::advance_recording`], so the
    /// next recording step repeats it. Used when that frame was never rendered.
    pub fn rewind_recording_frame(&mut self) {
        self.state.record_frame_count = self.state.record_frame_count.saturating_sub(1);
    }

    /// Leave the recording regime. Playback restarts from a fresh loop origin.
    pub fn end_recording(&mut self) {
        self.state.record_frame_count = 0;
        self.props.total_frames = self.cfg.total_frames;
        self.state.time_resetted = true;
    }

    fn accumulate_pause(&mut self, raw_timestamp: f64) {
        self.state.paused_duration = raw_timestamp - self.state.paused_start_time;
    }

    fn reset_origin(&mut self, ts: f64) {
        self.state.start_time = ts;
        self.state.time_resetted = false;
        self.state.next_frame = 0;
        self.props.time = 0.0;
        self.props.playhead = 0.0;
        self.props.frame = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/machine.rs"]
mod tests;
