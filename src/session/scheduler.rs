use std::time::{Duration, Instant};

/// Source of display-refresh timestamps, the host side of the animation loop.
///
/// Each call blocks (or not) until the next refresh and returns its timestamp in milliseconds
/// on a monotonic timeline, or `None` when the host has no more frames to offer.
pub trait FrameScheduler {
    /// Timestamp of the next refresh.
    fn next_frame(&mut self) -> Option<f64>;
}

/// Deterministic host with a fixed refresh interval. Never sleeps.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedHost {
    interval_ms: f64,
    next_ms: f64,
    remaining: Option<u64>,
}

impl SimulatedHost {
    /// Host refreshing at `refresh_hz`, starting at timestamp `0`.
    pub fn new(refresh_hz: f64) -> Self {
        Self::with_interval(1000.0 / refresh_hz.max(f64::MIN_POSITIVE))
    }

    /// Host refreshing every `interval_ms`, starting at timestamp `0`.
    pub fn with_interval(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            next_ms: 0.0,
            remaining: None,
        }
    }

    /// Start the timeline at `start_ms` instead of `0`.
    pub fn starting_at(mut self, start_ms: f64) -> Self {
        self.next_ms = start_ms;
        self
    }

    /// Stop after `frames` refreshes.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }
}

impl FrameScheduler for SimulatedHost {
    fn next_frame(&mut self) -> Option<f64> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        let ts = self.next_ms;
        self.next_ms += self.interval_ms;
        Some(ts)
    }
}

/// Wall-clock host that sleeps until each refresh deadline.
#[derive(Clone, Debug)]
pub struct RealtimeHost {
    origin: Instant,
    interval: Duration,
    next_deadline: Duration,
    until: Option<Duration>,
}

impl RealtimeHost {
    /// Host refreshing at `refresh_hz`, timed from now.
    pub fn new(refresh_hz: f64) -> Self {
        let hz = if refresh_hz.is_finite() && refresh_hz > 0.0 {
            refresh_hz
        } else {
            60.0
        };
        Self {
            origin: Instant::now(),
            interval: Duration::from_secs_f64(1.0 / hz),
            next_deadline: Duration::ZERO,
            until: None,
        }
    }

    /// Stop offering frames once `limit` of wall time has elapsed.
    pub fn for_duration(mut self, limit: Duration) -> Self {
        self.until = Some(limit);
        self
    }
}

impl FrameScheduler for RealtimeHost {
    fn next_frame(&mut self) -> Option<f64> {
        let elapsed = self.origin.elapsed();
        if self.until.is_some_and(|limit| elapsed >= limit) {
            return None;
        }
        if let Some(wait) = self.next_deadline.checked_sub(elapsed) {
            std::thread::sleep(wait);
        }
        // Missed deadlines are skipped rather than replayed in a burst.
        let now = self.origin.elapsed();
        while self.next_deadline <= now {
            self.next_deadline += self.interval;
        }
        Some(now.as_secs_f64() * 1000.0)
    }
}

/// Adapter turning any iterator of timestamps into a [`FrameScheduler`].
#[derive(Clone, Debug)]
pub struct TimestampFeed<I>(pub I);

impl<I: Iterator<Item = f64>> FrameScheduler for TimestampFeed<I> {
    fn next_frame(&mut self) -> Option<f64> {
        self.0.next()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/scheduler.rs"]
mod tests;
