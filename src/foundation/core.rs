use crate::foundation::error::{SketchError, SketchResult};

/// Loop length of a sketch, in milliseconds.
///
/// `Infinite` means the animation never wraps: `time` grows without bound and `playhead` stays
/// at `0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SketchDuration {
    /// Bounded loop of the given length in milliseconds.
    Finite(f64),
    /// Unbounded loop.
    Infinite,
}

impl SketchDuration {
    /// Build a duration from milliseconds. `f64::INFINITY` maps to [`SketchDuration::Infinite`].
    pub fn from_millis(ms: f64) -> SketchResult<Self> {
        if ms == f64::INFINITY {
            return Ok(Self::Infinite);
        }
        if !ms.is_finite() || ms < 0.0 {
            return Err(SketchError::validation(format!(
                "duration must be a non-negative number of milliseconds, got {ms}"
            )));
        }
        Ok(Self::Finite(ms))
    }

    /// Length in milliseconds, or `None` for an unbounded loop.
    pub fn as_millis(self) -> Option<f64> {
        match self {
            Self::Finite(ms) => Some(ms),
            Self::Infinite => None,
        }
    }

    /// `true` when the loop has a finite length.
    pub fn is_finite(self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// Whole frames that fit into one loop at `fps`: `floor(duration * fps / 1000)`.
    pub fn total_frames(self, fps: u32) -> Option<u64> {
        self.as_millis()
            .map(|ms| (ms * f64::from(fps) / 1000.0).floor().max(0.0) as u64)
    }

    /// Normalized position of `time` inside the loop; constantly `0` when unbounded.
    pub fn playhead(self, time: f64) -> f64 {
        match self {
            Self::Finite(ms) if ms > 0.0 => time / ms,
            _ => 0.0,
        }
    }
}

impl serde::Serialize for SketchDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_millis().serialize(serializer)
    }
}

/// Milliseconds between two frames at `fps`.
pub fn frame_interval_ms(fps: u32) -> f64 {
    1000.0 / f64::from(fps.max(1))
}

/// Normalize a user-supplied frame rate: floor it and keep it at least `1`.
pub fn normalize_fps(fps: f64) -> SketchResult<u32> {
    if !fps.is_finite() {
        return Err(SketchError::validation(format!(
            "fps must be a finite number, got {fps}"
        )));
    }
    Ok(fps.floor().clamp(1.0, f64::from(u32::MAX)) as u32)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
