use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::clock::state::AnimationProps;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, VideoCodec};
use crate::encode::gif::GifSink;
use crate::encode::naming::output_path;
use crate::encode::sequence::SequenceSink;
use crate::foundation::color::Rgba8;
use crate::foundation::error::SketchResult;
use crate::render::frame::FrameRGBA;
use crate::settings::model::{FrameFormat, FramesFormat};
use crate::settings::resolve::ResolvedSettings;

/// Configuration provided to a [`FrameSink`] when a recording starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames per second.
    pub fps: u32,
    /// Frames the recording will contain, when the loop is bounded.
    pub total_frames: Option<u64>,
    /// Color used to flatten alpha for formats without transparency.
    pub background: Rgba8,
}

/// Sink contract for consuming recorded frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing `props.frame`, starting
/// at `0`, between one `begin` and one `end`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SketchResult<()>;
    /// Push one frame together with the props it was rendered with.
    fn push_frame(&mut self, props: &AnimationProps, frame: &FrameRGBA) -> SketchResult<()>;
    /// Called once after the last frame is pushed. Finalizes the output.
    fn end(&mut self) -> SketchResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured `(frame index, frame)` pairs in push order.
    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    /// `true` once `end` was called.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SketchResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, props: &AnimationProps, frame: &FrameRGBA) -> SketchResult<()> {
        self.frames.push((props.frame, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SketchResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// A sink chosen for the current settings together with where it writes.
pub struct OpenedSink {
    /// Output file (or directory for image sequences).
    pub path: PathBuf,
    /// The sink itself, not yet begun.
    pub sink: Box<dyn FrameSink>,
}

impl std::fmt::Debug for OpenedSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenedSink")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Select the recording sink for `settings.frames_format`.
pub fn open_sink(settings: &ResolvedSettings, now: &NaiveDateTime) -> OpenedSink {
    let format = settings.frames_format;
    let (path, sink): (PathBuf, Box<dyn FrameSink>) = match format {
        FramesFormat::Webm | FramesFormat::Mp4 => {
            let path = output_path(settings, format.extension(), now);
            let codec = if format == FramesFormat::Mp4 {
                VideoCodec::H264
            } else {
                VideoCodec::Vp9
            };
            let sink = FfmpegSink::new(FfmpegSinkOpts::new(&path, codec));
            (path, Box::new(sink))
        }
        FramesFormat::Gif => {
            let path = output_path(settings, format.extension(), now);
            (path.clone(), Box::new(GifSink::new(path)))
        }
        FramesFormat::Png | FramesFormat::Jpeg => {
            let path = output_path(settings, "", now);
            let frame_format = if format == FramesFormat::Png {
                FrameFormat::Png
            } else {
                FrameFormat::Jpeg
            };
            (path.clone(), Box::new(SequenceSink::new(path, frame_format)))
        }
    };
    OpenedSink { path, sink }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> SketchResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
