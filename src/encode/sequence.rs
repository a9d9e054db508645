use std::path::PathBuf;

use anyhow::Context as _;

use crate::clock::state::AnimationProps;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::encode::still::save_still;
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::frame::FrameRGBA;
use crate::settings::model::FrameFormat;

/// Writes each recorded frame as a numbered image (`00000.png`, `00001.png`, ...) into a
/// directory.
#[derive(Debug)]
pub struct SequenceSink {
    dir: PathBuf,
    format: FrameFormat,
    cfg: Option<SinkConfig>,
    written: u64,
}

impl SequenceSink {
    /// Create a sink writing `format` images into `dir`.
    pub fn new(dir: impl Into<PathBuf>, format: FrameFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
            cfg: None,
            written: 0,
        }
    }

    /// Path of frame `index`.
    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.dir
            .join(format!("{index:05}.{}", self.format.extension()))
    }
}

impl FrameSink for SequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> SketchResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frame directory '{}'", self.dir.display()))?;
        self.cfg = Some(cfg);
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, props: &AnimationProps, frame: &FrameRGBA) -> SketchResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SketchError::export("sequence sink not started"))?;
        save_still(frame, &self.frame_path(props.frame), self.format, cfg.background)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> SketchResult<()> {
        if self.cfg.take().is_none() {
            return Err(SketchError::export("sequence sink not started"));
        }
        tracing::debug!(frames = self.written, dir = %self.dir.display(), "wrote frame sequence");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sequence.rs"]
mod tests;
