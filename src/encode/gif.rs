use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};

use crate::clock::state::AnimationProps;
use crate::encode::sink::{FrameSink, SinkConfig, ensure_parent_dir};
use crate::encode::still::flatten_to_rgba;
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::frame::FrameRGBA;

/// GIF frame delays are stored in centiseconds; players clamp anything faster than this.
const GIF_MAX_RELIABLE_FPS: u32 = 50;
/// Quantizer speed passed to the encoder (1 = best, 30 = fastest).
const GIF_SPEED: i32 = 10;

/// Animated, infinitely looping GIF written with the `image` crate.
pub struct GifSink {
    out_path: PathBuf,
    encoder: Option<GifEncoder<BufWriter<File>>>,
    cfg: Option<SinkConfig>,
    delay_ms: u32,
}

impl GifSink {
    /// Create a sink writing to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            encoder: None,
            cfg: None,
            delay_ms: 0,
        }
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> SketchResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(SketchError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(SketchError::validation(
                "gif sink width/height must fit in 16 bits",
            ));
        }
        if cfg.fps > GIF_MAX_RELIABLE_FPS {
            tracing::warn!(
                fps = cfg.fps,
                "GIF export above {GIF_MAX_RELIABLE_FPS} fps will play back slower in most viewers"
            );
        }

        ensure_parent_dir(&self.out_path)?;
        let file = File::create(&self.out_path)
            .with_context(|| format!("create gif '{}'", self.out_path.display()))?;
        let mut encoder = GifEncoder::new_with_speed(BufWriter::new(file), GIF_SPEED);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| SketchError::export(format!("gif setup failed: {e}")))?;

        self.delay_ms = 1000 / cfg.fps.max(1);
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, props: &AnimationProps, frame: &FrameRGBA) -> SketchResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SketchError::export("gif sink not started"))?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(SketchError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        let rgba = flatten_to_rgba(frame, cfg.background)?;
        let buffer = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
            .ok_or_else(|| SketchError::export("frame buffer does not match its dimensions"))?;
        let delay = image::Delay::from_numer_denom_ms(self.delay_ms, 1);

        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| SketchError::export("gif sink is already finalized"))?;
        encoder
            .encode_frame(image::Frame::from_parts(buffer, 0, 0, delay))
            .map_err(|e| {
                SketchError::export(format!("failed to encode gif frame {}: {e}", props.frame))
            })?;
        Ok(())
    }

    fn end(&mut self) -> SketchResult<()> {
        // Dropping the encoder writes the GIF trailer and flushes the file.
        self.encoder
            .take()
            .ok_or_else(|| SketchError::export("gif sink not started"))?;
        self.cfg = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
