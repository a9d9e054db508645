use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Serialize;

use crate::foundation::color::Rgba8;
use crate::foundation::core::{SketchDuration, normalize_fps};
use crate::foundation::error::{SketchError, SketchResult};
use crate::settings::model::{FrameFormat, FramesFormat, SketchMode, SketchSettings};

const DEFAULT_DIMENSIONS: [u32; 2] = [800, 600];
const DEFAULT_EXPORT_FPS: u32 = 60;

/// Fully-populated sketch configuration. Produced by [`SketchSettings::resolve`]; no field is
/// optional except where "absent" is itself a resolved value (uncapped `play_fps`, unbounded
/// frame counts).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedSettings {
    /// Window/document title.
    pub title: String,
    /// Background color used behind transparent pixels.
    pub background: Rgba8,
    /// Logical surface size `[width, height]`.
    pub dimensions: [u32; 2],
    /// Physical pixels per logical pixel (`>= 1`).
    pub pixel_ratio: f64,
    /// Center the surface in its host.
    pub centered: bool,
    /// Pre-scale the 2D context by the pixel ratio.
    pub scale_context: bool,
    /// Request nearest-neighbour upscaling from the host.
    pub pixelated: bool,
    /// Run the animation loop (otherwise render once).
    pub animate: bool,
    /// Drawing backend.
    pub mode: SketchMode,
    /// Loop length.
    pub duration: SketchDuration,
    /// Interactive playback frame rate; `None` renders on every host frame.
    pub play_fps: Option<u32>,
    /// Frame rate used while recording.
    pub export_fps: u32,
    /// Frames per loop during playback; `None` when unbounded or uncapped.
    pub total_frames: Option<u64>,
    /// Frames per loop while recording; `None` when unbounded.
    pub export_total_frames: Option<u64>,
    /// Output file name (without extension).
    pub filename: String,
    /// Prefix for timestamped output names.
    pub prefix: String,
    /// Suffix for timestamped output names.
    pub suffix: String,
    /// Still export format.
    pub frame_format: FrameFormat,
    /// Recording format.
    pub frames_format: FramesFormat,
    /// Directory exports are written into.
    pub out_dir: PathBuf,
    /// Enable keyboard shortcuts.
    pub hotkeys: bool,
}

impl ResolvedSettings {
    /// Settings used for every field the user leaves out.
    pub fn defaults() -> Self {
        Self {
            title: "Sketch".to_owned(),
            background: Rgba8::new(0x33, 0x33, 0x33, 0xff),
            dimensions: DEFAULT_DIMENSIONS,
            pixel_ratio: 1.0,
            centered: true,
            scale_context: true,
            pixelated: false,
            animate: true,
            mode: SketchMode::Canvas2d,
            duration: SketchDuration::Infinite,
            play_fps: None,
            export_fps: DEFAULT_EXPORT_FPS,
            total_frames: None,
            export_total_frames: None,
            filename: String::new(),
            prefix: String::new(),
            suffix: String::new(),
            frame_format: FrameFormat::Png,
            frames_format: FramesFormat::Webm,
            out_dir: PathBuf::from("."),
            hotkeys: true,
        }
    }

    /// Physical surface size: logical dimensions times pixel ratio, rounded down.
    pub fn physical_size(&self) -> (u32, u32) {
        physical_size(self.dimensions, self.pixel_ratio)
    }
}

pub(crate) fn physical_size(dimensions: [u32; 2], pixel_ratio: f64) -> (u32, u32) {
    let w = (f64::from(dimensions[0]) * pixel_ratio).floor() as u32;
    let h = (f64::from(dimensions[1]) * pixel_ratio).floor() as u32;
    (w, h)
}

impl SketchSettings {
    /// Parse settings from a JSON reader.
    pub fn from_reader(reader: impl Read) -> SketchResult<Self> {
        serde_json::from_reader(reader).map_err(|e| SketchError::serde(e.to_string()))
    }

    /// Parse settings from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> SketchResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path)
            .with_context(|| format!("open settings '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    /// Merge these settings over [`ResolvedSettings::defaults`], validate them and derive the
    /// frame counts. Fails fast; the loop never sees a partially-resolved configuration.
    #[tracing::instrument(skip(self))]
    pub fn resolve(&self) -> SketchResult<ResolvedSettings> {
        for key in self.unknown.keys() {
            tracing::warn!(key = %key, "ignoring unknown sketch setting");
        }

        let base = ResolvedSettings::defaults();

        let dimensions = self.dimensions.unwrap_or(base.dimensions);
        if dimensions[0] == 0 || dimensions[1] == 0 {
            return Err(SketchError::validation(format!(
                "dimensions must be non-zero, got {}x{}",
                dimensions[0], dimensions[1]
            )));
        }

        let pixel_ratio = match self.pixel_ratio {
            Some(r) if !r.is_finite() => {
                return Err(SketchError::validation(format!(
                    "pixelRatio must be finite, got {r}"
                )));
            }
            Some(r) => r.max(1.0),
            None => base.pixel_ratio,
        };

        let duration = match self.duration {
            Some(ms) => SketchDuration::from_millis(ms)?,
            None => base.duration,
        };
        let play_fps = self.play_fps.map(normalize_fps).transpose()?;
        let export_fps = match self.export_fps {
            Some(fps) => normalize_fps(fps)?,
            None => base.export_fps,
        };

        let total_frames = play_fps.and_then(|fps| duration.total_frames(fps));
        let export_total_frames = duration.total_frames(export_fps);
        if export_total_frames == Some(0) {
            tracing::warn!(
                export_fps,
                "duration is shorter than one exported frame; recordings hold a single frame"
            );
        }

        let resolved = ResolvedSettings {
            title: self.title.clone().unwrap_or(base.title),
            background: self.background.unwrap_or(base.background),
            dimensions,
            pixel_ratio,
            centered: self.centered.unwrap_or(base.centered),
            scale_context: self.scale_context.unwrap_or(base.scale_context),
            pixelated: self.pixelated.unwrap_or(base.pixelated),
            animate: self.animate.unwrap_or(base.animate),
            mode: self.mode.unwrap_or(base.mode),
            duration,
            play_fps,
            export_fps,
            total_frames,
            export_total_frames,
            filename: self.filename.clone().unwrap_or(base.filename),
            prefix: self.prefix.clone().unwrap_or(base.prefix),
            suffix: self.suffix.clone().unwrap_or(base.suffix),
            frame_format: self.frame_format.unwrap_or(base.frame_format),
            frames_format: self.frames_format.unwrap_or(base.frames_format),
            out_dir: self.out_dir.clone().unwrap_or(base.out_dir),
            hotkeys: self.hotkeys.unwrap_or(base.hotkeys),
        };

        tracing::debug!(
            title = %resolved.title,
            duration_ms = ?resolved.duration.as_millis(),
            play_fps = ?resolved.play_fps,
            export_fps = resolved.export_fps,
            "resolved sketch settings"
        );
        Ok(resolved)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/settings/resolve.rs"]
mod tests;
