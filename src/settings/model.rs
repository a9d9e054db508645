use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Rgba8;

/// Drawing backend a sketch renders into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SketchMode {
    /// Vector 2D context (`vello_cpu`).
    #[default]
    #[serde(rename = "2d")]
    Canvas2d,
    /// Raw premultiplied RGBA8 pixel buffer.
    #[serde(rename = "pixels")]
    Pixels,
}

/// Still-image export format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameFormat {
    /// PNG (keeps alpha).
    #[default]
    Png,
    /// JPEG (flattened over the background).
    #[serde(alias = "jpg")]
    Jpeg,
    /// Lossless WebP.
    Webp,
}

impl FrameFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
        }
    }
}

/// Recording (multi-frame) export format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FramesFormat {
    /// VP9 WebM through `ffmpeg`.
    #[default]
    Webm,
    /// H.264 MP4 through `ffmpeg`.
    Mp4,
    /// Animated GIF.
    Gif,
    /// Numbered PNG image sequence.
    Png,
    /// Numbered JPEG image sequence.
    #[serde(alias = "jpg")]
    Jpeg,
}

impl FramesFormat {
    /// File extension (or per-frame extension for image sequences).
    pub fn extension(self) -> &'static str {
        match self {
            Self::Webm => "webm",
            Self::Mp4 => "mp4",
            Self::Gif => "gif",
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// `true` when frames are written as individual image files.
    pub fn is_sequence(self) -> bool {
        matches!(self, Self::Png | Self::Jpeg)
    }
}

/// User-provided sketch settings. Every field is optional; missing values come from
/// [`ResolvedSettings::defaults`](crate::ResolvedSettings::defaults).
///
/// Durations are in milliseconds. An absent `duration` means the sketch loops forever and an
/// absent `play_fps` means "render on every host frame".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SketchSettings {
    /// Window/document title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Background color used behind transparent pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgba8>,
    /// Logical surface size `[width, height]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<[u32; 2]>,
    /// Physical pixels per logical pixel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_ratio: Option<f64>,
    /// Center the surface in its host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centered: Option<bool>,
    /// Pre-scale the 2D context by the pixel ratio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_context: Option<bool>,
    /// Request nearest-neighbour upscaling from the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixelated: Option<bool>,
    /// Run the animation loop (otherwise render once).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animate: Option<bool>,
    /// Drawing backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<SketchMode>,
    /// Loop length in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Interactive playback frame rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_fps: Option<f64>,
    /// Frame rate used while recording.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_fps: Option<f64>,
    /// Output file name (without extension). Empty means "timestamped".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Prefix for timestamped output names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Suffix for timestamped output names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Still export format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_format: Option<FrameFormat>,
    /// Recording format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames_format: Option<FramesFormat>,
    /// Directory exports are written into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    /// Enable keyboard shortcuts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotkeys: Option<bool>,

    /// Keys that do not match any setting. Kept so they can be reported, never applied.
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_json::Value>,
}
