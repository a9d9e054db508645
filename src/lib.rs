//! sketchloop drives animated canvas sketches.
//!
//! A sketch is a user type implementing [`Sketch`]. The [`SketchLoop`] owns it together with a
//! [`Clock`] that turns host refresh timestamps into [`AnimationProps`] (time, playhead, frame),
//! a drawing [`Surface`] and the exporters:
//!
//! - Resolve [`SketchSettings`] into [`ResolvedSettings`]
//! - Create a [`SketchLoop`] and feed it timestamps from a [`FrameScheduler`]
//! - Pause/resume, save stills and record loops to GIF, WebM/MP4 (`ffmpeg`) or image sequences
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod clock;
pub(crate) mod encode;
pub(crate) mod render;
pub(crate) mod session;
pub(crate) mod settings;

/// Built-in demo sketches.
pub mod demos;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{SketchDuration, frame_interval_ms, normalize_fps};
pub use crate::foundation::error::{SketchError, SketchResult};

pub use crate::clock::machine::{Advance, Clock, fixed_rate_frame};
pub use crate::clock::state::{AnimationProps, ClockConfig, ClockState};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, VideoCodec, is_ffmpeg_on_path};
pub use crate::encode::gif::GifSink;
pub use crate::encode::naming::{format_filename, local_now, output_path};
pub use crate::encode::sequence::SequenceSink;
pub use crate::encode::sink::{
    FrameSink, InMemorySink, OpenedSink, SinkConfig, ensure_parent_dir, open_sink,
};
pub use crate::encode::still::save_still;
pub use crate::render::canvas2d::Canvas2d;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::pixels::PixelBuffer;
pub use crate::render::surface::{DrawingContext, Surface, SurfaceInfo};
pub use crate::session::hotkeys::{HotkeyAction, Key, KeyInput, Modifiers, hotkey_action};
pub use crate::session::scheduler::{FrameScheduler, RealtimeHost, SimulatedHost, TimestampFeed};
pub use crate::session::sketch_loop::{
    ModeFlags, RunStats, SinkFactory, Sketch, SketchControl, SketchLoop, TickOutcome,
};
pub use crate::settings::model::{FrameFormat, FramesFormat, SketchMode, SketchSettings};
pub use crate::settings::resolve::ResolvedSettings;

/// Re-export of the 2D rendering crate so sketches can name its types.
pub use vello_cpu;
