//! Still and recording exporters.
//!
//! Recording sinks consume frames in recording order and are driven by
//! [`SketchLoop`](crate::SketchLoop) while it records.

pub(crate) mod ffmpeg;
pub(crate) mod gif;
pub(crate) mod naming;
pub(crate) mod sequence;
pub(crate) mod sink;
pub(crate) mod still;
