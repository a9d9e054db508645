//! Built-in sketches used by the `sketchloop` binary and the tests.

mod gradient;
mod orbit;

pub use gradient::Gradient;
pub use orbit::Orbit;

use crate::clock::state::AnimationProps;
use crate::render::surface::DrawingContext;
use crate::session::sketch_loop::{Sketch, SketchControl};
use crate::settings::model::{SketchMode, SketchSettings};

/// One of the built-in sketches.
#[derive(Clone, Debug, PartialEq)]
pub enum Demo {
    /// Dots orbiting the center on the 2D context.
    Orbit(Orbit),
    /// Scrolling color gradient written into the pixel buffer.
    Gradient(Gradient),
}

impl Demo {
    /// Names accepted by [`Demo::by_name`].
    pub const NAMES: [&'static str; 2] = ["orbit", "gradient"];

    /// Look a demo up by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "orbit" => Some(Self::Orbit(Orbit::default())),
            "gradient" => Some(Self::Gradient(Gradient)),
            _ => None,
        }
    }

    /// Name of the demo.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Orbit(_) => "orbit",
            Self::Gradient(_) => "gradient",
        }
    }

    /// Drawing mode the demo needs.
    pub fn mode(&self) -> SketchMode {
        match self {
            Self::Orbit(_) => SketchMode::Canvas2d,
            Self::Gradient(_) => SketchMode::Pixels,
        }
    }

    /// Settings the demo looks right with: a small two-second loop.
    pub fn default_settings(&self) -> SketchSettings {
        SketchSettings {
            title: Some(self.name().to_owned()),
            dimensions: Some([320, 240]),
            duration: Some(2000.0),
            mode: Some(self.mode()),
            ..SketchSettings::default()
        }
    }
}

impl Sketch for Demo {
    fn render(
        &mut self,
        props: &AnimationProps,
        ctx: &mut DrawingContext,
        control: &mut SketchControl,
    ) -> anyhow::Result<()> {
        match self {
            Self::Orbit(s) => s.render(props, ctx, control),
            Self::Gradient(s) => s.render(props, ctx, control),
        }
    }

    fn resize(
        &mut self,
        props: &AnimationProps,
        ctx: &mut DrawingContext,
        control: &mut SketchControl,
    ) -> anyhow::Result<()> {
        match self {
            Self::Orbit(s) => s.resize(props, ctx, control),
            Self::Gradient(s) => s.resize(props, ctx, control),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/demos/mod.rs"]
mod tests;
