use std::f64::consts::TAU;

use anyhow::Context as _;
use vello_cpu::kurbo::{Affine, Circle, Shape as _};
use vello_cpu::peniko::Color;

use crate::clock::state::AnimationProps;
use crate::foundation::color::Rgba8;
use crate::render::surface::DrawingContext;
use crate::session::sketch_loop::{Sketch, SketchControl};

/// Dots orbiting the center once per loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Orbit {
    /// Number of dots.
    pub dots: u32,
    /// Background color.
    pub background: Rgba8,
    /// Logical size captured on resize.
    size: (f64, f64),
}

impl Default for Orbit {
    fn default() -> Self {
        Self {
            dots: 6,
            background: Rgba8::new(0x1b, 0x1d, 0x26, 0xff),
            size: (0.0, 0.0),
        }
    }
}

impl Sketch for Orbit {
    fn resize(
        &mut self,
        props: &AnimationProps,
        _ctx: &mut DrawingContext,
        _control: &mut SketchControl,
    ) -> anyhow::Result<()> {
        self.size = (
            f64::from(props.width) / props.pixel_ratio,
            f64::from(props.height) / props.pixel_ratio,
        );
        Ok(())
    }

    fn render(
        &mut self,
        props: &AnimationProps,
        ctx: &mut DrawingContext,
        _control: &mut SketchControl,
    ) -> anyhow::Result<()> {
        let canvas = ctx
            .as_canvas2d()
            .context("orbit demo needs the 2d drawing mode")?;
        canvas.fill_background(self.background);

        let (w, h) = self.size;
        let radius = w.min(h) * 0.35;
        let dot = (w.min(h) * 0.04).max(1.0);
        // unbounded loops turn once every four seconds
        let turn = if props.duration.is_finite() {
            props.playhead
        } else {
            props.time / 4000.0
        };
        let base = canvas.base_transform() * Affine::translate((w / 2.0, h / 2.0));

        let rc = canvas.context();
        rc.set_transform(base);
        for i in 0..self.dots {
            let phase = f64::from(i) / f64::from(self.dots.max(1));
            let angle = (turn + phase) * TAU;
            let hue = (phase * 255.0) as u8;
            rc.set_paint(Color::from_rgba8(255, hue, 255 - hue, 255));
            let c = Circle::new((angle.cos() * radius, angle.sin() * radius), dot);
            rc.fill_path(&c.to_path(0.1));
        }
        Ok(())
    }
}
