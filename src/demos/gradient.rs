use anyhow::Context as _;

use crate::clock::state::AnimationProps;
use crate::render::surface::DrawingContext;
use crate::session::sketch_loop::{Sketch, SketchControl};

/// Horizontal gradient scrolling one width per loop.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Gradient;

impl Sketch for Gradient {
    fn render(
        &mut self,
        props: &AnimationProps,
        ctx: &mut DrawingContext,
        _control: &mut SketchControl,
    ) -> anyhow::Result<()> {
        let px = ctx
            .as_pixels()
            .context("gradient demo needs the pixels drawing mode")?;
        let (w, h) = (px.width() as usize, px.height() as usize);
        if w == 0 || h == 0 {
            return Ok(());
        }
        let shift = (props.playhead * w as f64) as usize;
        let data = px.data_mut();
        for y in 0..h {
            let g = (y * 255 / h.max(1)) as u8;
            for x in 0..w {
                let r = (((x + shift) % w) * 255 / w) as u8;
                let i = (y * w + x) * 4;
                data[i..i + 4].copy_from_slice(&[r, g, 160, 255]);
            }
        }
        Ok(())
    }
}
