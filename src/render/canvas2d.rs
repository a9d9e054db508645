use vello_cpu::kurbo::{Affine, Rect};

use crate::foundation::color::Rgba8;
use crate::render::frame::FrameRGBA;

/// Vector 2D drawing context backed by `vello_cpu`.
///
/// Every frame starts from a fresh [`vello_cpu::RenderContext`] whose transform is the base
/// transform (a `pixel_ratio` scale when the surface pre-scales the context). Sketches that set
/// their own transform should compose it with [`Canvas2d::base_transform`].
pub struct Canvas2d {
    width: u16,
    height: u16,
    base: Affine,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Canvas2d {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas2d")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl Canvas2d {
    pub(crate) fn new(width: u16, height: u16, base: Affine) -> Self {
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(base);
        Self {
            width,
            height,
            base,
            ctx,
            pixmap: vello_cpu::Pixmap::new(width, height),
        }
    }

    /// Physical width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Physical height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Transform every frame starts with.
    pub fn base_transform(&self) -> Affine {
        self.base
    }

    /// The underlying render context for the current frame.
    pub fn context(&mut self) -> &mut vello_cpu::RenderContext {
        &mut self.ctx
    }

    /// Cover the whole surface with `color`, ignoring the current transform.
    pub fn fill_background(&mut self, color: Rgba8) {
        self.ctx.set_transform(Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx.fill_rect(&Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
        self.ctx.set_transform(self.base);
    }

    pub(crate) fn begin_frame(&mut self) {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        self.ctx.set_transform(self.base);
    }

    pub(crate) fn present(&mut self) {
        clear_pixmap(&mut self.pixmap);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }

    pub(crate) fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.width(),
            height: self.height(),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas2d.rs"]
mod tests;
