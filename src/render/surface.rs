use serde::Serialize;
use vello_cpu::kurbo::Affine;

use crate::foundation::color::Rgba8;
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::canvas2d::Canvas2d;
use crate::render::frame::FrameRGBA;
use crate::render::pixels::PixelBuffer;
use crate::settings::model::SketchMode;
use crate::settings::resolve::{ResolvedSettings, physical_size};

/// Physical size of a provisioned surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SurfaceInfo {
    /// Physical width in pixels.
    pub width: u32,
    /// Physical height in pixels.
    pub height: u32,
    /// Physical pixels per logical pixel.
    pub pixel_ratio: f64,
}

/// Drawing handle passed to the sketch next to the animation props.
#[derive(Debug)]
pub enum DrawingContext {
    /// Vector 2D context.
    Canvas2d(Canvas2d),
    /// Raw pixel buffer.
    Pixels(PixelBuffer),
}

impl DrawingContext {
    /// The 2D context, if this surface is in `2d` mode.
    pub fn as_canvas2d(&mut self) -> Option<&mut Canvas2d> {
        match self {
            Self::Canvas2d(c) => Some(c),
            Self::Pixels(_) => None,
        }
    }

    /// The pixel buffer, if this surface is in `pixels` mode.
    pub fn as_pixels(&mut self) -> Option<&mut PixelBuffer> {
        match self {
            Self::Pixels(p) => Some(p),
            Self::Canvas2d(_) => None,
        }
    }
}

/// Offscreen drawing surface sized from the sketch settings.
#[derive(Debug)]
pub struct Surface {
    info: SurfaceInfo,
    mode: SketchMode,
    scale_context: bool,
    background: Rgba8,
    context: DrawingContext,
}

impl Surface {
    /// Create the surface described by `settings`.
    #[tracing::instrument(skip(settings), fields(mode = ?settings.mode))]
    pub fn provision(settings: &ResolvedSettings) -> SketchResult<Self> {
        let info = surface_info(settings.dimensions, settings.pixel_ratio)?;
        let context = make_context(settings.mode, info, settings.scale_context)?;
        tracing::debug!(
            width = info.width,
            height = info.height,
            pixel_ratio = info.pixel_ratio,
            "provisioned surface"
        );
        Ok(Self {
            info,
            mode: settings.mode,
            scale_context: settings.scale_context,
            background: settings.background,
            context,
        })
    }

    /// Reallocate for new logical dimensions, keeping mode and pixel ratio. Contents are lost.
    pub fn resize(&mut self, width: u32, height: u32) -> SketchResult<SurfaceInfo> {
        let info = surface_info([width, height], self.info.pixel_ratio)?;
        self.context = make_context(self.mode, info, self.scale_context)?;
        self.info = info;
        Ok(info)
    }

    /// Physical size.
    pub fn info(&self) -> SurfaceInfo {
        self.info
    }

    /// Background color from the settings.
    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Drawing handle.
    pub fn context(&mut self) -> &mut DrawingContext {
        &mut self.context
    }

    /// Prepare the drawing handle for a new frame.
    pub fn begin_frame(&mut self) {
        if let DrawingContext::Canvas2d(c) = &mut self.context {
            c.begin_frame();
        }
    }

    /// Commit everything drawn since [`Surface::begin_frame`].
    pub fn present(&mut self) {
        if let DrawingContext::Canvas2d(c) = &mut self.context {
            c.present();
        }
    }

    /// Read back the last presented frame.
    pub fn snapshot(&self) -> FrameRGBA {
        match &self.context {
            DrawingContext::Canvas2d(c) => c.snapshot(),
            DrawingContext::Pixels(p) => p.snapshot(),
        }
    }
}

fn surface_info(dimensions: [u32; 2], pixel_ratio: f64) -> SketchResult<SurfaceInfo> {
    if dimensions[0] == 0 || dimensions[1] == 0 {
        return Err(SketchError::surface(format!(
            "surface dimensions must be non-zero, got {}x{}",
            dimensions[0], dimensions[1]
        )));
    }
    let (width, height) = physical_size(dimensions, pixel_ratio);
    if width == 0 || height == 0 || width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
        return Err(SketchError::surface(format!(
            "physical surface size {width}x{height} is outside 1..={}",
            u16::MAX
        )));
    }
    Ok(SurfaceInfo {
        width,
        height,
        pixel_ratio,
    })
}

fn make_context(
    mode: SketchMode,
    info: SurfaceInfo,
    scale_context: bool,
) -> SketchResult<DrawingContext> {
    Ok(match mode {
        SketchMode::Canvas2d => {
            let w: u16 = info
                .width
                .try_into()
                .map_err(|_| SketchError::surface("surface width exceeds u16"))?;
            let h: u16 = info
                .height
                .try_into()
                .map_err(|_| SketchError::surface("surface height exceeds u16"))?;
            let base = if scale_context {
                Affine::scale(info.pixel_ratio)
            } else {
                Affine::IDENTITY
            };
            DrawingContext::Canvas2d(Canvas2d::new(w, h, base))
        }
        SketchMode::Pixels => DrawingContext::Pixels(PixelBuffer::new(info.width, info.height)),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
