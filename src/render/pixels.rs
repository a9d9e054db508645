use crate::foundation::color::Rgba8;
use crate::render::frame::FrameRGBA;

/// Raw premultiplied RGBA8 pixel buffer, the `pixels` drawing mode.
///
/// The buffer persists between frames; sketches overwrite what they need.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable premultiplied RGBA8 bytes, row-major.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Fill every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8) {
        let px = color.to_premul();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Set one pixel. Out-of-bounds writes are ignored.
    pub fn put(&mut self, x: u32, y: u32, color: Rgba8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&color.to_premul());
    }

    pub(crate) fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.width,
            height: self.height,
            data: self.data.clone(),
            premultiplied: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pixels.rs"]
mod tests;
