use std::path::Path;

use anyhow::Context as _;

use crate::encode::sink::ensure_parent_dir;
use crate::foundation::color::{Rgba8, flatten_premul_over_bg};
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::frame::FrameRGBA;
use crate::settings::model::FrameFormat;

/// Write one frame as a still image.
///
/// PNG and WebP keep alpha. JPEG has none, so the frame is flattened over `background` first.
#[tracing::instrument(skip(frame, background), fields(path = %path.display()))]
pub fn save_still(
    frame: &FrameRGBA,
    path: &Path,
    format: FrameFormat,
    background: Rgba8,
) -> SketchResult<()> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(SketchError::export(format!(
            "frame data is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    ensure_parent_dir(path)?;

    match format {
        FrameFormat::Png | FrameFormat::Webp => {
            let image_format = if format == FrameFormat::Png {
                image::ImageFormat::Png
            } else {
                image::ImageFormat::WebP
            };
            image::save_buffer_with_format(
                path,
                &frame.to_straight(),
                frame.width,
                frame.height,
                image::ColorType::Rgba8,
                image_format,
            )
            .with_context(|| format!("write {} '{}'", format.extension(), path.display()))?;
        }
        FrameFormat::Jpeg => {
            let rgb = flatten_to_rgb(frame, background)?;
            image::save_buffer_with_format(
                path,
                &rgb,
                frame.width,
                frame.height,
                image::ColorType::Rgb8,
                image::ImageFormat::Jpeg,
            )
            .with_context(|| format!("write jpeg '{}'", path.display()))?;
        }
    }
    tracing::debug!("saved still");
    Ok(())
}

/// Opaque RGB8 copy of `frame` composited over `background`.
pub(crate) fn flatten_to_rgb(frame: &FrameRGBA, background: Rgba8) -> SketchResult<Vec<u8>> {
    let opaque = flatten_to_rgba(frame, background)?;
    Ok(opaque
        .chunks_exact(4)
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect())
}

/// Opaque RGBA8 copy of `frame` composited over `background`.
pub(crate) fn flatten_to_rgba(frame: &FrameRGBA, background: Rgba8) -> SketchResult<Vec<u8>> {
    let premul = if frame.premultiplied {
        std::borrow::Cow::Borrowed(&frame.data)
    } else {
        let mut p = frame.data.clone();
        for px in p.chunks_exact_mut(4) {
            let [r, g, b, _] = Rgba8::new(px[0], px[1], px[2], px[3]).to_premul();
            px[..3].copy_from_slice(&[r, g, b]);
        }
        std::borrow::Cow::Owned(p)
    };
    let mut out = vec![0u8; premul.len()];
    if !flatten_premul_over_bg(&mut out, &premul, background) {
        return Err(SketchError::export(
            "frame data length is not a whole number of RGBA8 pixels",
        ));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/still.rs"]
mod tests;
