use super::*;

fn settings(mode: SketchMode, dims: [u32; 2], ratio: f64) -> ResolvedSettings {
    ResolvedSettings {
        mode,
        dimensions: dims,
        pixel_ratio: ratio,
        ..ResolvedSettings::defaults()
    }
}

#[test]
fn provision_uses_physical_size() {
    let s = Surface::provision(&settings(SketchMode::Canvas2d, [100, 50], 2.0)).unwrap();
    assert_eq!(
        s.info(),
        SurfaceInfo {
            width: 200,
            height: 100,
            pixel_ratio: 2.0
        }
    );
    assert_eq!(s.snapshot().data.len(), 200 * 100 * 4);
}

#[test]
fn scale_context_controls_base_transform() {
    let mut s = Surface::provision(&settings(SketchMode::Canvas2d, [10, 10], 3.0)).unwrap();
    let base = s.context().as_canvas2d().unwrap().base_transform();
    assert_eq!(base, Affine::scale(3.0));

    let mut unscaled = settings(SketchMode::Canvas2d, [10, 10], 3.0);
    unscaled.scale_context = false;
    let mut s = Surface::provision(&unscaled).unwrap();
    assert_eq!(
        s.context().as_canvas2d().unwrap().base_transform(),
        Affine::IDENTITY
    );
}

#[test]
fn pixels_mode_hands_out_buffer() {
    let mut s = Surface::provision(&settings(SketchMode::Pixels, [4, 4], 1.0)).unwrap();
    assert!(s.context().as_canvas2d().is_none());
    s.context()
        .as_pixels()
        .unwrap()
        .fill(Rgba8::new(9, 9, 9, 255));
    s.present();
    assert_eq!(s.snapshot().pixel(3, 3), Some([9, 9, 9, 255]));
}

#[test]
fn oversized_surface_is_rejected() {
    let err = Surface::provision(&settings(SketchMode::Canvas2d, [40_000, 10], 2.0)).unwrap_err();
    assert!(matches!(err, SketchError::Surface(_)));
}

#[test]
fn resize_keeps_ratio_and_mode() {
    let mut s = Surface::provision(&settings(SketchMode::Pixels, [4, 4], 2.0)).unwrap();
    let info = s.resize(8, 2).unwrap();
    assert_eq!((info.width, info.height), (16, 4));
    assert!(s.context().as_pixels().is_some());
    assert!(s.resize(0, 2).is_err());
    assert_eq!(s.info().width, 16);
}
