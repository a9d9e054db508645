use super::*;

fn half_red() -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![128, 0, 0, 128, 0, 0, 0, 0],
        premultiplied: true,
    }
}

#[test]
fn png_roundtrips_straight_alpha() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/still.png");
    save_still(&half_red(), &path, FrameFormat::Png, Rgba8::new(0, 0, 0, 255)).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(img.get_pixel(1, 0).0[3], 0);
}

#[test]
fn jpeg_is_flattened_over_background() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("still.jpg");
    let frame = FrameRGBA {
        width: 8,
        height: 8,
        data: vec![0; 8 * 8 * 4],
        premultiplied: true,
    };
    save_still(&frame, &path, FrameFormat::Jpeg, Rgba8::new(0, 200, 0, 255)).unwrap();

    let img = image::open(&path).unwrap().to_rgb8();
    let [r, g, b] = img.get_pixel(4, 4).0;
    assert!(r < 16 && g > 180 && b < 16, "got {r},{g},{b}");
}

#[test]
fn flatten_blends_partial_alpha() {
    let rgb = flatten_to_rgb(&half_red(), Rgba8::new(0, 0, 255, 255)).unwrap();
    assert_eq!(rgb, vec![128, 0, 127, 0, 0, 255]);
}

#[test]
fn wrong_buffer_size_is_an_export_error() {
    let mut frame = half_red();
    frame.data.pop();
    let dir = tempfile::tempdir().unwrap();
    let err = save_still(
        &frame,
        &dir.path().join("x.png"),
        FrameFormat::Png,
        Rgba8::new(0, 0, 0, 255),
    )
    .unwrap_err();
    assert!(matches!(err, SketchError::Export(_)));
}
