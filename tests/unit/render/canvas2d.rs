use super::*;

#[test]
fn background_fill_covers_every_pixel() {
    let mut c = Canvas2d::new(4, 3, Affine::IDENTITY);
    c.begin_frame();
    c.fill_background(Rgba8::new(255, 0, 0, 255));
    c.present();
    let f = c.snapshot();
    assert_eq!((f.width, f.height), (4, 3));
    assert!(f.premultiplied);
    assert!(f.data.chunks_exact(4).all(|p| p == [255, 0, 0, 255]));
}

#[test]
fn base_transform_scales_drawing() {
    let mut c = Canvas2d::new(8, 8, Affine::scale(2.0));
    c.begin_frame();
    let ctx = c.context();
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 255, 255));
    ctx.fill_rect(&Rect::new(0.0, 0.0, 2.0, 2.0));
    c.present();
    let f = c.snapshot();
    // logical 2x2 becomes physical 4x4
    assert_eq!(f.pixel(3, 3), Some([0, 0, 255, 255]));
    assert_eq!(f.pixel(5, 5), Some([0, 0, 0, 0]));
}

#[test]
fn each_frame_starts_empty() {
    let mut c = Canvas2d::new(2, 2, Affine::IDENTITY);
    c.begin_frame();
    c.fill_background(Rgba8::new(1, 2, 3, 255));
    c.present();
    c.begin_frame();
    c.present();
    assert!(c.snapshot().data.iter().all(|&b| b == 0));
}
