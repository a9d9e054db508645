use super::*;

#[test]
fn to_straight_unpremultiplies_partial_alpha() {
    let f = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![64, 32, 0, 128, 10, 20, 30, 255],
        premultiplied: true,
    };
    assert_eq!(f.to_straight(), vec![128, 64, 0, 128, 10, 20, 30, 255]);
}

#[test]
fn to_straight_keeps_transparent_black() {
    let f = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![0, 0, 0, 0],
        premultiplied: true,
    };
    assert_eq!(f.to_straight(), vec![0, 0, 0, 0]);
}

#[test]
fn pixel_bounds_checked() {
    let f = FrameRGBA {
        width: 2,
        height: 2,
        data: (0u8..16).collect(),
        premultiplied: false,
    };
    assert_eq!(f.pixel(1, 1), Some([12, 13, 14, 15]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 2), None);
}
