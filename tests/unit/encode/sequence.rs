use super::*;
use crate::clock::state::ClockConfig;
use crate::foundation::color::Rgba8;
use crate::foundation::core::SketchDuration;

#[test]
fn writes_zero_padded_numbered_frames() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = SequenceSink::new(dir.path().join("frames"), FrameFormat::Png);
    sink.begin(SinkConfig {
        width: 1,
        height: 1,
        fps: 30,
        total_frames: Some(2),
        background: Rgba8::new(0, 0, 0, 255),
    })
    .unwrap();

    let mut props = AnimationProps::initial(&ClockConfig {
        duration: SketchDuration::Finite(100.0),
        play_fps: None,
        export_fps: 30,
        total_frames: None,
        export_total_frames: Some(3),
    });
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![255, 255, 255, 255],
        premultiplied: true,
    };
    for i in 0..2 {
        props.frame = i;
        sink.push_frame(&props, &frame).unwrap();
    }
    sink.end().unwrap();

    assert!(dir.path().join("frames/00000.png").is_file());
    assert!(dir.path().join("frames/00001.png").is_file());
    assert!(!dir.path().join("frames/00002.png").exists());
}

#[test]
fn jpeg_sequence_uses_jpg_extension() {
    let sink = SequenceSink::new("out", FrameFormat::Jpeg);
    assert_eq!(sink.frame_path(12), PathBuf::from("out/00012.jpg"));
}
