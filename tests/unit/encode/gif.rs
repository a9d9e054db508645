use super::*;
use crate::clock::state::ClockConfig;
use crate::foundation::color::Rgba8;
use crate::foundation::core::SketchDuration;
use image::AnimationDecoder as _;

fn cfg(fps: u32) -> SinkConfig {
    SinkConfig {
        width: 4,
        height: 2,
        fps,
        total_frames: Some(3),
        background: Rgba8::new(0, 0, 0, 255),
    }
}

fn props(frame: u64) -> AnimationProps {
    let mut p = AnimationProps::initial(&ClockConfig {
        duration: SketchDuration::Finite(300.0),
        play_fps: None,
        export_fps: 10,
        total_frames: None,
        export_total_frames: Some(3),
    });
    p.frame = frame;
    p
}

fn solid(v: u8) -> FrameRGBA {
    FrameRGBA {
        width: 4,
        height: 2,
        data: [v, v, v, 255].repeat(8),
        premultiplied: true,
    }
}

#[test]
fn writes_every_frame_with_fps_delay() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("loop.gif");
    let mut sink = GifSink::new(&path);
    sink.begin(cfg(10)).unwrap();
    for i in 0..3u64 {
        sink.push_frame(&props(i), &solid(i as u8 * 100)).unwrap();
    }
    sink.end().unwrap();

    let file = std::io::BufReader::new(File::open(&path).unwrap());
    let frames = image::codecs::gif::GifDecoder::new(file)
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap();
    assert_eq!(frames.len(), 3);
    let (num, den) = frames[1].delay().numer_denom_ms();
    assert_eq!(num / den, 100);
    assert_eq!(frames[2].buffer().dimensions(), (4, 2));
}

#[test]
fn push_before_begin_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = GifSink::new(dir.path().join("x.gif"));
    assert!(sink.push_frame(&props(0), &solid(0)).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn mismatched_frame_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = GifSink::new(dir.path().join("x.gif"));
    sink.begin(cfg(60)).unwrap();
    let mut f = solid(0);
    f.width = 2;
    assert!(matches!(
        sink.push_frame(&props(0), &f),
        Err(SketchError::Validation(_))
    ));
}
