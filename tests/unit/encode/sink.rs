use super::*;
use crate::clock::state::ClockConfig;
use crate::foundation::core::SketchDuration;

fn props(frame: u64) -> AnimationProps {
    let mut p = AnimationProps::initial(&ClockConfig {
        duration: SketchDuration::Infinite,
        play_fps: None,
        export_fps: 30,
        total_frames: None,
        export_total_frames: None,
    });
    p.frame = frame;
    p
}

fn frame() -> FrameRGBA {
    FrameRGBA {
        width: 1,
        height: 1,
        data: vec![1, 2, 3, 255],
        premultiplied: true,
    }
}

#[test]
fn in_memory_sink_records_frames_and_lifecycle() {
    let mut sink = InMemorySink::new();
    let cfg = SinkConfig {
        width: 1,
        height: 1,
        fps: 30,
        total_frames: Some(2),
        background: Rgba8::new(0, 0, 0, 255),
    };
    sink.begin(cfg.clone()).unwrap();
    sink.push_frame(&props(0), &frame()).unwrap();
    sink.push_frame(&props(1), &frame()).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.config(), Some(&cfg));
    assert_eq!(
        sink.frames().iter().map(|(i, _)| *i).collect::<Vec<_>>(),
        vec![0, 1]
    );
    assert!(sink.ended());
}

#[test]
fn open_sink_picks_path_per_format() {
    let mut s = ResolvedSettings::defaults();
    s.out_dir = "out".into();
    s.filename = "loop".to_owned();
    let now = crate::encode::naming::local_now();

    for (format, expected) in [
        (FramesFormat::Webm, "out/loop.webm"),
        (FramesFormat::Mp4, "out/loop.mp4"),
        (FramesFormat::Gif, "out/loop.gif"),
        (FramesFormat::Png, "out/loop"),
        (FramesFormat::Jpeg, "out/loop"),
    ] {
        s.frames_format = format;
        assert_eq!(open_sink(&s, &now).path, Path::new(expected), "{format:?}");
    }
}

#[test]
fn ensure_parent_dir_creates_nested_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("a/b/c.gif");
    ensure_parent_dir(&p).unwrap();
    assert!(dir.path().join("a/b").is_dir());
}
