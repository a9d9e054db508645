use super::*;
use crate::foundation::color::Rgba8;

fn cfg(width: u32, height: u32, fps: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps,
        total_frames: None,
        background: Rgba8::new(0, 0, 0, 255),
    }
}

fn arg_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

#[test]
fn keyframe_interval_is_ten_seconds_of_output() {
    let args = encode_args(&cfg(64, 64, 24), VideoCodec::Vp9);
    assert_eq!(arg_after(&args, "-g"), Some("240"));
    assert_eq!(arg_after(&args, "-c:v"), Some("libvpx-vp9"));
    assert_eq!(arg_after(&args, "-r"), Some("24"));
    assert_eq!(arg_after(&args, "-s"), Some("64x64"));
}

#[test]
fn mp4_uses_h264_yuv420p() {
    let args = encode_args(&cfg(64, 32, 60), VideoCodec::H264);
    assert_eq!(arg_after(&args, "-c:v"), Some("libx264"));
    assert_eq!(arg_after(&args, "-pix_fmt"), Some("rgba"));
    assert!(args.windows(2).any(|w| w[0] == "-pix_fmt" && w[1] == "yuv420p"));
    assert_eq!(arg_after(&args, "-g"), Some("600"));
}

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(
        dir.path().join("x.mp4"),
        VideoCodec::H264,
    ));
    let err = sink.begin(cfg(33, 32, 30)).unwrap_err();
    assert!(matches!(err, SketchError::Validation(_)));
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.webm", VideoCodec::Vp9));
    let props = crate::clock::state::AnimationProps::initial(&crate::ClockConfig {
        duration: crate::SketchDuration::Infinite,
        play_fps: None,
        export_fps: 30,
        total_frames: None,
        export_total_frames: None,
    });
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(&props, &frame).is_err());
}
