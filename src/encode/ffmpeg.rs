use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::clock::state::AnimationProps;
use crate::encode::sink::{FrameSink, SinkConfig, ensure_parent_dir};
use crate::foundation::color::flatten_premul_over_bg;
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::frame::FrameRGBA;

/// Seconds of output between forced keyframes.
const KEYFRAME_INTERVAL_S: u32 = 10;

/// Video codec family written by [`FfmpegSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoCodec {
    /// H.264 in MP4.
    H264,
    /// VP9 in WebM.
    Vp9,
}

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output file path.
    pub out_path: PathBuf,
    /// Codec and container.
    pub codec: VideoCodec,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
}

impl FfmpegSinkOpts {
    /// Create options for writing `codec` video to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>, codec: VideoCodec) -> Self {
        Self {
            out_path: out_path.into(),
            codec,
            overwrite: true,
        }
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw RGBA frames to its stdin.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_frame: Option<u64>,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_frame: None,
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> SketchResult<()> {
        if cfg.fps == 0 {
            return Err(SketchError::validation("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(SketchError::validation(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(SketchError::validation(
                "ffmpeg sink width/height must be even (required for yuv420p output)",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(SketchError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(SketchError::export(
                "ffmpeg is required for video recording, but was not found on PATH",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" });
        cmd.args(encode_args(&cfg, self.opts.codec));
        cmd.arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            SketchError::export(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SketchError::export("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| SketchError::export("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(
            path = %self.opts.out_path.display(),
            codec = ?self.opts.codec,
            "spawned ffmpeg"
        );
        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_frame = None;
        Ok(())
    }

    fn push_frame(&mut self, props: &AnimationProps, frame: &FrameRGBA) -> SketchResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SketchError::export("ffmpeg sink not started"))?;
        if let Some(last) = self.last_frame
            && props.frame <= last
        {
            return Err(SketchError::export(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_frame = Some(props.frame);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(SketchError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(SketchError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        // ffmpeg does not understand premultiplied alpha; flatten before writing.
        if frame.premultiplied {
            if !flatten_premul_over_bg(&mut self.scratch, &frame.data, cfg.background) {
                return Err(SketchError::validation(
                    "frame.data is not a whole number of rgba8 pixels",
                ));
            }
        } else {
            self.scratch.copy_from_slice(&frame.data);
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(SketchError::export("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            SketchError::export(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> SketchResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| SketchError::export("ffmpeg sink not started"))?;

        let status = child.wait().map_err(|e| {
            SketchError::export(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| SketchError::export("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| SketchError::export(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(SketchError::export(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        self.cfg = None;
        Ok(())
    }
}

/// Arguments between `-y`/`-n` and the output path.
fn encode_args(cfg: &SinkConfig, codec: VideoCodec) -> Vec<String> {
    let mut args: Vec<String> = [
        "-loglevel",
        "error",
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgba",
        "-s",
    ]
    .iter()
    .map(|s| (*s).to_owned())
    .collect();
    args.push(format!("{}x{}", cfg.width, cfg.height));
    // For rawvideo input, `-r` before `-i` sets the input framerate.
    args.extend(["-r".to_owned(), cfg.fps.to_string()]);
    args.extend(["-i".to_owned(), "pipe:0".to_owned(), "-an".to_owned()]);

    let codec_args: &[&str] = match codec {
        VideoCodec::H264 => &[
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ],
        VideoCodec::Vp9 => &[
            "-c:v",
            "libvpx-vp9",
            "-pix_fmt",
            "yuv420p",
            "-b:v",
            "0",
            "-crf",
            "32",
        ],
    };
    args.extend(codec_args.iter().map(|s| (*s).to_owned()));
    args.extend([
        "-g".to_owned(),
        (cfg.fps.saturating_mul(KEYFRAME_INTERVAL_S)).to_string(),
    ]);
    args
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
