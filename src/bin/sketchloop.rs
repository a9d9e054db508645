use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use sketchloop::demos::Demo;
use sketchloop::{
    Advance, Clock, ClockConfig, FrameFormat, FrameScheduler as _, FramesFormat, SimulatedHost,
    SketchLoop, SketchSettings,
};

#[derive(Parser, Debug)]
#[command(name = "sketchloop", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a demo sketch up to a point in time and save that frame.
    Still(StillArgs),
    /// Record one loop of a demo sketch (GIF, image sequence, or WebM/MP4 via `ffmpeg`).
    Record(RecordArgs),
    /// Print the clock's props for a run of simulated refreshes as JSON lines.
    Trace(TraceArgs),
}

#[derive(Parser, Debug)]
struct SketchArgs {
    /// Built-in sketch to run.
    #[arg(long, value_enum, default_value_t = DemoChoice::Orbit)]
    demo: DemoChoice,

    /// Settings JSON merged over the demo's defaults.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Directory exports are written into.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Output name (without extension); defaults to a timestamp.
    #[arg(long)]
    filename: Option<String>,

    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 60.0)]
    refresh_hz: f64,
}

#[derive(Parser, Debug)]
struct StillArgs {
    #[command(flatten)]
    sketch: SketchArgs,

    /// Loop time to capture, in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    at_ms: f64,

    /// Image format.
    #[arg(long, value_enum)]
    format: Option<StillFormat>,
}

#[derive(Parser, Debug)]
struct RecordArgs {
    #[command(flatten)]
    sketch: SketchArgs,

    /// Recording format.
    #[arg(long, value_enum)]
    format: Option<RecordFormat>,

    /// Recording frame rate.
    #[arg(long)]
    fps: Option<f64>,

    /// Stop after this many host refreshes (needed for unbounded loops).
    #[arg(long, default_value_t = 3600)]
    max_ticks: u64,
}

#[derive(Parser, Debug)]
struct TraceArgs {
    /// Settings JSON (defaults apply when omitted).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Number of simulated refreshes.
    #[arg(long, default_value_t = 10)]
    ticks: u64,

    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 60.0)]
    refresh_hz: f64,

    /// Trace the recording clock instead of the playback clock.
    #[arg(long)]
    recording: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DemoChoice {
    Orbit,
    Gradient,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StillFormat {
    Png,
    Jpeg,
    Webp,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RecordFormat {
    Webm,
    Mp4,
    Gif,
    Png,
    Jpeg,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Still(args) => cmd_still(args),
        Command::Record(args) => cmd_record(args),
        Command::Trace(args) => cmd_trace(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn demo(choice: DemoChoice) -> Demo {
    let name = match choice {
        DemoChoice::Orbit => "orbit",
        DemoChoice::Gradient => "gradient",
    };
    // Every `DemoChoice` has a matching built-in.
    Demo::by_name(name).unwrap_or_else(|| Demo::Orbit(Default::default()))
}

fn read_settings(path: Option<&PathBuf>) -> anyhow::Result<Option<SketchSettings>> {
    path.map(|p| {
        SketchSettings::from_path(p)
            .with_context(|| format!("load settings '{}'", p.display()))
    })
    .transpose()
}

/// Demo defaults, overlaid with the settings file, overlaid with CLI flags.
fn sketch_settings(demo: &Demo, args: &SketchArgs) -> anyhow::Result<SketchSettings> {
    let mut settings = demo.default_settings();
    if let Some(user) = read_settings(args.settings.as_ref())? {
        let defaults = settings.clone();
        settings = SketchSettings {
            title: user.title.or(defaults.title),
            dimensions: user.dimensions.or(defaults.dimensions),
            duration: user.duration.or(defaults.duration),
            ..user
        };
    }
    settings.mode = Some(demo.mode());
    if let Some(dir) = &args.out_dir {
        settings.out_dir = Some(dir.clone());
    }
    if let Some(name) = &args.filename {
        settings.filename = Some(name.clone());
    }
    Ok(settings)
}

fn cmd_still(args: StillArgs) -> anyhow::Result<()> {
    let demo = demo(args.sketch.demo);
    let mut settings = sketch_settings(&demo, &args.sketch)?;
    if let Some(format) = args.format {
        settings.frame_format = Some(match format {
            StillFormat::Png => FrameFormat::Png,
            StillFormat::Jpeg => FrameFormat::Jpeg,
            StillFormat::Webp => FrameFormat::Webp,
        });
    }
    let resolved = settings.resolve()?;
    let mut sketch = SketchLoop::new(demo, resolved)?;

    sketch.tick(0.0)?;
    if args.at_ms > 0.0 {
        sketch.tick(args.at_ms)?;
    }
    sketch.toggle_play();
    sketch.request_still_export();
    sketch.tick(args.at_ms)?;

    if let Some(err) = sketch.last_export_error() {
        anyhow::bail!("still export failed: {err}");
    }
    let path = sketch
        .last_still_path()
        .context("still export produced no file")?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    let demo = demo(args.sketch.demo);
    let mut settings = sketch_settings(&demo, &args.sketch)?;
    if let Some(format) = args.format {
        settings.frames_format = Some(match format {
            RecordFormat::Webm => FramesFormat::Webm,
            RecordFormat::Mp4 => FramesFormat::Mp4,
            RecordFormat::Gif => FramesFormat::Gif,
            RecordFormat::Png => FramesFormat::Png,
            RecordFormat::Jpeg => FramesFormat::Jpeg,
        });
    }
    if let Some(fps) = args.fps {
        settings.export_fps = Some(fps);
    }
    let resolved = settings.resolve()?;
    let mut sketch = SketchLoop::new(demo, resolved)?;

    let mut host = SimulatedHost::new(args.sketch.refresh_hz).with_frame_limit(args.max_ticks);
    let path = sketch.run_until_recorded(&mut host)?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    let settings = read_settings(args.settings.as_ref())?.unwrap_or_default();
    let resolved = settings.resolve()?;
    let mut clock = Clock::new(ClockConfig::from_settings(&resolved));
    let (w, h) = resolved.physical_size();
    clock.set_surface(w, h, resolved.pixel_ratio);
    if args.recording {
        clock.begin_recording();
    }

    let mut host = SimulatedHost::new(args.refresh_hz).with_frame_limit(args.ticks);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    while let Some(ts) = host.next_frame() {
        let advance = if args.recording {
            clock.advance_recording(ts)
        } else {
            clock.advance(ts)
        };
        let line = match advance {
            Advance::Render { reset, finished } => serde_json::json!({
                "timestamp": ts,
                "reset": reset,
                "finished": finished,
                "props": clock.props(),
            }),
            Advance::Throttled => serde_json::json!({ "timestamp": ts, "throttled": true }),
            Advance::Paused => serde_json::json!({ "timestamp": ts, "paused": true }),
        };
        writeln!(out, "{line}")?;
    }
    Ok(())
}
