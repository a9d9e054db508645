use std::path::PathBuf;

use serde::Serialize;

use crate::clock::machine::{Advance, Clock};
use crate::clock::state::{AnimationProps, ClockConfig};
use crate::encode::naming::{local_now, output_path};
use crate::encode::sink::{FrameSink, OpenedSink, SinkConfig, open_sink};
use crate::encode::still::save_still;
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::surface::{DrawingContext, Surface};
use crate::session::hotkeys::{HotkeyAction, KeyInput, hotkey_action};
use crate::session::scheduler::FrameScheduler;
use crate::settings::model::SketchSettings;
use crate::settings::resolve::ResolvedSettings;

/// User sketch driven by a [`SketchLoop`].
///
/// Errors returned from any hook propagate out of the loop call that invoked it; the loop stays
/// usable afterwards. Every hook also gets a [`SketchControl`] for requests to the loop.
pub trait Sketch {
    /// Called once after the surface is provisioned, before the first frame.
    fn setup(
        &mut self,
        _props: &AnimationProps,
        _ctx: &mut DrawingContext,
        _control: &mut SketchControl,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    /// Draw one frame.
    fn render(
        &mut self,
        props: &AnimationProps,
        ctx: &mut DrawingContext,
        control: &mut SketchControl,
    ) -> anyhow::Result<()>;

    /// Called after the surface changed size (and once at startup). A render follows.
    fn resize(
        &mut self,
        _props: &AnimationProps,
        _ctx: &mut DrawingContext,
        _control: &mut SketchControl,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Requests a sketch makes from inside its hooks.
///
/// Requests are collected while the hook runs and applied once it returns, even if it failed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SketchControl {
    export_frame: bool,
    toggle_play: bool,
}

impl SketchControl {
    /// Save the frame being drawn as a still once it is presented.
    pub fn export_frame(&mut self) {
        self.export_frame = true;
    }

    /// Pause or resume playback after this hook. Two calls cancel out.
    pub fn toggle_play(&mut self) {
        self.toggle_play = !self.toggle_play;
    }

    /// Live settings updates are not implemented; always fails.
    pub fn update(&mut self, _settings: SketchSettings) -> SketchResult<()> {
        unsupported_update()
    }

    /// `true` when [`SketchControl::export_frame`] was called.
    pub fn export_requested(&self) -> bool {
        self.export_frame
    }

    /// `true` when playback will be toggled after the hook.
    pub fn toggle_requested(&self) -> bool {
        self.toggle_play
    }
}

fn unsupported_update() -> SketchResult<()> {
    tracing::warn!("update() is not yet implemented");
    Err(SketchError::unsupported("updating settings of a running sketch"))
}

/// Pause and export flags, readable by the host's event wiring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeFlags {
    /// Playback is frozen.
    pub paused: bool,
    /// A still export is pending.
    pub saving_frame: bool,
    /// Recording was requested or is running.
    pub saving_frames: bool,
    /// The recording session is open and receiving frames.
    pub capture_ready: bool,
    /// The recording was asked to stop or reached its last frame. Stays raised after the
    /// session is finalized, until the next recording is requested.
    pub capture_done: bool,
}

/// What the host should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// A frame was rendered; request another tick.
    Rendered,
    /// Nothing was rendered (paused or throttled); request another tick.
    Skipped,
    /// The loop is not animating or was stopped; do not request another tick.
    Stopped,
}

/// Counters returned by [`SketchLoop::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Ticks delivered by the scheduler.
    pub ticks: u64,
    /// Ticks that rendered a frame.
    pub rendered: u64,
}

/// Chooses the recording sink when a recording starts.
pub type SinkFactory = Box<dyn FnMut(&ResolvedSettings) -> SketchResult<OpenedSink>>;

struct RecordingSession {
    path: PathBuf,
    sink: Box<dyn FrameSink>,
    frames: u64,
}

/// Render loop driver: owns the clock, the surface, the sketch and the exporters.
pub struct SketchLoop<S: Sketch> {
    sketch: S,
    settings: ResolvedSettings,
    clock: Clock,
    flags: ModeFlags,
    surface: Surface,
    recording: Option<RecordingSession>,
    sink_factory: SinkFactory,
    last_export_error: Option<SketchError>,
    last_still: Option<PathBuf>,
    last_recording: Option<PathBuf>,
    stopped: bool,
}

impl<S: Sketch> std::fmt::Debug for SketchLoop<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SketchLoop")
            .field("flags", &self.flags)
            .field("props", self.clock.props())
            .field("recording", &self.recording.as_ref().map(|r| &r.path))
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}

impl<S: Sketch> SketchLoop<S> {
    /// Provision the surface, run the sketch's `setup` and `resize`, and render the first frame
    /// at `time = 0`.
    #[tracing::instrument(skip_all, fields(title = %settings.title))]
    pub fn new(mut sketch: S, settings: ResolvedSettings) -> SketchResult<Self> {
        let mut surface = Surface::provision(&settings)?;
        let mut clock = Clock::new(ClockConfig::from_settings(&settings));
        let info = surface.info();
        clock.set_surface(info.width, info.height, info.pixel_ratio);

        let mut control = SketchControl::default();
        surface.begin_frame();
        sketch.setup(clock.props(), surface.context(), &mut control)?;
        sketch.resize(clock.props(), surface.context(), &mut control)?;
        sketch.render(clock.props(), surface.context(), &mut control)?;
        surface.present();

        tracing::info!(
            width = info.width,
            height = info.height,
            animate = settings.animate,
            "sketch started"
        );
        let mut lp = Self {
            sketch,
            settings,
            clock,
            flags: ModeFlags::default(),
            surface,
            recording: None,
            sink_factory: Box::new(|s: &ResolvedSettings| Ok(open_sink(s, &local_now()))),
            last_export_error: None,
            last_still: None,
            last_recording: None,
            stopped: false,
        };
        lp.apply_control(control);
        lp.export_pending_still();
        Ok(lp)
    }

    /// Replace how recording sinks are chosen (the default follows `frames_format`).
    pub fn with_sink_factory(
        mut self,
        factory: impl FnMut(&ResolvedSettings) -> SketchResult<OpenedSink> + 'static,
    ) -> Self {
        self.sink_factory = Box::new(factory);
        self
    }

    /// Resolved settings the loop runs with.
    pub fn settings(&self) -> &ResolvedSettings {
        &self.settings
    }

    /// Props of the most recent frame.
    pub fn props(&self) -> &AnimationProps {
        self.clock.props()
    }

    /// The clock.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Current mode flags.
    pub fn flags(&self) -> ModeFlags {
        self.flags
    }

    /// The drawing surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The user sketch.
    pub fn sketch(&self) -> &S {
        &self.sketch
    }

    /// `true` while a recording session is open.
    pub fn is_recording(&self) -> bool {
        self.recording.is_some()
    }

    /// Most recent exporter failure. Export errors never abort the loop; they land here.
    pub fn last_export_error(&self) -> Option<&SketchError> {
        self.last_export_error.as_ref()
    }

    /// Path of the most recently saved still.
    pub fn last_still_path(&self) -> Option<&PathBuf> {
        self.last_still.as_ref()
    }

    /// Path of the most recently finalized recording.
    pub fn last_recording_path(&self) -> Option<&PathBuf> {
        self.last_recording.as_ref()
    }

    /// Advance the loop for one host refresh at `raw_timestamp` (milliseconds).
    pub fn tick(&mut self, raw_timestamp: f64) -> SketchResult<TickOutcome> {
        if self.stopped {
            return Ok(TickOutcome::Stopped);
        }
        if !self.settings.animate {
            self.export_pending_still();
            return Ok(TickOutcome::Stopped);
        }

        if self.flags.saving_frames && self.recording.is_none() {
            self.start_recording();
        }
        if self.flags.capture_done && self.recording.is_some() {
            self.finish_recording();
        }

        let advance = if self.recording.is_some() {
            self.clock.advance_recording(raw_timestamp)
        } else {
            self.clock.advance(raw_timestamp)
        };
        self.flags.paused = self.clock.is_paused();

        let Advance::Render { finished, .. } = advance else {
            self.export_pending_still();
            return Ok(TickOutcome::Skipped);
        };

        if let Err(err) = self.render_frame() {
            // The frame never reached the sink; hand its number out again next tick.
            if self.recording.is_some() {
                self.clock.rewind_recording_frame();
            }
            return Err(err);
        }

        // A recording tick exports only the recorded frame; a pending still waits.
        if self.recording.is_none() {
            self.export_pending_still();
            return Ok(TickOutcome::Rendered);
        }
        self.record_frame();
        if finished && self.recording.is_some() {
            self.flags.capture_done = true;
            self.finish_recording();
        }
        Ok(TickOutcome::Rendered)
    }

    /// Pause or resume playback.
    pub fn toggle_play(&mut self) {
        let paused = self.clock.toggle_pause();
        self.flags.paused = paused;
        tracing::info!(paused, "playback toggled");
    }

    /// Export the current frame as a still on the next tick.
    pub fn request_still_export(&mut self) {
        self.flags.saving_frame = true;
    }

    /// Start recording on the next tick, or stop the running recording.
    pub fn request_recording_toggle(&mut self) {
        if !self.flags.saving_frames {
            self.flags.saving_frames = true;
            self.flags.capture_done = false;
        } else {
            self.flags.capture_done = true;
        }
    }

    /// Host surface changed size (logical dimensions). Resizes the surface, notifies the
    /// sketch and renders once at the current props.
    #[tracing::instrument(skip(self))]
    pub fn on_resize(&mut self, width: u32, height: u32) -> SketchResult<()> {
        if self.recording.is_some() {
            tracing::warn!("surface resized while recording; finalizing the recording");
            self.finish_recording();
        }
        let info = self.surface.resize(width, height)?;
        self.settings.dimensions = [width, height];
        self.clock.set_surface(info.width, info.height, info.pixel_ratio);

        let mut control = SketchControl::default();
        self.surface.begin_frame();
        let mut drawn = self
            .sketch
            .resize(self.clock.props(), self.surface.context(), &mut control);
        if drawn.is_ok() {
            drawn = self
                .sketch
                .render(self.clock.props(), self.surface.context(), &mut control);
        }
        self.surface.present();
        self.apply_control(control);
        drawn?;
        self.export_pending_still();
        Ok(())
    }

    /// Live settings updates are not implemented; always fails.
    pub fn update(&mut self, _settings: SketchSettings) -> SketchResult<()> {
        unsupported_update()
    }

    /// React to a key press. Returns the action taken, if any.
    pub fn handle_key(&mut self, input: &KeyInput) -> Option<HotkeyAction> {
        if !self.settings.hotkeys {
            return None;
        }
        let action = hotkey_action(input)?;
        match action {
            HotkeyAction::TogglePlay => self.toggle_play(),
            HotkeyAction::SaveFrame => self.request_still_export(),
            HotkeyAction::ToggleRecording => self.request_recording_toggle(),
        }
        Some(action)
    }

    /// Stop the loop. An open recording is finalized first.
    pub fn stop(&mut self) -> SketchResult<()> {
        self.stopped = true;
        if let Some(mut session) = self.recording.take() {
            let ended = session.sink.end();
            self.reset_recording_flags();
            ended?;
            tracing::info!(
                frames = session.frames,
                path = %session.path.display(),
                "recording complete"
            );
            self.last_recording = Some(session.path);
        }
        Ok(())
    }

    /// Drive the loop from `scheduler` until it runs dry or the loop stops.
    pub fn run(&mut self, scheduler: &mut dyn FrameScheduler) -> SketchResult<RunStats> {
        let mut stats = RunStats::default();
        while let Some(ts) = scheduler.next_frame() {
            stats.ticks += 1;
            match self.tick(ts)? {
                TickOutcome::Rendered => stats.rendered += 1,
                TickOutcome::Skipped => {}
                TickOutcome::Stopped => break,
            }
        }
        Ok(stats)
    }

    /// Record one recording from start to finish.
    ///
    /// Starts a recording if none was requested, then ticks until it completes. If the
    /// scheduler runs dry first (always the case for unbounded loops) the recording is
    /// finalized with the frames captured so far. Export failures are returned as errors.
    pub fn run_until_recorded(
        &mut self,
        scheduler: &mut dyn FrameScheduler,
    ) -> SketchResult<PathBuf> {
        if !self.flags.saving_frames {
            self.request_recording_toggle();
        }
        self.last_export_error = None;
        self.last_recording = None;

        while let Some(ts) = scheduler.next_frame() {
            let outcome = self.tick(ts)?;
            // saving_frames stays raised until the session completes or fails
            if !self.flags.saving_frames || outcome == TickOutcome::Stopped {
                break;
            }
        }
        if self.recording.is_some() {
            self.finish_recording();
        }
        if let Some(err) = self.last_export_error.take() {
            return Err(err);
        }
        self.last_recording
            .clone()
            .ok_or_else(|| SketchError::export("recording produced no output"))
    }

    fn render_frame(&mut self) -> SketchResult<()> {
        let mut control = SketchControl::default();
        self.surface.begin_frame();
        let rendered = self
            .sketch
            .render(self.clock.props(), self.surface.context(), &mut control);
        self.surface.present();
        self.apply_control(control);
        rendered?;
        Ok(())
    }

    fn apply_control(&mut self, control: SketchControl) {
        if control.export_frame {
            self.request_still_export();
        }
        if control.toggle_play {
            self.toggle_play();
        }
    }

    fn export_pending_still(&mut self) {
        if !self.flags.saving_frame || self.recording.is_some() {
            return;
        }
        self.flags.saving_frame = false;

        let format = self.settings.frame_format;
        let path = output_path(&self.settings, format.extension(), &local_now());
        let frame = self.surface.snapshot();
        match save_still(&frame, &path, format, self.settings.background) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "saved frame");
                self.last_still = Some(path);
            }
            Err(err) => self.record_export_error(err),
        }
    }

    fn start_recording(&mut self) {
        let format = self.settings.frames_format;
        let opened = match (self.sink_factory)(&self.settings) {
            Ok(opened) => opened,
            Err(err) => {
                self.abandon_recording(err);
                return;
            }
        };
        let OpenedSink { path, mut sink } = opened;

        let info = self.surface.info();
        let cfg = SinkConfig {
            width: info.width,
            height: info.height,
            fps: self.settings.export_fps,
            total_frames: self.settings.export_total_frames,
            background: self.settings.background,
        };
        if let Err(err) = sink.begin(cfg) {
            self.abandon_recording(err);
            return;
        }

        self.clock.begin_recording();
        self.flags.capture_ready = true;
        tracing::info!(format = ?format, path = %path.display(), "recording started");
        self.recording = Some(RecordingSession {
            path,
            sink,
            frames: 0,
        });
    }

    fn record_frame(&mut self) {
        let Some(session) = self.recording.as_mut() else {
            return;
        };
        let props = *self.clock.props();
        let frame = self.surface.snapshot();
        match props.total_frames {
            Some(total) => tracing::debug!("recording frame {} of {total}", props.frame + 1),
            None => tracing::debug!("recording frame {}", props.frame + 1),
        }
        match session.sink.push_frame(&props, &frame) {
            Ok(()) => session.frames += 1,
            Err(err) => {
                if let Some(session) = self.recording.take() {
                    self.close_recording(session, Some(err));
                }
            }
        }
    }

    fn finish_recording(&mut self) {
        if let Some(session) = self.recording.take() {
            self.close_recording(session, None);
        }
    }

    /// Finalize (or force-close after `failure`) a session and return to playback.
    fn close_recording(&mut self, mut session: RecordingSession, failure: Option<SketchError>) {
        let ended = session.sink.end();
        match (failure, ended) {
            (None, Ok(())) => {
                tracing::info!(
                    frames = session.frames,
                    path = %session.path.display(),
                    "recording complete"
                );
                self.last_recording = Some(session.path);
            }
            (None, Err(err)) => self.record_export_error(err),
            (Some(err), ended) => {
                if let Err(close_err) = ended {
                    tracing::debug!(error = %close_err, "force-closing recording sink failed");
                }
                self.record_export_error(err);
            }
        }
        self.reset_recording_flags();
    }

    fn abandon_recording(&mut self, err: SketchError) {
        self.record_export_error(err);
        self.reset_recording_flags();
    }

    fn reset_recording_flags(&mut self) {
        self.flags.saving_frames = false;
        self.flags.capture_ready = false;
        self.clock.end_recording();
    }

    fn record_export_error(&mut self, err: SketchError) {
        tracing::error!(error = %err, "export failed; continuing playback");
        self.last_export_error = Some(err);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/sketch_loop.rs"]
mod tests;
