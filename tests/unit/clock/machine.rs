use super::*;

fn cfg(duration: SketchDuration, play_fps: Option<u32>, export_fps: u32) -> ClockConfig {
    ClockConfig {
        duration,
        play_fps,
        export_fps,
        total_frames: play_fps.and_then(|fps| duration.total_frames(fps)),
        export_total_frames: duration.total_frames(export_fps),
    }
}

#[test]
fn first_tick_sets_origin_with_zero_delta() {
    let mut clock = Clock::new(cfg(SketchDuration::Finite(1000.0), None, 60));
    let a = clock.advance(5_000.0);
    assert_eq!(
        a,
        Advance::Render {
            reset: true,
            finished: false
        }
    );
    let p = clock.props();
    assert_eq!(p.time, 0.0);
    assert_eq!(p.delta_time, 0.0);
    assert_eq!(p.playhead, 0.0);
    assert_eq!(p.frame, 0);
    assert_eq!(clock.state().start_time, 5_000.0);
}

#[test]
fn uncapped_frame_counts_rendered_ticks() {
    let mut clock = Clock::new(cfg(SketchDuration::Infinite, None, 60));
    for i in 0..5u64 {
        assert!(clock.advance(i as f64 * 7.0).should_render());
        assert_eq!(clock.props().frame, i);
    }
    assert_eq!(clock.props().playhead, 0.0);
    assert_eq!(clock.props().time, 28.0);
}

#[test]
fn fixed_rate_frame_follows_floor_formulas() {
    // unbounded: floor(time * fps / 1000)
    let frames: Vec<u64> = [0.0, 33.0, 66.0, 100.0]
        .iter()
        .map(|&t| fixed_rate_frame(SketchDuration::Infinite, 30, None, t, 0.0))
        .collect();
    assert_eq!(frames, vec![0, 0, 1, 3]);

    // bounded: floor(playhead * total_frames), never reaching total_frames
    let d = SketchDuration::Finite(2000.0);
    assert_eq!(fixed_rate_frame(d, 30, Some(60), 1000.0, 0.5), 30);
    assert_eq!(fixed_rate_frame(d, 30, Some(60), 1999.9, 0.99995), 59);
    assert_eq!(fixed_rate_frame(d, 30, Some(60), 0.0, 0.0), 0);
}

#[test]
fn throttle_skips_ticks_faster_than_interval() {
    let mut clock = Clock::new(cfg(SketchDuration::Infinite, Some(30), 60));
    assert!(clock.advance(0.0).should_render());
    assert_eq!(clock.advance(16.0), Advance::Throttled);
    assert!(clock.advance(34.0).should_render());
    assert_eq!(clock.props().delta_time, 34.0);
    assert_eq!(clock.props().frame, 1);
    // remainder carried: 34 % 33.33.. is subtracted from the new lastTimestamp
    let carried = 34.0 - (34.0 % (1000.0 / 30.0));
    assert!((clock.state().last_timestamp - carried).abs() < 1e-9);
}

#[test]
fn wrap_resets_exactly_once() {
    let mut clock = Clock::new(cfg(SketchDuration::Finite(100.0), None, 60));
    clock.advance(0.0);
    clock.advance(50.0);
    clock.advance(99.0);
    assert_eq!(clock.props().frame, 2);
    let a = clock.advance(100.0);
    assert_eq!(
        a,
        Advance::Render {
            reset: true,
            finished: false
        }
    );
    assert_eq!(clock.props().time, 0.0);
    assert_eq!(clock.props().frame, 0);
    assert_eq!(clock.props().playhead, 0.0);
    assert_eq!(clock.props().delta_time, 1.0);

    let a = clock.advance(110.0);
    assert_eq!(
        a,
        Advance::Render {
            reset: false,
            finished: false
        }
    );
    assert_eq!(clock.props().time, 10.0);
    assert_eq!(clock.props().frame, 1);
}

#[test]
fn wrap_is_rendered_even_inside_throttle_window() {
    let mut clock = Clock::new(cfg(SketchDuration::Finite(100.0), Some(20), 60));
    clock.advance(0.0);
    assert!(clock.advance(50.0).should_render());
    assert_eq!(clock.props().frame, 1);
    // 100ms since origin, only 50 since last frame (interval is 50): renders as the wrap
    assert!(clock.advance(100.0).should_render());
    assert_eq!(clock.props().frame, 0);
    assert_eq!(clock.props().time, 0.0);
}

#[test]
fn zero_duration_stays_at_origin() {
    let mut clock = Clock::new(cfg(SketchDuration::Finite(0.0), None, 60));
    for t in [0.0, 10.0, 20.0] {
        assert!(clock.advance(t).should_render());
        assert_eq!(clock.props().time, 0.0);
        assert_eq!(clock.props().playhead, 0.0);
        assert_eq!(clock.props().frame, 0);
    }
}

#[test]
fn backwards_timestamp_clamps_delta() {
    let mut clock = Clock::new(cfg(SketchDuration::Infinite, None, 60));
    clock.advance(100.0);
    clock.advance(120.0);
    assert!(clock.advance(110.0).should_render());
    assert_eq!(clock.props().delta_time, 0.0);
}

#[test]
fn pause_freezes_and_resume_is_continuous() {
    let mut clock = Clock::new(cfg(SketchDuration::Infinite, None, 60));
    clock.advance(1000.0);
    clock.advance(1500.0);
    let before = *clock.props();
    assert_eq!(before.time, 500.0);

    assert!(clock.toggle_pause());
    for t in [1600.0, 2500.0, 4500.0] {
        assert_eq!(clock.advance(t), Advance::Paused);
        assert_eq!(*clock.props(), before);
    }
    assert_eq!(clock.state().paused_duration, 3000.0);

    assert!(!clock.toggle_pause());
    clock.advance(4516.0);
    assert_eq!(clock.props().time, 516.0);
    assert_eq!(clock.props().delta_time, 16.0);
}

#[test]
fn recording_uses_synthetic_time_and_finishes_once() {
    let mut clock = Clock::new(cfg(SketchDuration::Finite(1000.0), None, 10));
    clock.advance(0.0);
    clock.begin_recording();

    let mut finished_at = Vec::new();
    for i in 0..10u64 {
        // wildly uneven wall time
        let a = clock.advance_recording(1.0 + (i * i) as f64 * 37.0);
        let Advance::Render { reset, finished } = a else {
            panic!("recording tick must render");
        };
        assert_eq!(reset, i == 0);
        if finished {
            finished_at.push(i);
        }
        assert_eq!(clock.props().frame, i);
        assert_eq!(clock.props().time, i as f64 * 100.0);
        assert_eq!(clock.props().delta_time, 100.0);
        assert_eq!(clock.props().total_frames, Some(10));
    }
    assert_eq!(finished_at, vec![9]);

    clock.end_recording();
    assert!(clock.state().time_resetted);
    assert_eq!(clock.props().total_frames, None);
    clock.advance(5000.0);
    assert_eq!(clock.props().time, 0.0);
    assert_eq!(clock.props().frame, 0);
}

#[test]
fn unbounded_recording_never_finishes_by_itself() {
    let mut clock = Clock::new(cfg(SketchDuration::Infinite, Some(30), 25));
    clock.begin_recording();
    for i in 0..100u64 {
        assert_eq!(
            clock.advance_recording(i as f64),
            Advance::Render {
                reset: i == 0,
                finished: false
            }
        );
    }
    assert_eq!(clock.props().frame, 99);
    assert_eq!(clock.props().time, 3960.0);
}

#[test]
fn paused_recording_does_not_advance() {
    let mut clock = Clock::new(cfg(SketchDuration::Finite(1000.0), None, 10));
    clock.begin_recording();
    clock.advance_recording(0.0);
    clock.pause();
    assert_eq!(clock.advance_recording(10.0), Advance::Paused);
    assert_eq!(clock.props().frame, 0);
    clock.resume();
    clock.advance_recording(20.0);
    assert_eq!(clock.props().frame, 1);
}

#[test]
fn rewound_recording_frame_is_emitted_again() {
    let mut clock = Clock::new(cfg(SketchDuration::Finite(1000.0), None, 10));
    clock.begin_recording();
    for i in 0..9u64 {
        clock.advance_recording(i as f64 * 16.0);
    }
    assert_eq!(clock.props().frame, 8);

    clock.advance_recording(200.0);
    assert_eq!(clock.props().frame, 9);
    clock.rewind_recording_frame();

    let a = clock.advance_recording(216.0);
    assert_eq!(
        a,
        Advance::Render {
            reset: false,
            finished: true
        }
    );
    assert_eq!(clock.props().frame, 9);
    assert_eq!(clock.props().time, 900.0);
}

#[test]
fn bounded_recording_never_passes_the_last_frame() {
    let mut clock = Clock::new(cfg(SketchDuration::Finite(1000.0), None, 10));
    clock.begin_recording();
    for i in 0..15u64 {
        clock.advance_recording(i as f64);
        assert!(clock.props().frame <= 9);
        assert!(clock.props().playhead < 1.0);
    }
    assert_eq!(clock.props().frame, 9);
    assert_eq!(clock.props().time, 900.0);
}
