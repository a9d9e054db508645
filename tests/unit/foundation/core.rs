use super::*;

#[test]
fn total_frames_floors_and_tracks_boundedness() {
    let d = SketchDuration::from_millis(2000.0).unwrap();
    assert_eq!(d.total_frames(60), Some(120));
    assert_eq!(d.total_frames(7), Some(14));

    let d = SketchDuration::from_millis(1050.0).unwrap();
    assert_eq!(d.total_frames(10), Some(10));

    assert_eq!(SketchDuration::Infinite.total_frames(60), None);
}

#[test]
fn infinity_maps_to_unbounded_and_bad_values_fail() {
    assert_eq!(
        SketchDuration::from_millis(f64::INFINITY).unwrap(),
        SketchDuration::Infinite
    );
    assert!(SketchDuration::from_millis(-1.0).is_err());
    assert!(SketchDuration::from_millis(f64::NAN).is_err());
}

#[test]
fn playhead_is_zero_for_unbounded_and_zero_length() {
    assert_eq!(SketchDuration::Infinite.playhead(1234.0), 0.0);
    assert_eq!(SketchDuration::Finite(0.0).playhead(10.0), 0.0);
    assert_eq!(SketchDuration::Finite(2000.0).playhead(500.0), 0.25);
}

#[test]
fn fps_is_floored_and_clamped() {
    assert_eq!(normalize_fps(29.97).unwrap(), 29);
    assert_eq!(normalize_fps(0.2).unwrap(), 1);
    assert_eq!(normalize_fps(-5.0).unwrap(), 1);
    assert!(normalize_fps(f64::NAN).is_err());
    assert_eq!(frame_interval_ms(50), 20.0);
}

#[test]
fn duration_serializes_as_nullable_millis() {
    assert_eq!(
        serde_json::to_value(SketchDuration::Finite(1500.0)).unwrap(),
        serde_json::json!(1500.0)
    );
    assert_eq!(
        serde_json::to_value(SketchDuration::Infinite).unwrap(),
        serde_json::Value::Null
    );
}
