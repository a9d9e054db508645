//! Time/frame clock and pause/record mode machine.
//!
//! The clock turns host timestamps into [`AnimationProps`](state::AnimationProps) under four
//! regimes (bounded/unbounded duration x fixed/uncapped frame rate) plus a synthetic
//! frame-driven regime used while recording.

pub(crate) mod machine;
pub(crate) mod state;
