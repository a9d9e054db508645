//! Render loop driver, host scheduling and keyboard wiring.

pub(crate) mod hotkeys;
pub(crate) mod scheduler;
pub(crate) mod sketch_loop;
