//! Drawing surfaces and frame readback.

pub(crate) mod canvas2d;
pub(crate) mod frame;
pub(crate) mod pixels;
pub(crate) mod surface;
