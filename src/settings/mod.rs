//! Settings resolver: user-facing optional settings merged over defaults into a fully-populated
//! configuration.

pub(crate) mod model;
pub(crate) mod resolve;
