/// Convenience result type used across sketchloop.
pub type SketchResult<T> = Result<T, SketchError>;

/// Top-level error taxonomy used by the loop, its surfaces and its exporters.
#[derive(thiserror::Error, Debug)]
pub enum SketchError {
    /// Invalid user-provided settings or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while provisioning or drawing into the sketch surface.
    #[error("surface error: {0}")]
    Surface(String),

    /// Errors raised by still-frame or recording exporters.
    #[error("export error: {0}")]
    Export(String),

    /// A declared capability that has no implementation yet.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SketchError {
    /// Build a [`SketchError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SketchError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`SketchError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`SketchError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Build a [`SketchError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
