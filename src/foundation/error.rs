/// Convenience result type used across glassmap.
pub type GlassmapResult<T> = Result<T, GlassmapError>;

/// Top-level error taxonomy used by generator, filter and preview APIs.
#[derive(thiserror::Error, Debug)]
pub enum GlassmapError {
    /// Invalid shape/effect parameters or a backing surface that could not be acquired.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The generator was used after its backing surface was released.
    #[error("use after dispose: displacement generator surface was already released")]
    UseAfterDispose,

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlassmapError {
    /// Build a [`GlassmapError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`GlassmapError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
