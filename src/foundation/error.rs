/// Convenience result type used across the measurement scheduler.
pub type WavyteResult<T> = Result<T, WavyteError>;

/// Top-level error taxonomy used by scheduler, batcher and shared-layout APIs.
#[derive(thiserror::Error, Debug)]
pub enum WavyteError {
    /// Invalid user-provided element configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A lifecycle hook was invoked out of order (programmer error).
    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    /// Failure reported by a geometry snapshot or layout commit collaborator.
    #[error("layout error: {0}")]
    Layout(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WavyteError {
    /// Build a [`WavyteError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WavyteError::Lifecycle`] value.
    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle(msg.into())
    }

    /// Build a [`WavyteError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`WavyteError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for WavyteError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
