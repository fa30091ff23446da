/// Result alias used across the crate.
pub type TiceResult<T> = Result<T, TiceError>;

/// Error type for lesson construction, timeline recording, rendering and encoding.
#[derive(thiserror::Error, Debug)]
pub enum TiceError {
    /// Invalid settings or lesson content (bad counts, out-of-range numbers, wrong answers).
    #[error("validation error: {0}")]
    Validation(String),

    /// The orchestrator could not run a lesson.
    #[error("lesson error: {0}")]
    Lesson(String),

    /// An animation referenced an object the stage cannot animate.
    #[error("timeline error: {0}")]
    Timeline(String),

    /// Sampling a timeline failed.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// SVG generation or rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// Video encoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Config or timeline (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TiceError {
    /// Build a [`TiceError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TiceError::Lesson`].
    pub fn lesson(msg: impl Into<String>) -> Self {
        Self::Lesson(msg.into())
    }

    /// Build a [`TiceError::Timeline`].
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`TiceError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`TiceError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TiceError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`TiceError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for TiceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
