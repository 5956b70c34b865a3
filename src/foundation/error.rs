/// Result alias used across the crate.
pub type MotionResult<T> = Result<T, MotionError>;

/// Errors raised while compiling or playing an animation.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// An argument or option was rejected.
    #[error("validation error: {0}")]
    Validation(String),

    /// The animation tree could not be compiled.
    #[error("animation error: {0}")]
    Animation(String),

    /// A playback request was inconsistent with the timeline.
    #[error("playback error: {0}")]
    Playback(String),

    /// A mark name that the timeline does not define.
    #[error("unknown mark: {0}")]
    UnknownMark(String),

    /// A document failed to (de)serialize.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, carried through.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build [`MotionError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build [`MotionError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build [`MotionError::Playback`].
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Build [`MotionError::UnknownMark`].
    pub fn unknown_mark(mark: impl std::fmt::Display) -> Self {
        Self::UnknownMark(mark.to_string())
    }

    /// Build [`MotionError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
