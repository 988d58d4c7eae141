use thiserror::Error;

/// Errors surfaced by the trainer engine. Alignment and distance have no
/// failure modes and never produce one of these.
#[derive(Debug, Error)]
pub enum MorseError {
    #[error("unsupported character {0:?}")]
    UnsupportedCharacter(char),

    #[error("invalid speed profile: {0}")]
    InvalidProfile(String),

    #[error("failed to write samples to output device: {0}")]
    DeviceWriteFailure(String),

    #[error("output device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("lesson {0} is outside the Koch sequence")]
    InvalidLesson(u32),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl MorseError {
    pub(crate) fn invalid_profile(message: impl Into<String>) -> Self {
        Self::InvalidProfile(message.into())
    }

    pub(crate) fn write_failure(err: impl std::fmt::Display) -> Self {
        Self::DeviceWriteFailure(err.to_string())
    }

    pub(crate) fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::DeviceUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MorseError>;
