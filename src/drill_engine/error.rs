//! Crate-wide error type.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    #[error("level {level} is out of range for topic {topic} (1..={max})")]
    InvalidLevel { topic: String, level: u32, max: u8 },

    #[error("variation key {key:?} is not handled by any generator")]
    UnknownVariation { key: String },

    #[error("multiplier {value} is out of range (1..={max})")]
    InvalidMultiplier { value: u32, max: u32 },

    /// A resample-under-constraint loop hit its iteration cap.
    #[error("could not satisfy constraints for {what} after {attempts} attempts")]
    GenerationExhausted { what: &'static str, attempts: u32 },

    #[error("invalid answer token: {0}")]
    InvalidToken(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
