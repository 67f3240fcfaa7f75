use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("Sentence encoding failed: {0}")]
    EncodeError(String),

    #[error("Dependency parse failed: {0}")]
    ParseError(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidConfig { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
