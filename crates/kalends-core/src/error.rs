use thiserror::Error;

/// Failures while loading or checking settings.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid setting: {0}")]
    ValidationError(String),

    #[error("missing or empty input: {0}")]
    InvalidInput(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
