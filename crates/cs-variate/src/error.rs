use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VariateError {
    #[error("invalid {name} parameter: {reason}")]
    InvalidParameter {
        name:   &'static str,
        reason: String,
    },
}

pub type VariateResult<T> = Result<T, VariateError>;
