use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Input must be a positive integer, got {0}")]
    NotPositive(u64),

    #[error("Input {value} is too large (maximum {max})")]
    TooLarge { value: u64, max: u64 },

    #[error("Input must be a finite number")]
    NotFinite,

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Temperature {0} is below absolute zero")]
    BelowAbsoluteZero(String),

    #[error("Area cannot be negative: {0}")]
    NegativeArea(f64),

    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// Reject NaN and infinities before any formula runs
pub(crate) fn ensure_finite(value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NotFinite)
    }
}
