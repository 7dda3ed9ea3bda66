/// Core error types for Condo Control
use thiserror::Error;

/// Result type alias using `ValidationError`
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Rejections raised by draft builders before any state mutation or
/// network call happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No house was selected for the record
    #[error("No house selected")]
    MissingHouse,

    /// House reference does not exist in the current snapshot
    #[error("Unknown house: {0}")]
    UnknownHouse(String),

    /// Bank reference is not exactly 6 numeric digits
    #[error("Bank reference must be exactly 6 digits")]
    InvalidBankReference,

    /// Amount in Bs. is missing or not a positive number
    #[error("Amount in Bs. is required and must be positive")]
    InvalidAmount,

    /// Exchange rate is missing or not a positive number
    #[error("Exchange rate is required and must be positive")]
    InvalidExchangeRate,

    /// Extraordinary payments require a free-text reason
    #[error("Extraordinary payments require a reason")]
    MissingExtraordinaryReason,

    /// Expense concept is blank
    #[error("Expense concept cannot be empty")]
    EmptyConcept,

    /// Suggestion message is blank
    #[error("Suggestion message cannot be empty")]
    EmptyMessage,
}
