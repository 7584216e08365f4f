//! Transaction error types.

use pocketbook_shared::{AppError, types::TransactionId};
use thiserror::Error;

/// Transaction-related errors.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// Transaction not found, or owned by someone else.
    #[error("Transaction not found: {0}")]
    NotFound(TransactionId),

    /// Kind is not `income` / `expense`.
    #[error("Invalid transaction type '{0}': must be income or expense")]
    InvalidKind(String),

    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// Category name is blank.
    #[error("Category is required")]
    EmptyCategory,

    /// Category name longer than the stored column allows.
    #[error("Category must be at most {} characters", crate::limits::MAX_NAME_CHARS)]
    CategoryTooLong,

    /// Amount with too many decimal places or too large to store.
    #[error("Amount {0} is out of range: at most 4 decimal places and below 10^15")]
    AmountOutOfRange(rust_decimal::Decimal),

    /// Filter start date is after its end date.
    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange {
        /// Requested start date.
        start: chrono::NaiveDate,
        /// Requested end date.
        end: chrono::NaiveDate,
    },

    /// Year outside the supported range.
    #[error("Invalid year {0}")]
    InvalidYear(i32),

    /// Underlying store query failed.
    #[error("Store error: {0}")]
    Store(String),
}

impl From<TransactionError> for AppError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(_) => Self::NotFound(err.to_string()),
            TransactionError::Store(msg) => Self::Store(msg),
            TransactionError::InvalidKind(_)
            | TransactionError::NegativeAmount
            | TransactionError::EmptyCategory
            | TransactionError::CategoryTooLong
            | TransactionError::AmountOutOfRange(_)
            | TransactionError::InvalidDateRange { .. }
            | TransactionError::InvalidYear(_) => Self::Validation(err.to_string()),
        }
    }
}
