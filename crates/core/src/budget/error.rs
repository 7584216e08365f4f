//! Budget error types.

use pocketbook_shared::{AppError, types::BudgetId};
use thiserror::Error;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Budget not found, or owned by someone else.
    #[error("Budget not found: {0}")]
    NotFound(BudgetId),

    /// Period is not one of `monthly` / `yearly`.
    #[error("Invalid period '{0}': must be monthly or yearly")]
    InvalidPeriod(String),

    /// Month outside 1-12.
    #[error("Invalid month {0}: must be between 1 and 12")]
    InvalidMonth(u32),

    /// Year outside the supported range.
    #[error("Invalid year {0}")]
    InvalidYear(i32),

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

    /// Underlying store query failed.
    #[error("Store error: {0}")]
    Store(String),
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::NotFound(_) => Self::NotFound(err.to_string()),
            BudgetError::Store(msg) => Self::Store(msg),
            BudgetError::InvalidPeriod(_)
            | BudgetError::InvalidMonth(_)
            | BudgetError::InvalidYear(_)
            | BudgetError::NegativeAmount
            | BudgetError::EmptyCategory
            | BudgetError::CategoryTooLong
            | BudgetError::AmountOutOfRange(_) => Self::Validation(err.to_string()),
        }
    }
}
