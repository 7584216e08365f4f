//! Category error types.

use pocketbook_shared::{AppError, types::CategoryId};
use thiserror::Error;

/// Category-related errors.
#[derive(Debug, Error)]
pub enum CategoryError {
    /// Not found, a default, or owned by someone else.
    #[error("Category not found or not editable: {0}")]
    NotFound(CategoryId),

    /// A default or owned category already has this name and kind.
    #[error("Category '{name}' already exists for {kind}")]
    Duplicate {
        /// Category name.
        name: String,
        /// Income or expense.
        kind: String,
    },

    /// Name is blank.
    #[error("Category name is required")]
    EmptyName,

    /// Name longer than the stored column allows.
    #[error("Category name must be at most {} characters", crate::limits::MAX_NAME_CHARS)]
    NameTooLong,

    /// Icon longer than the stored column allows.
    #[error("Icon must be at most {} characters", crate::limits::MAX_ICON_CHARS)]
    IconTooLong,

    /// Kind is not `income` / `expense`.
    #[error("Invalid category type '{0}': must be income or expense")]
    InvalidKind(String),

    /// Color is not `#rrggbb`.
    #[error("Invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),

    /// Underlying store query failed.
    #[error("Store error: {0}")]
    Store(String),
}

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(_) => Self::NotFound(err.to_string()),
            CategoryError::Store(msg) => Self::Store(msg),
            CategoryError::Duplicate { .. }
            | CategoryError::EmptyName
            | CategoryError::NameTooLong
            | CategoryError::IconTooLong
            | CategoryError::InvalidKind(_)
            | CategoryError::InvalidColor(_) => Self::Validation(err.to_string()),
        }
    }
}
