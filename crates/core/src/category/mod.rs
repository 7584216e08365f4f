//! Default and user-defined categories.

pub mod defaults;
pub mod error;
pub mod types;

pub use defaults::{DEFAULT_CATEGORIES, DefaultCategory};
pub use error::CategoryError;
pub use types::{Category, CategoryUpdate, DEFAULT_COLOR, NewCategory, sort_for_listing};
