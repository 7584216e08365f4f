//! Income and expense records.

pub mod error;
pub mod stats;
pub mod types;

pub use error::TransactionError;
pub use stats::{
    CategoryStat, CategoryTotal, KindTotal, MonthKindTotal, MonthlyStat, StatsService, StatsStore,
    TransactionSummary,
};
pub use types::{Transaction, TransactionFilter, TransactionInput, TransactionKind};
