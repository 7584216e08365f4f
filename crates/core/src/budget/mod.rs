//! Budgets and budget-vs-spending reconciliation.

pub mod comparison;
pub mod criteria;
pub mod engine;
pub mod error;
pub mod period;
pub mod types;

#[cfg(test)]
mod tests;

pub use comparison::ComparisonRecord;
pub use criteria::BudgetCriteria;
pub use engine::{BudgetStore, ReconciliationEngine, SpendingByCategory, SpendingStore, reconcile};
pub use error::BudgetError;
pub use period::{DateWindow, ReportingPeriod};
pub use types::{Budget, BudgetPeriod, UpsertBudgetInput};
