//! Budget-vs-spending reconciliation.

use std::collections::HashMap;
use std::future::Future;

use pocketbook_shared::types::UserId;
use rust_decimal::Decimal;

use super::comparison::ComparisonRecord;
use super::criteria::BudgetCriteria;
use super::error::BudgetError;
use super::period::{DateWindow, ReportingPeriod};
use super::types::Budget;

/// Expense totals keyed by category name.
pub type SpendingByCategory = HashMap<String, Decimal>;

/// Read access to stored budgets.
///
/// Implemented by the db crate.
pub trait BudgetStore: Send + Sync {
    /// Budgets matching `criteria`, sorted by category ascending.
    fn find_budgets(
        &self,
        criteria: &BudgetCriteria,
    ) -> impl Future<Output = Result<Vec<Budget>, BudgetError>> + Send;
}

/// Read access to expense aggregates.
///
/// Implemented by the db crate.
pub trait SpendingStore: Send + Sync {
    /// Sum of `owner`'s expense transactions inside `window`, per category.
    /// Categories without expenses are absent.
    fn expenses_by_category(
        &self,
        owner: UserId,
        window: &DateWindow,
    ) -> impl Future<Output = Result<SpendingByCategory, BudgetError>> + Send;
}

/// Produces one [`ComparisonRecord`] per budget of a period.
pub struct ReconciliationEngine<'a, B, S> {
    budgets: &'a B,
    spending: &'a S,
}

impl<'a, B: BudgetStore, S: SpendingStore> ReconciliationEngine<'a, B, S> {
    /// Creates an engine over the given stores.
    #[must_use]
    pub const fn new(budgets: &'a B, spending: &'a S) -> Self {
        Self { budgets, spending }
    }

    /// Compares `owner`'s budgets for `period` with the expenses recorded in
    /// the period's window.
    ///
    /// Both reads are issued concurrently. Any store failure fails the whole
    /// comparison.
    pub async fn compare(
        &self,
        owner: UserId,
        period: &ReportingPeriod,
    ) -> Result<Vec<ComparisonRecord>, BudgetError> {
        let criteria = BudgetCriteria::for_period(owner, period);
        criteria.validate()?;
        let window = period.window();

        let (budgets, spending) = futures::try_join!(
            self.budgets.find_budgets(&criteria),
            self.spending.expenses_by_category(owner, &window),
        )?;

        Ok(reconcile(&budgets, &spending))
    }
}

/// Pairs each budget with its category's spending, preserving budget order.
#[must_use]
pub fn reconcile(budgets: &[Budget], spending: &SpendingByCategory) -> Vec<ComparisonRecord> {
    budgets
        .iter()
        .map(|budget| {
            let spent = spending
                .get(&budget.category)
                .copied()
                .unwrap_or(Decimal::ZERO);
            ComparisonRecord::from_budget(budget, spent)
        })
        .collect()
}
