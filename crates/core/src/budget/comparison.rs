//! Per-budget spending status.

use pocketbook_shared::types::BudgetId;
use rust_decimal::Decimal;
use serde::Serialize;

use super::types::{Budget, BudgetPeriod};
use crate::percent::{for_display, ratio_percent};

/// One budget compared against what was actually spent in its window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRecord {
    /// Budget this record describes.
    pub budget_id: BudgetId,
    /// Category name.
    pub category: String,
    /// Budgeted amount.
    pub budget_amount: Decimal,
    /// Sum of expenses in the category inside the window.
    pub spent_amount: Decimal,
    /// `budget_amount - spent_amount`; negative when overspent.
    pub remaining_amount: Decimal,
    /// Spent share of the budget, one decimal place.
    pub percentage: Decimal,
    /// True only when spending strictly exceeds the budget.
    pub is_over_budget: bool,
    /// Budget period.
    pub period: BudgetPeriod,
    /// Budget year.
    pub year: i32,
    /// Budget month, monthly budgets only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

impl ComparisonRecord {
    /// Builds the record for `budget` given the amount spent against it.
    #[must_use]
    pub fn from_budget(budget: &Budget, spent: Decimal) -> Self {
        Self {
            budget_id: budget.id,
            category: budget.category.clone(),
            budget_amount: budget.amount,
            spent_amount: spent,
            remaining_amount: budget.amount - spent,
            percentage: for_display(ratio_percent(spent, budget.amount)),
            is_over_budget: spent > budget.amount,
            period: budget.period,
            year: budget.year,
            month: budget.month,
        }
    }
}
