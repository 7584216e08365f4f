//! Transaction statistics: overall summary, monthly series and category
//! breakdown.

use std::future::Future;

use pocketbook_shared::types::UserId;
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::TransactionError;
use super::types::TransactionKind;
use crate::budget::DateWindow;
use crate::percent::{for_display, ratio_percent};

/// Sum of one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindTotal {
    /// Income or expense.
    pub kind: TransactionKind,
    /// Sum of amounts.
    pub total: Decimal,
}

/// Sum of one kind within one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthKindTotal {
    /// Month 1-12.
    pub month: u32,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Sum of amounts.
    pub total: Decimal,
}

/// Sum and count of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// Category name.
    pub category: String,
    /// Sum of amounts.
    pub total: Decimal,
    /// Number of transactions.
    pub count: i64,
}

/// Totals over every transaction of an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    /// Total income.
    pub income: Decimal,
    /// Total expense.
    pub expense: Decimal,
    /// `income - expense`.
    pub balance: Decimal,
}

impl TransactionSummary {
    /// Folds per-kind totals into a summary. Missing kinds count as zero.
    #[must_use]
    pub fn from_totals(totals: &[KindTotal]) -> Self {
        let (income, expense) = split_kinds(totals.iter().map(|t| (t.kind, t.total)));
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}

/// One row of the monthly series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStat {
    /// Month 1-12.
    pub month: u32,
    /// Income in the month.
    pub income: Decimal,
    /// Expense in the month.
    pub expense: Decimal,
    /// `income - expense`.
    pub balance: Decimal,
}

/// One row of the category breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    /// Category name.
    pub category: String,
    /// Sum of amounts.
    pub amount: Decimal,
    /// Number of transactions.
    pub count: i64,
    /// Share of the kind's total, one decimal place.
    pub percentage: Decimal,
}

fn split_kinds(rows: impl Iterator<Item = (TransactionKind, Decimal)>) -> (Decimal, Decimal) {
    rows.fold((Decimal::ZERO, Decimal::ZERO), |(income, expense), (kind, total)| {
        match kind {
            TransactionKind::Income => (income + total, expense),
            TransactionKind::Expense => (income, expense + total),
        }
    })
}

/// Expands sparse month totals into twelve rows, January first.
#[must_use]
pub fn monthly_series(totals: &[MonthKindTotal]) -> Vec<MonthlyStat> {
    (1..=12)
        .map(|month| {
            let (income, expense) = split_kinds(
                totals
                    .iter()
                    .filter(|t| t.month == month)
                    .map(|t| (t.kind, t.total)),
            );
            MonthlyStat {
                month,
                income,
                expense,
                balance: income - expense,
            }
        })
        .collect()
}

/// Sorts category totals by amount descending (ties by name) and attaches
/// each one's share of the grand total.
#[must_use]
pub fn category_breakdown(mut totals: Vec<CategoryTotal>) -> Vec<CategoryStat> {
    totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    let grand_total: Decimal = totals.iter().map(|t| t.total).sum();

    totals
        .into_iter()
        .map(|t| CategoryStat {
            percentage: for_display(ratio_percent(t.total, grand_total)),
            category: t.category,
            amount: t.total,
            count: t.count,
        })
        .collect()
}

/// Aggregate queries over stored transactions.
///
/// Implemented by the db crate.
pub trait StatsStore: Send + Sync {
    /// Totals per kind over all of `owner`'s transactions.
    fn totals_by_kind(
        &self,
        owner: UserId,
    ) -> impl Future<Output = Result<Vec<KindTotal>, TransactionError>> + Send;

    /// Totals per (month, kind) inside `window`.
    fn totals_by_month(
        &self,
        owner: UserId,
        window: &DateWindow,
    ) -> impl Future<Output = Result<Vec<MonthKindTotal>, TransactionError>> + Send;

    /// Totals per category for one kind.
    fn totals_by_category(
        &self,
        owner: UserId,
        kind: TransactionKind,
    ) -> impl Future<Output = Result<Vec<CategoryTotal>, TransactionError>> + Send;
}

/// Computes statistics for an owner from a [`StatsStore`].
pub struct StatsService<'a, S> {
    store: &'a S,
}

impl<'a, S: StatsStore> StatsService<'a, S> {
    /// Creates a service over `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Income, expense and balance over all transactions.
    pub async fn summary(&self, owner: UserId) -> Result<TransactionSummary, TransactionError> {
        let totals = self.store.totals_by_kind(owner).await?;
        Ok(TransactionSummary::from_totals(&totals))
    }

    /// Twelve monthly rows for `year`.
    pub async fn monthly(
        &self,
        owner: UserId,
        year: i32,
    ) -> Result<Vec<MonthlyStat>, TransactionError> {
        let window = DateWindow::year(year).map_err(|_| TransactionError::InvalidYear(year))?;
        let totals = self.store.totals_by_month(owner, &window).await?;
        Ok(monthly_series(&totals))
    }

    /// Per-category breakdown for `kind`, largest first.
    pub async fn categories(
        &self,
        owner: UserId,
        kind: TransactionKind,
    ) -> Result<Vec<CategoryStat>, TransactionError> {
        let totals = self.store.totals_by_category(owner, kind).await?;
        Ok(category_breakdown(totals))
    }
}
