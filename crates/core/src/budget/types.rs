//! Budget data types.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use pocketbook_shared::types::{BudgetId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;
use crate::limits::{MAX_NAME_CHARS, amount_fits, within_chars};
use super::period::{validate_month, validate_year};

/// Aggregation granularity of a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    /// Budget for one calendar month.
    #[default]
    Monthly,
    /// Budget for one calendar year.
    Yearly,
}

impl BudgetPeriod {
    /// Parses `monthly` / `yearly`, ignoring surrounding whitespace and case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("monthly") {
            Some(Self::Monthly)
        } else if value.eq_ignore_ascii_case("yearly") {
            Some(Self::Yearly)
        } else {
            None
        }
    }

    /// Returns the wire name of the period.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Owning user.
    #[serde(skip_serializing)]
    pub owner_id: UserId,
    /// Category name the budget caps.
    pub category: String,
    /// Budgeted amount (non-negative).
    pub amount: Decimal,
    /// Monthly or yearly.
    pub period: BudgetPeriod,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, present only for monthly budgets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating or replacing a budget.
///
/// `(owner, category, period, year, month)` is the upsert key; `amount` is the
/// value written on both insert and conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertBudgetInput {
    /// Category name, trimmed.
    pub category: String,
    /// Budgeted amount.
    pub amount: Decimal,
    /// Monthly or yearly.
    pub period: BudgetPeriod,
    /// Calendar year.
    pub year: i32,
    /// Calendar month; always `Some` for monthly and `None` for yearly.
    pub month: Option<u32>,
}

impl UpsertBudgetInput {
    /// Builds an upsert input from raw request fields.
    ///
    /// A missing period means monthly. A missing year (and, for monthly
    /// budgets, month) is taken from `today`. Any month given for a yearly
    /// budget is dropped.
    ///
    /// # Errors
    ///
    /// Returns a validation variant of `BudgetError` for a blank category, a
    /// negative amount, an unknown period, or an out-of-range year or month.
    pub fn new(
        category: &str,
        amount: Decimal,
        period: Option<&str>,
        year: Option<i32>,
        month: Option<u32>,
        today: NaiveDate,
    ) -> Result<Self, BudgetError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(BudgetError::EmptyCategory);
        }
        if !within_chars(category, MAX_NAME_CHARS) {
            return Err(BudgetError::CategoryTooLong);
        }
        if amount < Decimal::ZERO {
            return Err(BudgetError::NegativeAmount);
        }
        if !amount_fits(amount) {
            return Err(BudgetError::AmountOutOfRange(amount));
        }

        let period = match period {
            None => BudgetPeriod::Monthly,
            Some(raw) => {
                BudgetPeriod::parse(raw).ok_or_else(|| BudgetError::InvalidPeriod(raw.to_string()))?
            }
        };

        let year = validate_year(year.unwrap_or_else(|| today.year()))?;
        let month = match period {
            BudgetPeriod::Monthly => Some(validate_month(month.unwrap_or_else(|| today.month()))?),
            BudgetPeriod::Yearly => None,
        };

        Ok(Self {
            category: category.to_string(),
            amount: amount.normalize(),
            period,
            year,
            month,
        })
    }
}
