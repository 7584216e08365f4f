//! Budget lookup criteria.

use pocketbook_shared::types::UserId;

use super::error::BudgetError;
use super::period::{ReportingPeriod, validate_month, validate_year};
use super::types::BudgetPeriod;

/// Which budgets of an owner to fetch.
///
/// Every field except `owner` is optional; an absent field does not constrain
/// the lookup. The store translates a validated criteria into its own query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetCriteria {
    owner: UserId,
    period: Option<BudgetPeriod>,
    year: Option<i32>,
    month: Option<u32>,
}

impl BudgetCriteria {
    /// All budgets of `owner`.
    #[must_use]
    pub const fn for_owner(owner: UserId) -> Self {
        Self {
            owner,
            period: None,
            year: None,
            month: None,
        }
    }

    /// Budgets that apply to a resolved reporting period. The month is only
    /// constrained for monthly periods.
    #[must_use]
    pub const fn for_period(owner: UserId, period: &ReportingPeriod) -> Self {
        let month = match period.period() {
            BudgetPeriod::Monthly => period.month(),
            BudgetPeriod::Yearly => None,
        };
        Self {
            owner,
            period: Some(period.period()),
            year: Some(period.year()),
            month,
        }
    }

    /// Checks the optional fields are in range.
    ///
    /// # Errors
    ///
    /// Returns `InvalidYear` / `InvalidMonth` for out-of-range values.
    pub fn validate(&self) -> Result<(), BudgetError> {
        if let Some(year) = self.year {
            validate_year(year)?;
        }
        if let Some(month) = self.month {
            validate_month(month)?;
        }
        Ok(())
    }

    /// Owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Period filter, if any.
    #[must_use]
    pub const fn period(&self) -> Option<BudgetPeriod> {
        self.period
    }

    /// Year filter, if any.
    #[must_use]
    pub const fn year(&self) -> Option<i32> {
        self.year
    }

    /// Month filter, if any.
    #[must_use]
    pub const fn month(&self) -> Option<u32> {
        self.month
    }

    /// In-memory equivalent of the store query, for test fakes.
    #[cfg(test)]
    pub(crate) fn matches(&self, budget: &super::types::Budget) -> bool {
        budget.owner_id == self.owner
            && self.period.is_none_or(|p| budget.period == p)
            && self.year.is_none_or(|y| budget.year == y)
            && self.month.is_none_or(|m| budget.month == Some(m))
    }
}
