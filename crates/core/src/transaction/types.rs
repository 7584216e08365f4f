//! Transaction data types.

use chrono::{DateTime, Days, NaiveDate, Utc};
use pocketbook_shared::types::{TransactionId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::TransactionError;
use crate::limits::{MAX_NAME_CHARS, amount_fits, within_chars};

/// Direction of money flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionKind {
    /// Parses `income` / `expense`, ignoring surrounding whitespace and case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("income") {
            Some(Self::Income)
        } else if value.eq_ignore_ascii_case("expense") {
            Some(Self::Expense)
        } else {
            None
        }
    }

    /// Parses a required kind.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKind` for anything but `income` / `expense`.
    pub fn parse_required(value: &str) -> Result<Self, TransactionError> {
        Self::parse(value).ok_or_else(|| TransactionError::InvalidKind(value.to_string()))
    }

    /// Returns the wire name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored income or expense record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Owning user.
    #[serde(skip_serializing)]
    pub owner_id: UserId,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Amount (non-negative).
    pub amount: Decimal,
    /// Category name.
    pub category: String,
    /// Free-form note.
    pub description: String,
    /// When the money moved.
    pub occurred_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for creating or replacing a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    /// Income or expense.
    pub kind: TransactionKind,
    /// Amount.
    pub amount: Decimal,
    /// Category name, trimmed.
    pub category: String,
    /// Description, trimmed; empty when absent.
    pub description: String,
    /// When the money moved.
    pub occurred_at: DateTime<Utc>,
}

impl TransactionInput {
    /// Builds a transaction input from raw request fields. A missing
    /// `occurred_at` becomes `now`.
    ///
    /// # Errors
    ///
    /// Returns a validation variant for an unknown kind, a negative amount or
    /// a blank category.
    pub fn new(
        kind: &str,
        amount: Decimal,
        category: &str,
        description: Option<&str>,
        occurred_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Self, TransactionError> {
        let kind = TransactionKind::parse_required(kind)?;
        if amount < Decimal::ZERO {
            return Err(TransactionError::NegativeAmount);
        }
        if !amount_fits(amount) {
            return Err(TransactionError::AmountOutOfRange(amount));
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(TransactionError::EmptyCategory);
        }
        if !within_chars(category, MAX_NAME_CHARS) {
            return Err(TransactionError::CategoryTooLong);
        }

        Ok(Self {
            kind,
            amount: amount.normalize(),
            category: category.to_string(),
            description: description.map(str::trim).unwrap_or_default().to_string(),
            occurred_at: occurred_at.unwrap_or(now),
        })
    }
}

/// Optional filters for listing transactions.
///
/// `start` and `end` are calendar dates, both inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Only this kind.
    pub kind: Option<TransactionKind>,
    /// Only this category.
    pub category: Option<String>,
    /// On or after this date.
    pub start: Option<NaiveDate>,
    /// On or before this date.
    pub end: Option<NaiveDate>,
}

impl TransactionFilter {
    /// Restricts to one kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restricts to one category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restricts to a date range, both ends inclusive.
    #[must_use]
    pub const fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Checks the date range is not inverted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when `start > end`.
    pub fn validate(&self) -> Result<(), TransactionError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => {
                Err(TransactionError::InvalidDateRange { start, end })
            }
            _ => Ok(()),
        }
    }

    /// First instant included by the filter.
    #[must_use]
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.start
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// First instant excluded by the filter (midnight after the end date).
    #[must_use]
    pub fn ends_before(&self) -> Option<DateTime<Utc>> {
        self.end
            .and_then(|date| date.checked_add_days(Days::new(1)))
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// In-memory equivalent of the store query, for tests.
    #[cfg(test)]
    pub(crate) fn matches(&self, tx: &Transaction) -> bool {
        self.kind.is_none_or(|k| tx.kind == k)
            && self.category.as_deref().is_none_or(|c| tx.category == c)
            && self.starts_at().is_none_or(|s| tx.occurred_at >= s)
            && self.ends_before().is_none_or(|e| tx.occurred_at < e)
    }
}
