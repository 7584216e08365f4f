//! Enum columns stored as constrained strings.

use pocketbook_core::{budget::BudgetPeriod as CorePeriod, transaction::TransactionKind as CoreKind};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `budgets.period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum BudgetPeriod {
    /// One calendar month.
    #[sea_orm(string_value = "monthly")]
    Monthly,
    /// One calendar year.
    #[sea_orm(string_value = "yearly")]
    Yearly,
}

/// `transactions.kind` and `categories.kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TransactionKind {
    /// Money received.
    #[sea_orm(string_value = "income")]
    Income,
    /// Money spent.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<CorePeriod> for BudgetPeriod {
    fn from(period: CorePeriod) -> Self {
        match period {
            CorePeriod::Monthly => Self::Monthly,
            CorePeriod::Yearly => Self::Yearly,
        }
    }
}

impl From<BudgetPeriod> for CorePeriod {
    fn from(period: BudgetPeriod) -> Self {
        match period {
            BudgetPeriod::Monthly => Self::Monthly,
            BudgetPeriod::Yearly => Self::Yearly,
        }
    }
}

impl From<CoreKind> for TransactionKind {
    fn from(kind: CoreKind) -> Self {
        match kind {
            CoreKind::Income => Self::Income,
            CoreKind::Expense => Self::Expense,
        }
    }
}

impl From<TransactionKind> for CoreKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense => Self::Expense,
        }
    }
}
