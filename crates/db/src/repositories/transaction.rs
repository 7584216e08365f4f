//! Transaction repository: CRUD, filtered listing and aggregate queries.

use chrono::Utc;
use pocketbook_core::budget::{BudgetError, DateWindow, SpendingByCategory, SpendingStore};
use pocketbook_core::transaction::{
    CategoryTotal, KindTotal, MonthKindTotal, StatsStore, Transaction, TransactionError,
    TransactionFilter, TransactionInput, TransactionKind as CoreKind,
};
use pocketbook_shared::types::{TransactionId, UserId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Select, Set,
    sea_query::{Expr, SimpleExpr},
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::TransactionKind, transactions};

#[allow(clippy::needless_pass_by_value)]
fn store_err(err: DbErr) -> TransactionError {
    TransactionError::Store(err.to_string())
}

fn month_of_occurrence() -> SimpleExpr {
    Expr::cust("CAST(EXTRACT(MONTH FROM \"occurred_at\" AT TIME ZONE 'UTC') AS INTEGER)")
}

fn amount_sum() -> SimpleExpr {
    Expr::col(transactions::Column::Amount).sum()
}

fn owned_by(owner: UserId) -> SimpleExpr {
    transactions::Column::UserId.eq(owner.into_inner())
}

#[derive(Debug, FromQueryResult)]
struct CategorySpend {
    category: String,
    spent: Decimal,
}

#[derive(Debug, FromQueryResult)]
struct KindRow {
    kind: TransactionKind,
    total: Decimal,
}

#[derive(Debug, FromQueryResult)]
struct MonthRow {
    month: i32,
    kind: TransactionKind,
    total: Decimal,
}

#[derive(Debug, FromQueryResult)]
struct CategoryRow {
    category: String,
    total: Decimal,
    count: i64,
}

/// Translates a listing filter into a select, newest first.
///
/// # Errors
///
/// Returns an error if the date range is inverted.
pub fn filter_query(
    owner: UserId,
    filter: &TransactionFilter,
) -> Result<Select<transactions::Entity>, TransactionError> {
    filter.validate()?;

    let condition = Condition::all()
        .add(owned_by(owner))
        .add_option(
            filter
                .kind
                .map(|k| transactions::Column::Kind.eq(TransactionKind::from(k))),
        )
        .add_option(
            filter
                .category
                .as_deref()
                .map(|c| transactions::Column::Category.eq(c)),
        )
        .add_option(
            filter
                .starts_at()
                .map(|s| transactions::Column::OccurredAt.gte(s)),
        )
        .add_option(
            filter
                .ends_before()
                .map(|e| transactions::Column::OccurredAt.lt(e)),
        );

    Ok(transactions::Entity::find()
        .filter(condition)
        .order_by_desc(transactions::Column::OccurredAt)
        .order_by_desc(transactions::Column::CreatedAt))
}

/// Expense sums per category inside a window.
#[must_use]
pub fn spending_query(owner: UserId, window: &DateWindow) -> Select<transactions::Entity> {
    transactions::Entity::find()
        .select_only()
        .column(transactions::Column::Category)
        .column_as(amount_sum(), "spent")
        .filter(owned_by(owner))
        .filter(transactions::Column::Kind.eq(TransactionKind::Expense))
        .filter(transactions::Column::OccurredAt.gte(window.start))
        .filter(transactions::Column::OccurredAt.lt(window.end))
        .group_by(transactions::Column::Category)
}

/// Sums per (month, kind) inside a window.
#[must_use]
pub fn monthly_query(owner: UserId, window: &DateWindow) -> Select<transactions::Entity> {
    transactions::Entity::find()
        .select_only()
        .column_as(month_of_occurrence(), "month")
        .column(transactions::Column::Kind)
        .column_as(amount_sum(), "total")
        .filter(owned_by(owner))
        .filter(transactions::Column::OccurredAt.gte(window.start))
        .filter(transactions::Column::OccurredAt.lt(window.end))
        .group_by(month_of_occurrence())
        .group_by(transactions::Column::Kind)
}

/// Transaction repository.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists `owner`'s transactions matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter is invalid or the query fails.
    pub async fn list(
        &self,
        owner: UserId,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, TransactionError> {
        let models = filter_query(owner, filter)?
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(models.into_iter().map(Transaction::from).collect())
    }

    async fn find_model(
        &self,
        owner: UserId,
        id: TransactionId,
    ) -> Result<transactions::Model, TransactionError> {
        transactions::Entity::find_by_id(id.into_inner())
            .filter(owned_by(owner))
            .one(&self.db)
            .await
            .map_err(store_err)?
            .ok_or(TransactionError::NotFound(id))
    }

    /// Fetches one of `owner`'s transactions.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if it does not exist or belongs to someone else.
    pub async fn get(
        &self,
        owner: UserId,
        id: TransactionId,
    ) -> Result<Transaction, TransactionError> {
        self.find_model(owner, id).await.map(Transaction::from)
    }

    /// Records a new transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        owner: UserId,
        input: TransactionInput,
    ) -> Result<Transaction, TransactionError> {
        let now = Utc::now().fixed_offset();
        let model = transactions::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(owner.into_inner()),
            kind: Set(input.kind.into()),
            amount: Set(input.amount),
            category: Set(input.category),
            description: Set(input.description),
            occurred_at: Set(input.occurred_at.fixed_offset()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let stored = model.insert(&self.db).await.map_err(store_err)?;
        tracing::debug!(user_id = %owner, transaction_id = %stored.id, "Transaction created");
        Ok(stored.into())
    }

    /// Replaces every editable field of one of `owner`'s transactions.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if it does not exist or belongs to someone else.
    pub async fn update(
        &self,
        owner: UserId,
        id: TransactionId,
        input: TransactionInput,
    ) -> Result<Transaction, TransactionError> {
        let mut model = self.find_model(owner, id).await?.into_active_model();
        model.kind = Set(input.kind.into());
        model.amount = Set(input.amount);
        model.category = Set(input.category);
        model.description = Set(input.description);
        model.occurred_at = Set(input.occurred_at.fixed_offset());
        model.updated_at = Set(Utc::now().fixed_offset());

        let stored = model.update(&self.db).await.map_err(store_err)?;
        Ok(stored.into())
    }

    /// Deletes one of `owner`'s transactions.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if it does not exist or belongs to someone else.
    pub async fn delete(&self, owner: UserId, id: TransactionId) -> Result<(), TransactionError> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(id.into_inner()))
            .filter(owned_by(owner))
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        if result.rows_affected == 0 {
            return Err(TransactionError::NotFound(id));
        }
        Ok(())
    }
}

impl SpendingStore for TransactionRepository {
    async fn expenses_by_category(
        &self,
        owner: UserId,
        window: &DateWindow,
    ) -> Result<SpendingByCategory, BudgetError> {
        let rows = spending_query(owner, window)
            .into_model::<CategorySpend>()
            .all(&self.db)
            .await
            .map_err(|e| BudgetError::Store(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|r| (r.category, r.spent.normalize()))
            .collect())
    }
}

impl StatsStore for TransactionRepository {
    async fn totals_by_kind(&self, owner: UserId) -> Result<Vec<KindTotal>, TransactionError> {
        let rows = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::Kind)
            .column_as(amount_sum(), "total")
            .filter(owned_by(owner))
            .group_by(transactions::Column::Kind)
            .into_model::<KindRow>()
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(rows
            .into_iter()
            .map(|r| KindTotal {
                kind: r.kind.into(),
                total: r.total.normalize(),
            })
            .collect())
    }

    async fn totals_by_month(
        &self,
        owner: UserId,
        window: &DateWindow,
    ) -> Result<Vec<MonthKindTotal>, TransactionError> {
        let rows = monthly_query(owner, window)
            .into_model::<MonthRow>()
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(rows
            .into_iter()
            .filter_map(|r| {
                Some(MonthKindTotal {
                    month: u32::try_from(r.month).ok()?,
                    kind: r.kind.into(),
                    total: r.total.normalize(),
                })
            })
            .collect())
    }

    async fn totals_by_category(
        &self,
        owner: UserId,
        kind: CoreKind,
    ) -> Result<Vec<CategoryTotal>, TransactionError> {
        let rows = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::Category)
            .column_as(amount_sum(), "total")
            .column_as(Expr::col(transactions::Column::Id).count(), "count")
            .filter(owned_by(owner))
            .filter(transactions::Column::Kind.eq(TransactionKind::from(kind)))
            .group_by(transactions::Column::Category)
            .into_model::<CategoryRow>()
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(rows
            .into_iter()
            .map(|r| CategoryTotal {
                category: r.category,
                total: r.total.normalize(),
                count: r.count,
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "transaction_tests.rs"]
mod tests;
