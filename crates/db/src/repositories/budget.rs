//! Budget repository: listing, idempotent upsert and deletion.

use chrono::Utc;
use pocketbook_core::budget::{Budget, BudgetCriteria, BudgetError, BudgetStore, UpsertBudgetInput};
use pocketbook_shared::types::{BudgetId, UserId};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Select, Set, sea_query::OnConflict,
};
use uuid::Uuid;

use crate::entities::{budgets, sea_orm_active_enums::BudgetPeriod};

#[allow(clippy::needless_pass_by_value)]
fn store_err(err: DbErr) -> BudgetError {
    BudgetError::Store(err.to_string())
}

fn month_value(month: u32) -> Result<i32, BudgetError> {
    i32::try_from(month).map_err(|_| BudgetError::InvalidMonth(month))
}

/// Translates criteria into a filtered select, ordered by category.
///
/// # Errors
///
/// Returns an error if the criteria are out of range.
pub fn criteria_query(criteria: &BudgetCriteria) -> Result<Select<budgets::Entity>, BudgetError> {
    criteria.validate()?;
    let month = criteria.month().map(month_value).transpose()?;

    let condition = Condition::all()
        .add(budgets::Column::UserId.eq(criteria.owner().into_inner()))
        .add_option(
            criteria
                .period()
                .map(|p| budgets::Column::Period.eq(BudgetPeriod::from(p))),
        )
        .add_option(criteria.year().map(|y| budgets::Column::Year.eq(y)))
        .add_option(month.map(|m| budgets::Column::Month.eq(m)));

    Ok(budgets::Entity::find()
        .filter(condition)
        .order_by_asc(budgets::Column::Category))
}

/// Budget repository.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists budgets matching `criteria`, sorted by category.
    ///
    /// # Errors
    ///
    /// Returns an error if the criteria are invalid or the query fails.
    pub async fn list(&self, criteria: &BudgetCriteria) -> Result<Vec<Budget>, BudgetError> {
        let models = criteria_query(criteria)?
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(models.into_iter().map(Budget::from).collect())
    }

    /// Inserts a budget, or replaces the amount of the one already stored
    /// under the same `(owner, category, period, year, month)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub async fn upsert(
        &self,
        owner: UserId,
        input: UpsertBudgetInput,
    ) -> Result<Budget, BudgetError> {
        let month = input.month.map(month_value).transpose()?;
        let now = Utc::now().fixed_offset();
        let model = budgets::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(owner.into_inner()),
            category: Set(input.category),
            amount: Set(input.amount),
            period: Set(input.period.into()),
            year: Set(input.year),
            month: Set(month),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let stored = budgets::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    budgets::Column::UserId,
                    budgets::Column::Category,
                    budgets::Column::Period,
                    budgets::Column::Year,
                    budgets::Column::Month,
                ])
                .update_columns([budgets::Column::Amount, budgets::Column::UpdatedAt])
                .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(store_err)?;

        tracing::debug!(
            user_id = %owner,
            budget_id = %stored.id,
            category = %stored.category,
            "Budget upserted"
        );
        Ok(stored.into())
    }

    /// Deletes one of `owner`'s budgets.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such budget belongs to `owner`.
    pub async fn delete(&self, owner: UserId, id: BudgetId) -> Result<(), BudgetError> {
        let result = budgets::Entity::delete_many()
            .filter(budgets::Column::Id.eq(id.into_inner()))
            .filter(budgets::Column::UserId.eq(owner.into_inner()))
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        if result.rows_affected == 0 {
            return Err(BudgetError::NotFound(id));
        }
        Ok(())
    }
}

impl BudgetStore for BudgetRepository {
    async fn find_budgets(&self, criteria: &BudgetCriteria) -> Result<Vec<Budget>, BudgetError> {
        self.list(criteria).await
    }
}

#[cfg(test)]
#[path = "budget_tests.rs"]
mod tests;
