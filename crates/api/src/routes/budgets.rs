//! Budget routes: listing, upsert, delete and the spending comparison.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use pocketbook_core::budget::{
    Budget, BudgetCriteria, ComparisonRecord, ReconciliationEngine, ReportingPeriod,
    UpsertBudgetInput,
};
use pocketbook_db::{BudgetRepository, TransactionRepository};
use pocketbook_shared::types::BudgetId;

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(upsert_budget))
        .route("/budgets/comparison", get(compare_budgets))
        .route("/budgets/{id}", delete(delete_budget))
}

/// `?period&year&month` selector shared by listing and comparison.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    /// `monthly` or `yearly`; anything else is treated as monthly.
    pub period: Option<String>,
    /// Calendar year; defaults to the current one.
    pub year: Option<i32>,
    /// Month 1-12 for monthly periods; defaults to the current one.
    pub month: Option<u32>,
}

impl PeriodQuery {
    fn resolve(&self) -> Result<ReportingPeriod, ApiError> {
        let today = Utc::now().date_naive();
        Ok(ReportingPeriod::resolve(
            self.period.as_deref(),
            self.year,
            self.month,
            today,
        )?)
    }
}

/// Request body for creating or replacing a budget.
#[derive(Debug, Deserialize)]
pub struct UpsertBudgetRequest {
    /// Category the budget applies to.
    pub category: String,
    /// Planned amount.
    pub amount: Decimal,
    /// `monthly` (default) or `yearly`.
    pub period: Option<String>,
    /// Calendar year.
    pub year: Option<i32>,
    /// Month 1-12; ignored for yearly budgets.
    pub month: Option<u32>,
}

/// GET /budgets
async fn list_budgets(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<Budget>>, ApiError> {
    let period = query.resolve()?;
    let criteria = BudgetCriteria::for_period(user.user_id(), &period);

    let repo = BudgetRepository::new((*state.db).clone());
    Ok(Json(repo.list(&criteria).await?))
}

/// POST /budgets
async fn upsert_budget(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpsertBudgetRequest>,
) -> Result<Json<Budget>, ApiError> {
    let input = UpsertBudgetInput::new(
        &payload.category,
        payload.amount,
        payload.period.as_deref(),
        payload.year,
        payload.month,
        Utc::now().date_naive(),
    )?;

    let repo = BudgetRepository::new((*state.db).clone());
    let budget = repo.upsert(user.user_id(), input).await?;

    info!(user_id = %user.user_id(), budget_id = %budget.id, "Budget saved");
    Ok(Json(budget))
}

/// DELETE /budgets/{id}
async fn delete_budget(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<BudgetId>,
) -> Result<Json<Value>, ApiError> {
    let repo = BudgetRepository::new((*state.db).clone());
    repo.delete(user.user_id(), id).await?;

    info!(user_id = %user.user_id(), budget_id = %id, "Budget deleted");
    Ok(Json(json!({ "message": "Budget deleted" })))
}

/// GET /budgets/comparison
async fn compare_budgets(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Vec<ComparisonRecord>>, ApiError> {
    let period = query.resolve()?;

    let budgets = BudgetRepository::new((*state.db).clone());
    let spending = TransactionRepository::new((*state.db).clone());
    let records = ReconciliationEngine::new(&budgets, &spending)
        .compare(user.user_id(), &period)
        .await?;

    Ok(Json(records))
}
