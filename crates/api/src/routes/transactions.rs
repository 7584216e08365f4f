//! Transaction routes: CRUD plus summary, monthly and per-category statistics.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use pocketbook_core::transaction::{
    CategoryStat, MonthlyStat, StatsService, Transaction, TransactionFilter, TransactionInput,
    TransactionKind, TransactionSummary,
};
use pocketbook_db::TransactionRepository;
use pocketbook_shared::types::TransactionId;

/// Creates the transaction routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
        .route("/transactions/stats/summary", get(summary))
        .route("/transactions/stats/monthly", get(monthly))
        .route("/transactions/stats/categories", get(categories))
}

/// Listing filters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Exact category name.
    pub category: Option<String>,
    /// First day included.
    pub start_date: Option<NaiveDate>,
    /// Last day included.
    pub end_date: Option<NaiveDate>,
}

impl ListQuery {
    fn into_filter(self) -> Result<TransactionFilter, ApiError> {
        let mut filter = TransactionFilter::default().between(self.start_date, self.end_date);
        if let Some(kind) = self.kind.as_deref().filter(|k| !k.is_empty()) {
            filter = filter.with_kind(TransactionKind::parse_required(kind)?);
        }
        if let Some(category) = self.category.filter(|c| !c.trim().is_empty()) {
            filter = filter.with_category(category.trim());
        }
        Ok(filter)
    }
}

/// Request body for creating or replacing a transaction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Amount.
    pub amount: Decimal,
    /// Category name.
    pub category: String,
    /// Optional note.
    pub description: Option<String>,
    /// When the money moved; defaults to now.
    pub occurred_at: Option<DateTime<Utc>>,
}

impl TransactionRequest {
    fn into_input(self) -> Result<TransactionInput, ApiError> {
        Ok(TransactionInput::new(
            &self.kind,
            self.amount,
            &self.category,
            self.description.as_deref(),
            self.occurred_at,
            Utc::now(),
        )?)
    }
}

/// `?year` for monthly statistics.
#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    /// Calendar year; defaults to the current one.
    pub year: Option<i32>,
}

/// `?type` for the category breakdown.
#[derive(Debug, Default, Deserialize)]
pub struct KindQuery {
    /// `income` or `expense` (default).
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

fn repo(state: &AppState) -> TransactionRepository {
    TransactionRepository::new((*state.db).clone())
}

/// GET /transactions
async fn list_transactions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let filter = query.into_filter()?;
    Ok(Json(repo(&state).list(user.user_id(), &filter).await?))
}

/// GET /transactions/{id}
async fn get_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<TransactionId>,
) -> Result<Json<Transaction>, ApiError> {
    Ok(Json(repo(&state).get(user.user_id(), id).await?))
}

/// POST /transactions
async fn create_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<TransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let input = payload.into_input()?;
    let tx = repo(&state).create(user.user_id(), input).await?;

    info!(user_id = %user.user_id(), transaction_id = %tx.id, kind = %tx.kind, "Transaction recorded");
    Ok((StatusCode::CREATED, Json(tx)))
}

/// PUT /transactions/{id}
async fn update_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<TransactionId>,
    Json(payload): Json<TransactionRequest>,
) -> Result<Json<Transaction>, ApiError> {
    let input = payload.into_input()?;
    Ok(Json(repo(&state).update(user.user_id(), id, input).await?))
}

/// DELETE /transactions/{id}
async fn delete_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<TransactionId>,
) -> Result<Json<Value>, ApiError> {
    repo(&state).delete(user.user_id(), id).await?;

    info!(user_id = %user.user_id(), transaction_id = %id, "Transaction deleted");
    Ok(Json(json!({ "message": "Transaction deleted" })))
}

/// GET /transactions/stats/summary
async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<TransactionSummary>, ApiError> {
    let store = repo(&state);
    Ok(Json(StatsService::new(&store).summary(user.user_id()).await?))
}

/// GET /transactions/stats/monthly
async fn monthly(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<YearQuery>,
) -> Result<Json<Vec<MonthlyStat>>, ApiError> {
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    let store = repo(&state);
    Ok(Json(
        StatsService::new(&store)
            .monthly(user.user_id(), year)
            .await?,
    ))
}

/// GET /transactions/stats/categories
async fn categories(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<KindQuery>,
) -> Result<Json<Vec<CategoryStat>>, ApiError> {
    let kind = match query.kind.as_deref().filter(|k| !k.is_empty()) {
        Some(raw) => TransactionKind::parse_required(raw)?,
        None => TransactionKind::Expense,
    };
    let store = repo(&state);
    Ok(Json(
        StatsService::new(&store)
            .categories(user.user_id(), kind)
            .await?,
    ))
}
