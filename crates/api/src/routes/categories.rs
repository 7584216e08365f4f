//! Category routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use pocketbook_core::{
    category::{Category, CategoryUpdate, NewCategory},
    transaction::TransactionKind,
};
use pocketbook_db::CategoryRepository;
use pocketbook_shared::types::CategoryId;

/// Creates the category routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            put(update_category).delete(delete_category),
        )
}

/// `?type` filter.
#[derive(Debug, Default, Deserialize)]
pub struct KindQuery {
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Request body for a new category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Display name.
    pub name: String,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `#rrggbb`; defaults to the house blue.
    pub color: Option<String>,
    /// Icon name or emoji.
    pub icon: Option<String>,
}

/// Request body for a category update; absent fields are kept.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    /// Display name.
    pub name: Option<String>,
    /// `#rrggbb`.
    pub color: Option<String>,
    /// Icon name or emoji.
    pub icon: Option<String>,
}

fn repo(state: &AppState) -> CategoryRepository {
    CategoryRepository::new((*state.db).clone())
}

/// GET /categories
async fn list_categories(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<KindQuery>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let kind = query
        .kind
        .as_deref()
        .filter(|k| !k.is_empty())
        .map(TransactionKind::parse_required)
        .transpose()?;

    Ok(Json(repo(&state).list(user.user_id(), kind).await?))
}

/// POST /categories
async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let input = NewCategory::new(
        &payload.name,
        &payload.kind,
        payload.color.as_deref(),
        payload.icon.as_deref(),
    )?;
    let category = repo(&state).create(user.user_id(), input).await?;

    info!(user_id = %user.user_id(), category_id = %category.id, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /categories/{id}
async fn update_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<CategoryId>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    let update = CategoryUpdate::new(
        payload.name.as_deref(),
        payload.color.as_deref(),
        payload.icon.as_deref(),
    )?;
    Ok(Json(repo(&state).update(user.user_id(), id, update).await?))
}

/// DELETE /categories/{id}
async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<CategoryId>,
) -> Result<Json<Value>, ApiError> {
    repo(&state).delete(user.user_id(), id).await?;

    info!(user_id = %user.user_id(), category_id = %id, "Category deleted");
    Ok(Json(json!({ "message": "Category deleted" })))
}
