//! Authentication routes for register, login and the current user.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use sea_orm::{DbErr, SqlErr};
use tracing::info;
use validator::Validate;

use crate::{AppState, error::ApiError, middleware::AuthUser};
use pocketbook_core::auth::{
    MIN_PASSWORD_LENGTH, hash_password, is_acceptable_password, verify_password,
};
use pocketbook_db::{UserRepository, entities::users};
use pocketbook_shared::{
    AppError,
    auth::{AuthResponse, LoginRequest, RegisterRequest, UserInfo},
};

/// Public auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Auth routes that need a valid token.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

fn user_info(user: users::Model) -> UserInfo {
    UserInfo {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: user.created_at.with_timezone(&Utc),
    }
}

fn issue_token(state: &AppState, user: users::Model) -> Result<AuthResponse, ApiError> {
    let access_token = state.jwt_service.generate_access_token(user.id)?;
    Ok(AuthResponse {
        user: user_info(user),
        access_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    })
}

fn email_taken() -> ApiError {
    ApiError(AppError::Conflict("Email is already registered".to_string()))
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid email or password")
}

/// POST /auth/register
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.validate()?;
    if !is_acceptable_password(&payload.password) {
        return Err(ApiError(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        ))));
    }

    let email = payload.email.trim().to_lowercase();
    let user_repo = UserRepository::new((*state.db).clone());
    if user_repo.email_exists(&email).await? {
        return Err(email_taken());
    }

    let password_hash = hash_password(&payload.password)?;
    let user = user_repo
        .create(payload.username.trim(), &email, &password_hash)
        .await
        .map_err(|e: DbErr| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => email_taken(),
            _ => ApiError::from(e),
        })?;

    info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(issue_token(&state, user)?)))
}

/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.validate()?;

    let email = payload.email.trim().to_lowercase();
    let user_repo = UserRepository::new((*state.db).clone());
    let Some(user) = user_repo.find_by_email(&email).await? else {
        info!("Login attempt for non-existent user");
        return Err(invalid_credentials());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(invalid_credentials());
    }

    info!(user_id = %user.id, "User logged in");
    Ok(Json(issue_token(&state, user)?))
}

/// GET /auth/me
async fn me(State(state): State<AppState>, user: AuthUser) -> Result<Json<UserInfo>, ApiError> {
    let user_repo = UserRepository::new((*state.db).clone());
    let model = user_repo
        .find_by_id(user.user_id().into_inner())
        .await?
        .ok_or_else(|| ApiError::unauthorized("User no longer exists"))?;

    Ok(Json(user_info(model)))
}
