//! Authentication request/response types and JWT claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Registration request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Username is required"))]
    pub username: String,
    /// Login email; must be unique.
    #[validate(
        email(message = "Email address is invalid"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,
    /// Plain-text password; length is checked by the password policy.
    pub password: String,
}

/// Login request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub username: String,
    /// Login email.
    pub email: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// Response to a successful register or login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// The authenticated user.
    pub user: UserInfo,
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }
}
