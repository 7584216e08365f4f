//! Password hashing and credential rules.

mod password;

pub use password::{PasswordError, hash_password, verify_password};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Returns true if the password satisfies the registration policy.
#[must_use]
pub fn is_acceptable_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}
