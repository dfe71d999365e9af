use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::validation::{FieldRules, Rule, Schema, Validate};

pub const REGISTERED_MESSAGE: &str = "ユーザー登録が完了しました。";
pub const LOGGED_IN_MESSAGE: &str = "ログインしました。";
pub const LOGGED_OUT_MESSAGE: &str = "ログアウトしました。";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "ログイン情報が正しくありません。";
pub const UNAUTHENTICATED_MESSAGE: &str = "Unauthenticated.";

pub const NAME_MAX_CHARS: usize = 255;
pub const EMAIL_MAX_CHARS: usize = 255;
pub const PASSWORD_MIN_CHARS: usize = 8;

/// Registration input
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Validate for RegisterInput {
    const SCHEMA: Schema = &[
        FieldRules { field: "name", rules: &[Rule::Required, Rule::String, Rule::Max(NAME_MAX_CHARS)] },
        FieldRules { field: "email", rules: &[Rule::Required, Rule::String, Rule::Email, Rule::Max(EMAIL_MAX_CHARS)] },
        FieldRules { field: "password", rules: &[Rule::Required, Rule::String, Rule::Min(PASSWORD_MIN_CHARS)] },
    ];
}

impl fmt::Debug for RegisterInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Login input
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl Validate for LoginInput {
    const SCHEMA: Schema = &[
        FieldRules { field: "email", rules: &[Rule::Required, Rule::String, Rule::Email] },
        FieldRules { field: "password", rules: &[Rule::Required, Rule::String] },
    ];
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Domain user (business view, no password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl From<models::user::Model> for AuthUser {
    fn from(u: models::user::Model) -> Self {
        Self { id: u.id, name: u.name, email: u.email, created_at: u.created_at, updated_at: u.updated_at }
    }
}

/// Domain credentials (hashed)
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: i32,
    pub password_hash: String,
}

/// Stored token row; `token_hash` is the digest of the secret.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub token_hash: String,
}

/// Register/login result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    /// Plaintext bearer token, only ever returned here.
    pub token: String,
}

/// Identity resolved from a bearer token.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: AuthUser,
    pub token_id: i32,
}
