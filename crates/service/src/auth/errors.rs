use thiserror::Error;

use models::errors::ModelError;

use crate::validation::{unique_message, ValidationErrors};

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    /// Unknown email or wrong password; deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::InvalidCredentials => 1004,
            AuthError::Unauthenticated => 1005,
            AuthError::HashError(_) => 1101,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<ValidationErrors> for AuthError {
    fn from(e: ValidationErrors) -> Self {
        AuthError::Validation(e)
    }
}

impl From<ModelError> for AuthError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Unique(field) => {
                AuthError::Validation(ValidationErrors::single(&field, unique_message(&field)))
            }
            other => AuthError::Repository(other.to_string()),
        }
    }
}
