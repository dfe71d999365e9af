use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered 401; the session has already been cleared.
    #[error("not logged in")]
    Unauthenticated,

    #[error("{message}")]
    Validation { message: String, errors: BTreeMap<String, Vec<String>> },

    /// Error envelope from a todo lookup.
    #[error("{0}")]
    NotFound(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("session storage: {0}")]
    Session(String),
}

impl ClientError {
    /// Messages for one field of a validation failure.
    pub fn field_errors(&self, field: &str) -> &[String] {
        match self {
            ClientError::Validation { errors, .. } => errors.get(field).map(Vec::as_slice).unwrap_or_default(),
            _ => &[],
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ClientError::Unauthenticated)
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Session(e.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
