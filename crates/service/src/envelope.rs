//! Uniform `{status, message?, data?}` wrapper around response bodies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub status: EnvelopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self { status: EnvelopeStatus::Success, message: None, data: Some(data) }
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self { status: EnvelopeStatus::Success, message: Some(message.into()), data: Some(data) }
    }

    /// Failure carried in the body; the HTTP status stays 2xx.
    pub fn error(message: impl Into<String>) -> Self {
        Self { status: EnvelopeStatus::Error, message: Some(message.into()), data: None }
    }

    pub fn is_success(&self) -> bool {
        self.status == EnvelopeStatus::Success
    }
}

impl Envelope<()> {
    /// Success carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self { status: EnvelopeStatus::Success, message: Some(message.into()), data: None }
    }
}
