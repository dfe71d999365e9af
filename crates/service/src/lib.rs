//! Service layer providing the business rules of the todo app on top of models.
//! - Separates business logic from data access through repository traits.
//! - Owns the declarative request schemas and the response envelope.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod envelope;
pub mod validation;
pub mod auth;
pub mod todo;
#[cfg(test)]
pub mod test_support;
