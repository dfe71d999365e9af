//! API layer: axum router over the auth and todo services.

pub mod auth;
pub mod errors;
pub mod extract;
pub mod metrics;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::run;
pub use state::ServerState;
