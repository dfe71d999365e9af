//! Client for the todo API.
//!
//! [`ApiClient`] owns a [`Session`]; every request goes through one place
//! that attaches the bearer token and forgets it again on a 401.

pub mod api;
pub mod error;
pub mod session;
pub mod types;

pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
