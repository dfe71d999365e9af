//! Persistence layer: sea-orm entities for users, personal access tokens and
//! todos, plus connection helpers.

pub mod errors;
pub mod db;
pub mod user;
pub mod personal_access_token;
pub mod todo;
