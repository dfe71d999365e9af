//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, login, bearer token resolution and logout live here,
//! independent of the web framework.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod repo;
pub mod service;
pub mod token;

pub use service::{AuthConfig, AuthService};
