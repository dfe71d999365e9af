//! Todo module: CRUD over live (not soft-deleted) todos, answering with
//! [`Envelope`](crate::envelope::Envelope)s.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::TodoService;
