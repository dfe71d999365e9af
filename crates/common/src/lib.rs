//! Shared building blocks for the todo workspace: logging bootstrap and
//! small wire types used by more than one crate.

pub mod types;
pub mod utils;
