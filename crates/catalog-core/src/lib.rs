//! # Catalog Core
//!
//! The domain layer of the catalog service.
//! This crate contains the `Item` model, its invariants and the store that
//! enforces them, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod store;

pub use error::{DomainError, RepoError};
pub use store::ItemStore;
