//! # Catalog Infrastructure
//!
//! Concrete implementations of the ports defined in `catalog-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL storage via SeaORM
//!
//! Without `postgres` only the in-memory repository is built.

pub mod database;

// Re-exports
pub use database::{DatabaseConfig, InMemoryItemRepository};

#[cfg(feature = "postgres")]
pub use database::{PostgresItemRepository, connect};
