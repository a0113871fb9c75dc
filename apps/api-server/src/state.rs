//! Application state - shared across all handlers.

use std::sync::Arc;

use catalog_core::ItemStore;
use catalog_infra::{DatabaseConfig, InMemoryItemRepository};

#[cfg(feature = "postgres")]
use catalog_infra::{PostgresItemRepository, connect};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub items: ItemStore,
}

impl AppState {
    /// Build the application state, backed by PostgreSQL when configured and
    /// reachable, in memory otherwise.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => match connect(config).await {
                Ok(conn) => Self {
                    items: ItemStore::new(Arc::new(PostgresItemRepository::new(conn))),
                },
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        "Failed to connect to database. Using in-memory fallback."
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if db_config.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
            Self::in_memory()
        };

        tracing::info!("Application state initialized");
        state
    }

    /// State backed by a fresh in-memory repository.
    pub fn in_memory() -> Self {
        Self {
            items: ItemStore::new(Arc::new(InMemoryItemRepository::new())),
        }
    }
}
