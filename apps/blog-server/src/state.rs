//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::PostService;
use quill_core::ports::PostRepository;
use quill_infra::InMemoryPostRepository;

use crate::config::DatabaseSettings;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    /// Which post store backs the service ("postgres" or "memory").
    pub store: &'static str,
}

impl AppState {
    /// State backed by the in-memory post store.
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()), "memory")
    }

    pub fn with_repository(repo: Arc<dyn PostRepository>, store: &'static str) -> Self {
        Self {
            posts: PostService::new(repo),
            store,
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(db_settings: Option<&DatabaseSettings>) -> Self {
        #[cfg(feature = "postgres")]
        let state = {
            use quill_infra::{DatabaseConfig, PostgresPostRepository, connect};

            if let Some(settings) = db_settings {
                let config = DatabaseConfig {
                    url: settings.url.clone(),
                    max_connections: settings.max_connections,
                    min_connections: settings.min_connections,
                };
                match connect(&config).await {
                    Ok(conn) => Self::with_repository(
                        Arc::new(PostgresPostRepository::new(conn)),
                        "postgres",
                    ),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory store.",
                            e
                        );
                        Self::in_memory()
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running with the in-memory store.");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if db_settings.is_some() {
                tracing::warn!("Built without postgres feature - DATABASE_URL ignored");
            }
            Self::in_memory()
        };

        tracing::info!(store = state.store, "Application state initialized");

        state
    }
}
