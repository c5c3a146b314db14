//! Store selection from configuration

use std::sync::Arc;

use leaguectl_core::config::{Backend, StoreSection};
use leaguectl_core::store::{MemoryStore, Store, StoreError};

use crate::db::{self, PgStore};
use crate::postgrest::RestStore;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("store.{0} is required for the {1} backend")]
    Missing(&'static str, Backend),

    #[error("database connection failed: {0}")]
    Connect(#[from] sqlx::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Open the configured store. Called once at startup.
pub async fn open_store(section: &StoreSection) -> Result<Arc<dyn Store>, BackendError> {
    let store: Arc<dyn Store> = match section.backend {
        Backend::Memory => {
            tracing::warn!("using the in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
        Backend::Postgres => {
            let url = section
                .database_url
                .as_deref()
                .ok_or(BackendError::Missing("database_url", Backend::Postgres))?;
            let pool = db::create_pool_with_options(url, section.max_connections).await?;
            Arc::new(PgStore::new(pool))
        }
        Backend::Rest => {
            let url = section
                .rest_url
                .as_deref()
                .ok_or(BackendError::Missing("rest_url", Backend::Rest))?;
            let key = section
                .api_key
                .as_deref()
                .ok_or(BackendError::Missing("api_key", Backend::Rest))?;
            Arc::new(RestStore::new(url, key)?)
        }
    };

    tracing::info!(backend = %section.backend, "store ready");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_needs_nothing() {
        let store = open_store(&StoreSection::default()).await.unwrap();
        assert_eq!(store.count(leaguectl_core::Table::Teams).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_settings_are_reported() {
        let section = StoreSection {
            backend: Backend::Rest,
            rest_url: Some("https://demo.supabase.co".into()),
            ..StoreSection::default()
        };
        let err = open_store(&section).await.err().unwrap();
        assert_eq!(err.to_string(), "store.api_key is required for the rest backend");
    }
}
