use crate::config::{AppConfig, StoreBackend};
use crate::db;
use crate::store::{MarketStore, MemoryStore, PgStore};
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MarketStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let store = match config.store_backend {
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL missing")?;
                Arc::new(PgStore::new(db::connect(url).await?)) as Arc<dyn MarketStore>
            }
            StoreBackend::Memory => {
                tracing::warn!("using in-memory store; data is lost on restart");
                Arc::new(MemoryStore::new()) as Arc<dyn MarketStore>
            }
        };
        Ok(Self::from_parts(store, Arc::new(config)))
    }

    pub fn from_parts(store: Arc<dyn MarketStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    /// Fresh in-memory state with default settings.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            store_backend: StoreBackend::Memory,
            database_url: None,
            cors_allowed_origin: "http://localhost:3000".into(),
            session: crate::config::SessionConfig {
                cookie_name: "SESSION".into(),
                ttl_minutes: 30,
                cookie_secure: false,
            },
        });
        Self::from_parts(Arc::new(MemoryStore::new()), config)
    }
}
