use crate::config::AppConfig;
use crate::{db, seed};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        Self::from_config(config).await
    }

    /// Connect, migrate and (if configured) seed.
    pub async fn from_config(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let db = db::connect(&config.database).await?;
        db::migrate(&db).await?;
        if config.seed {
            seed::run(&db).await?;
        }
        Ok(Self { db, config })
    }

    /// Seeded in-memory state for tests.
    pub async fn in_memory() -> anyhow::Result<Self> {
        Self::from_config(Arc::new(AppConfig::in_memory())).await
    }
}
