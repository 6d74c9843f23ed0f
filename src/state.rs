use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::ai::{GeminiClient, ReflectionClient};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub ai: Arc<dyn ReflectionClient>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let options = SqliteConnectOptions::from_str(&config.database_url)
            .context("parse DATABASE_URL")?
            .create_if_missing(true)
            .foreign_keys(true);
        let db = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await
            .context("connect to database")?;

        let ai = Arc::new(GeminiClient::new(&config.ai)) as Arc<dyn ReflectionClient>;

        Ok(Self { db, config, ai })
    }

    #[cfg(test)]
    pub fn fake(db: SqlitePool) -> Self {
        use crate::ai::AiError;
        use async_trait::async_trait;

        struct FakeReflection;

        #[async_trait]
        impl ReflectionClient for FakeReflection {
            async fn generate(&self, _prompt: &str) -> Result<String, AiError> {
                Ok(r#"{"analysis":"ok","suggestions":[],"microHabits":[],"motivationalTip":"keep going"}"#.into())
            }
        }

        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            ai: crate::config::AiConfig {
                api_url: "https://fake.local/generate".into(),
                api_key: "test".into(),
            },
        });

        Self {
            db,
            config,
            ai: Arc::new(FakeReflection) as Arc<dyn ReflectionClient>,
        }
    }
}
