//! 存储工厂模块
//!
//! 根据配置创建相应的存储实例。

use std::sync::Arc;

use crate::config::config::{AppConfig, CacheBackend, CacheConfig, DatabaseConfig, StorageBackend};
use crate::error::{AppError, Result};
use crate::models::ContentRecord;
use crate::storage::memory::{
    InMemoryCalendarStore, InMemoryChatStore, InMemoryContentCatalog, InMemoryEmotionStatsStore,
};
use crate::storage::redis_chat::RedisChatStore;
use crate::storage::repository::{CalendarStore, ChatStore, ContentCatalog, EmotionStatsStore};

#[cfg(feature = "surrealdb")]
use crate::storage::surreal_repository::{
    SurrealCalendarStore, SurrealContentCatalog, SurrealEmotionStatsStore,
};
#[cfg(feature = "surrealdb")]
use crate::storage::surrealdb;

/// 持久化存储集合
#[derive(Clone)]
pub struct Stores {
    pub calendars: Arc<dyn CalendarStore>,
    pub catalog: Arc<dyn ContentCatalog>,
    pub stats: Arc<dyn EmotionStatsStore>,
}

impl Stores {
    /// 全部使用进程内实现，内容目录预置 `catalog`
    pub fn in_memory_with_catalog(catalog: Vec<ContentRecord>) -> Self {
        Self {
            calendars: Arc::new(InMemoryCalendarStore::new()),
            catalog: Arc::new(InMemoryContentCatalog::from_records(catalog)),
            stats: Arc::new(InMemoryEmotionStatsStore::new()),
        }
    }
}

/// 存储工厂
pub struct StorageFactory;

impl StorageFactory {
    /// 根据配置创建持久化存储
    pub async fn create(config: &AppConfig) -> Result<Stores> {
        match config.storage.backend {
            StorageBackend::Memory => {
                tracing::warn!(
                    catalog = config.storage.catalog.len(),
                    "Using in-memory storage, data is lost on restart"
                );
                Ok(Stores::in_memory_with_catalog(config.storage.catalog.clone()))
            }
            StorageBackend::SurrealDb => Self::create_surrealdb(&config.database).await,
        }
    }

    #[cfg(feature = "surrealdb")]
    async fn create_surrealdb(config: &DatabaseConfig) -> Result<Stores> {
        let db = surrealdb::connect(config).await?;
        Ok(Stores {
            calendars: Arc::new(SurrealCalendarStore::new(db.clone())),
            catalog: Arc::new(SurrealContentCatalog::new(db.clone())),
            stats: Arc::new(SurrealEmotionStatsStore::new(db)),
        })
    }

    #[cfg(not(feature = "surrealdb"))]
    async fn create_surrealdb(_config: &DatabaseConfig) -> Result<Stores> {
        Err(AppError::Config(
            "SurrealDB feature is not enabled. Enable 'surrealdb' feature or use the memory backend."
                .into(),
        ))
    }

    /// 根据配置创建聊天记录存储
    pub async fn create_chat_store(config: &CacheConfig) -> Result<Arc<dyn ChatStore>> {
        match config.backend {
            CacheBackend::Memory => Ok(Arc::new(InMemoryChatStore::new(config.max_history))),
            CacheBackend::Redis => {
                let store = RedisChatStore::connect(config)
                    .await
                    .map_err(|e| AppError::Cache(format!("Redis unavailable: {}", e)))?;
                Ok(Arc::new(store))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backends() {
        let config = AppConfig::in_memory();
        let stores = StorageFactory::create(&config).await.unwrap();
        assert!(stores.calendars.find_by_user_id("nobody").await.unwrap().is_none());

        let chat = StorageFactory::create_chat_store(&config.cache).await.unwrap();
        assert!(chat.history("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_catalog_is_seeded_from_config() {
        let mut config = AppConfig::in_memory();
        config.storage.catalog = vec![ContentRecord::new(
            "Inception (2010)",
            Some("https://img.example/inception.jpg"),
        )];

        let stores = StorageFactory::create(&config).await.unwrap();
        let found = stores
            .catalog
            .find_first_by_title_prefix("Incep")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.title, "Inception (2010)");
    }
}
