//! 存储层模块
//!
//! 定义外部协作方接口（日历、内容目录、情绪统计、聊天记录），
//! 并提供 SurrealDB、Redis 与进程内实现。

#[cfg(feature = "surrealdb")]
pub mod surrealdb;

#[cfg(feature = "surrealdb")]
pub mod surreal_repository;

pub mod factory;
pub mod memory;
pub mod redis_chat;
pub mod repository;

pub use factory::{StorageFactory, Stores};
pub use repository::{CalendarStore, ChatStore, ContentCatalog, EmotionStatsStore};
