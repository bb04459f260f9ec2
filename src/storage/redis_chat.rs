//! Redis 聊天记录存储
//!
//! 每个用户一个列表 `chat:<user_id>`，元素为 JSON 编码的 [`ChatRecord`]。

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;

use crate::config::config::CacheConfig;
use crate::error::Result;
use crate::models::ChatRecord;
use crate::storage::repository::ChatStore;

/// 聊天记录键
pub fn chat_key(user_id: &str) -> String {
    format!("chat:{}", user_id)
}

/// Redis 聊天记录存储
#[derive(Clone)]
pub struct RedisChatStore {
    conn: MultiplexedConnection,
    ttl_seconds: u64,
    max_history: usize,
}

impl RedisChatStore {
    /// 建立连接
    pub async fn connect(config: &CacheConfig) -> Result<Self> {
        let client = redis::Client::open(config.redis_url.as_str())?;
        let conn = client.get_multiplexed_tokio_connection().await?;
        tracing::info!(url = %config.redis_url, "Redis connected");

        Ok(Self {
            conn,
            ttl_seconds: config.chat_ttl_seconds,
            max_history: config.max_history,
        })
    }
}

#[async_trait]
impl ChatStore for RedisChatStore {
    async fn append(&self, user_id: &str, record: &ChatRecord) -> Result<()> {
        let key = chat_key(user_id);
        let payload = serde_json::to_string(record)?;

        let mut pipe = redis::pipe();
        pipe.atomic().rpush(&key, payload).ignore();
        if self.max_history > 0 {
            pipe.ltrim(&key, -(self.max_history as isize), -1).ignore();
        }
        if self.ttl_seconds > 0 {
            pipe.expire(&key, self.ttl_seconds as i64).ignore();
        }

        let mut conn = self.conn.clone();
        let () = pipe.query_async(&mut conn).await?;
        Ok(())
    }

    async fn history(&self, user_id: &str) -> Result<Vec<ChatRecord>> {
        let mut conn = self.conn.clone();
        let raw: Vec<String> = conn.lrange(chat_key(user_id), 0, -1).await?;

        let records = raw
            .iter()
            .filter_map(|item| match serde_json::from_str::<ChatRecord>(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(user_id, "Skipping malformed chat record: {}", e);
                    None
                }
            })
            .collect();
        Ok(records)
    }
}
