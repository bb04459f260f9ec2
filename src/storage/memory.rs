//! 进程内存储实现
//!
//! 用于本地调试与测试。计数更新在 DashMap 的分片写锁内完成，
//! 同一进程内的并发调用不会丢失计数。

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{Calendar, ChatRecord, ContentEmotionStats, ContentRecord};
use crate::storage::repository::{CalendarStore, ChatStore, ContentCatalog, EmotionStatsStore};

/// 内存日历仓储
#[derive(Default)]
pub struct InMemoryCalendarStore {
    calendars: DashMap<String, Calendar>,
}

impl InMemoryCalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接写入日历（用于预置数据）
    pub fn insert(&self, calendar: Calendar) {
        self.calendars.insert(calendar.user_id.clone(), calendar);
    }
}

#[async_trait]
impl CalendarStore for InMemoryCalendarStore {
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Calendar>> {
        Ok(self.calendars.get(user_id).map(|c| c.value().clone()))
    }

    async fn save(&self, calendar: &Calendar) -> Result<()> {
        self.calendars
            .insert(calendar.user_id.clone(), calendar.clone());
        Ok(())
    }
}

/// 内存内容目录，保持给定顺序
pub struct InMemoryContentCatalog {
    records: RwLock<Vec<ContentRecord>>,
}

impl InMemoryContentCatalog {
    pub fn from_records(records: Vec<ContentRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl ContentCatalog for InMemoryContentCatalog {
    async fn find_first_by_title_prefix(&self, prefix: &str) -> Result<Option<ContentRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.title.starts_with(prefix)).cloned())
    }
}

/// 内存情绪统计仓储
#[derive(Default)]
pub struct InMemoryEmotionStatsStore {
    stats: DashMap<String, ContentEmotionStats>,
}

impl InMemoryEmotionStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前记录数
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

#[async_trait]
impl EmotionStatsStore for InMemoryEmotionStatsStore {
    async fn find_or_create(&self, title: &str) -> Result<bool> {
        match self.stats.entry(title.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(ContentEmotionStats::new(title));
                Ok(true)
            }
        }
    }

    async fn increment(
        &self,
        title: &str,
        personality_type: &str,
        emotions: &[String],
    ) -> Result<()> {
        // 持有分片写锁直到全部计数写完
        let mut record = self
            .stats
            .entry(title.to_string())
            .or_insert_with(|| ContentEmotionStats::new(title));
        for emotion in emotions {
            record.increment(personality_type, emotion);
        }
        Ok(())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<ContentEmotionStats>> {
        Ok(self.stats.get(title).map(|s| s.value().clone()))
    }
}

/// 内存聊天记录存储
#[derive(Default)]
pub struct InMemoryChatStore {
    chats: DashMap<String, Vec<ChatRecord>>,
    max_history: usize,
}

impl InMemoryChatStore {
    /// `max_history` 为 0 时不限制条数
    pub fn new(max_history: usize) -> Self {
        Self {
            chats: DashMap::new(),
            max_history,
        }
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn append(&self, user_id: &str, record: &ChatRecord) -> Result<()> {
        let mut history = self.chats.entry(user_id.to_string()).or_default();
        history.push(record.clone());
        if self.max_history > 0 && history.len() > self.max_history {
            let overflow = history.len() - self.max_history;
            history.drain(..overflow);
        }
        Ok(())
    }

    async fn history(&self, user_id: &str) -> Result<Vec<ChatRecord>> {
        Ok(self
            .chats
            .get(user_id)
            .map(|h| h.value().clone())
            .unwrap_or_default())
    }
}
