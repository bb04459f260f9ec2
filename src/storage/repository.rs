use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Calendar, ChatRecord, ContentEmotionStats, ContentRecord};

/// 日历仓储 trait
///
/// 以整个日历文档为单位读写。
#[async_trait]
pub trait CalendarStore: Send + Sync {
    /// 根据用户 ID 获取日历
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Calendar>>;

    /// 保存（整体覆盖）日历
    async fn save(&self, calendar: &Calendar) -> Result<()>;
}

/// 内容目录 trait
#[async_trait]
pub trait ContentCatalog: Send + Sync {
    /// 按目录遍历顺序返回第一条标题以 `prefix` 开头的记录（区分大小写，按字面匹配）
    async fn find_first_by_title_prefix(&self, prefix: &str) -> Result<Option<ContentRecord>>;
}

/// 内容情绪统计仓储 trait
///
/// `increment` 必须由存储端原子地完成，同一标题的并发调用不能丢失计数。
#[async_trait]
pub trait EmotionStatsStore: Send + Sync {
    /// 确保标题对应的统计记录存在，返回是否为本次新建
    async fn find_or_create(&self, title: &str) -> Result<bool>;

    /// 对 `(personality_type, emotion)` 的每个计数原子地加一
    async fn increment(&self, title: &str, personality_type: &str, emotions: &[String])
    -> Result<()>;

    /// 读取统计记录
    async fn find_by_title(&self, title: &str) -> Result<Option<ContentEmotionStats>>;
}

/// 聊天记录存储 trait
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// 追加一条记录
    async fn append(&self, user_id: &str, record: &ChatRecord) -> Result<()>;

    /// 按时间顺序返回全部记录
    async fn history(&self, user_id: &str) -> Result<Vec<ChatRecord>>;
}
