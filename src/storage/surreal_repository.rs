//! SurrealDB 仓储实现
//!
//! - `calendar`：记录 ID 即用户 ID，保证每个用户只有一个日历
//! - `contents`：内容目录，只读
//! - `content_emotion_stats`：每个标题一条统计头记录，首次统计时创建
//! - `emotion_count`：每个 `(标题, 性格类型, 情绪)` 一条计数记录，
//!   通过 `UPSERT ... SET count += 1` 在存储端原子自增

use std::collections::hash_map::RandomState;
use std::future::Future;
use std::hash::BuildHasher;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use surrealdb::{Surreal, engine::any::Any};

use crate::error::{AppError, Result};
use crate::models::{Calendar, ContentEmotionStats, ContentRecord};
use crate::storage::repository::{CalendarStore, ContentCatalog, EmotionStatsStore};

/// 事务冲突时的最大尝试次数
const MAX_CONFLICT_ATTEMPTS: u32 = 32;

/// 冲突重试的基础等待时间，按尝试次数线性增长，上限为 `MAX_CONFLICT_BACKOFF`
const CONFLICT_BACKOFF: Duration = Duration::from_millis(5);
const MAX_CONFLICT_BACKOFF: Duration = Duration::from_millis(100);

const CREATE_HEADER_QUERY: &str = "
    CREATE type::thing('content_emotion_stats', $title)
        SET title = $title, created_at = time::now()
";

// 只写计数记录，统计头记录由 find_or_create 创建
const INCREMENT_QUERY: &str = "
    BEGIN TRANSACTION;
    FOR $emotion IN $emotions {
        UPSERT type::thing('emotion_count', [$title, $personality_type, $emotion])
            SET title = $title,
                personality_type = $personality_type,
                emotion = $emotion,
                count += 1;
    };
    COMMIT TRANSACTION;
";

/// 日历仓储实现
#[derive(Clone)]
pub struct SurrealCalendarStore {
    db: Surreal<Any>,
}

impl SurrealCalendarStore {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CalendarStore for SurrealCalendarStore {
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Calendar>> {
        let query = "
            SELECT user_id, entries, mbti, subscribe_platform
            FROM type::thing('calendar', $user_id)
        ";
        let result: Vec<Calendar> = self
            .db
            .query(query)
            .bind(("user_id", user_id.to_string()))
            .await?
            .take(0)?;
        Ok(result.into_iter().next())
    }

    async fn save(&self, calendar: &Calendar) -> Result<()> {
        self.db
            .query("UPSERT type::thing('calendar', $user_id) CONTENT $calendar")
            .bind(("user_id", calendar.user_id.clone()))
            .bind(("calendar", calendar.clone()))
            .await?
            .check()?;
        Ok(())
    }
}

/// 内容目录实现
#[derive(Clone)]
pub struct SurrealContentCatalog {
    db: Surreal<Any>,
}

impl SurrealContentCatalog {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentCatalog for SurrealContentCatalog {
    async fn find_first_by_title_prefix(&self, prefix: &str) -> Result<Option<ContentRecord>> {
        // string::starts_with 按字面匹配，无需正则转义
        let query = "
            SELECT id, title, poster_url FROM contents
            WHERE string::starts_with(title, $prefix)
            ORDER BY id
            LIMIT 1
        ";
        let result: Vec<ContentRecord> = self
            .db
            .query(query)
            .bind(("prefix", prefix.to_string()))
            .await?
            .take(0)?;
        Ok(result.into_iter().next())
    }
}

#[derive(Debug, Deserialize)]
struct CounterRow {
    personality_type: String,
    emotion: String,
    count: u64,
}

/// 情绪统计仓储实现
#[derive(Clone)]
pub struct SurrealEmotionStatsStore {
    db: Surreal<Any>,
}

impl SurrealEmotionStatsStore {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    async fn exists(&self, title: &str) -> Result<bool> {
        let titles: Vec<String> = self
            .db
            .query("SELECT VALUE title FROM type::thing('content_emotion_stats', $title)")
            .bind(("title", title.to_string()))
            .await?
            .take(0)?;
        Ok(!titles.is_empty())
    }

    async fn create_header(&self, title: &str) -> Result<bool> {
        if self.exists(title).await? {
            return Ok(false);
        }

        let created: Result<()> = async {
            self.db
                .query(CREATE_HEADER_QUERY)
                .bind(("title", title.to_string()))
                .await?
                .check()?;
            Ok(())
        }
        .await;

        match created {
            Ok(()) => Ok(true),
            // 并发调用抢先创建了同一条记录
            Err(err) if is_already_exists(&err) => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn run_increment(
        &self,
        title: &str,
        personality_type: &str,
        emotions: &[String],
    ) -> Result<()> {
        self.db
            .query(INCREMENT_QUERY)
            .bind(("title", title.to_string()))
            .bind(("personality_type", personality_type.to_string()))
            .bind(("emotions", emotions.to_vec()))
            .await?
            .check()?;
        Ok(())
    }
}

/// 乐观事务冲突：事务未生效，可整体重试
fn is_retryable_conflict(err: &AppError) -> bool {
    match err {
        AppError::Database(msg) => msg.contains("can be retried") || msg.contains("conflict"),
        _ => false,
    }
}

fn is_already_exists(err: &AppError) -> bool {
    matches!(err, AppError::Database(msg) if msg.contains("already exists"))
}

/// 冲突后的等待时间，线性增长并叠加随机抖动
fn conflict_backoff(attempt: u32) -> Duration {
    let base = (CONFLICT_BACKOFF * attempt).min(MAX_CONFLICT_BACKOFF);
    let jitter_ms = RandomState::new().hash_one(attempt) % (CONFLICT_BACKOFF.as_millis() as u64 * 2);
    base + Duration::from_millis(jitter_ms)
}

/// 只在事务整体未生效时重试，已提交的写入不会被重复执行
async fn retry_on_conflict<T, F, Fut>(title: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Err(err) if attempt < MAX_CONFLICT_ATTEMPTS && is_retryable_conflict(&err) => {
                tracing::debug!(title, attempt, "emotion stats write conflicted, retrying");
                tokio::time::sleep(conflict_backoff(attempt)).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

#[async_trait]
impl EmotionStatsStore for SurrealEmotionStatsStore {
    async fn find_or_create(&self, title: &str) -> Result<bool> {
        retry_on_conflict(title, move || self.create_header(title)).await
    }

    async fn increment(
        &self,
        title: &str,
        personality_type: &str,
        emotions: &[String],
    ) -> Result<()> {
        retry_on_conflict(title, move || {
            self.run_increment(title, personality_type, emotions)
        })
        .await
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<ContentEmotionStats>> {
        let rows: Vec<CounterRow> = self
            .db
            .query("SELECT personality_type, emotion, count FROM emotion_count WHERE title = $title")
            .bind(("title", title.to_string()))
            .await?
            .take(0)?;

        if rows.is_empty() && !self.exists(title).await? {
            return Ok(None);
        }

        let mut stats = ContentEmotionStats::new(title);
        for row in rows {
            stats
                .personality_emotions
                .entry(row.personality_type)
                .or_default()
                .insert(row.emotion, row.count);
        }
        Ok(Some(stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::DatabaseConfig;
    use crate::services::emotion_stats::EmotionStatsAggregator;
    use crate::storage::surrealdb::connect;
    use std::sync::Arc;

    async fn memory_db() -> Surreal<Any> {
        connect(&DatabaseConfig {
            url: "mem://".into(),
            namespace: "moom".into(),
            database: "test".into(),
            ..Default::default()
        })
        .await
        .unwrap()
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_conflict_detection() {
        let conflict = AppError::Database(
            "Failed to commit transaction due to a read or write conflict. This transaction can be retried"
                .to_string(),
        );
        assert!(is_retryable_conflict(&conflict));
        assert!(!is_retryable_conflict(&AppError::Database("syntax error".into())));
        assert!(!is_retryable_conflict(&AppError::Cache("conflict".into())));
        assert!(is_already_exists(&AppError::Database(
            "Database record `content_emotion_stats:⟨Inception⟩` already exists".into()
        )));
    }

    #[tokio::test]
    async fn test_counts_start_at_one_and_group_by_personality_type() {
        let store = SurrealEmotionStatsStore::new(memory_db().await);

        assert!(store.find_by_title("Inception").await.unwrap().is_none());
        assert!(store.find_or_create("Inception").await.unwrap());
        assert!(!store.find_or_create("Inception").await.unwrap());

        store
            .increment("Inception", "ENTP", &labels(&["기쁨", "기쁨"]))
            .await
            .unwrap();
        store
            .increment("Inception", "INFP", &labels(&["설렘"]))
            .await
            .unwrap();
        store
            .increment("Inception", "ENTP", &labels(&["놀람"]))
            .await
            .unwrap();

        let stats = store.find_by_title("Inception").await.unwrap().unwrap();
        assert_eq!(stats.title, "Inception");
        assert_eq!(stats.count("ENTP", "기쁨"), 2);
        assert_eq!(stats.count("ENTP", "놀람"), 1);
        assert_eq!(stats.count("INFP", "설렘"), 1);
        assert_eq!(stats.total_for("ENTP"), 3);
        assert_eq!(stats.total(), 4);
    }

    #[tokio::test]
    async fn test_increment_without_header_still_creates_record() {
        let store = SurrealEmotionStatsStore::new(memory_db().await);
        store
            .increment("Parasite", "ISTJ", &labels(&["슬픔"]))
            .await
            .unwrap();

        let stats = store.find_by_title("Parasite").await.unwrap().unwrap();
        assert_eq!(stats.count("ISTJ", "슬픔"), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_add_emotions_are_not_lost() {
        let store = Arc::new(SurrealEmotionStatsStore::new(memory_db().await));
        let aggregator = EmotionStatsAggregator::new(store.clone());

        let mut handles = Vec::new();
        for i in 0..24 {
            let aggregator = aggregator.clone();
            handles.push(tokio::spawn(async move {
                let emotions = vec!["공통".to_string(), format!("감정{i}")];
                aggregator.add_emotions("Inception", "INTJ", &emotions).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stats = store.find_by_title("Inception").await.unwrap().unwrap();
        assert_eq!(stats.count("INTJ", "공통"), 24);
        assert_eq!(stats.count("INTJ", "감정3"), 1);
        assert_eq!(stats.total(), 48);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_find_or_create_creates_once() {
        let store = Arc::new(SurrealEmotionStatsStore::new(memory_db().await));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move { store.find_or_create("Parasite").await }));
        }
        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        let stats = store.find_by_title("Parasite").await.unwrap().unwrap();
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn test_conflict_backoff_is_bounded() {
        for attempt in 1..MAX_CONFLICT_ATTEMPTS {
            let wait = conflict_backoff(attempt);
            assert!(wait >= CONFLICT_BACKOFF);
            assert!(wait < MAX_CONFLICT_BACKOFF + CONFLICT_BACKOFF * 2);
        }
    }

    #[tokio::test]
    async fn test_catalog_prefix_returns_first_by_record_id() {
        let db = memory_db().await;
        for (id, title) in [("a", "Inception"), ("b", "Inception 2"), ("c", "Interstellar")] {
            db.query("CREATE type::thing('contents', $id) SET title = $title, poster_url = NONE")
                .bind(("id", id))
                .bind(("title", title))
                .await
                .unwrap()
                .check()
                .unwrap();
        }
        let catalog = SurrealContentCatalog::new(db);

        let found = catalog.find_first_by_title_prefix("Incep").await.unwrap().unwrap();
        assert_eq!(found.title, "Inception");
        assert_eq!(found.poster_url, None);

        let found = catalog
            .find_first_by_title_prefix("Inception 2")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.title, "Inception 2");
        assert!(catalog.find_first_by_title_prefix("incep").await.unwrap().is_none());
    }
}
