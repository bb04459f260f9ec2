//! 内容情绪统计聚合
//!
//! 记录"某个内容被推荐给某类性格的用户时，用户当天的情绪分布"。
//! 计数通过存储端的原子自增完成；先读到内存、修改后再整体写回的做法
//! 在并发写入时会丢失计数，不能使用。

use std::sync::Arc;

use crate::error::Result;
use crate::models::ContentEmotionStats;
use crate::storage::repository::EmotionStatsStore;

/// 情绪统计聚合器
#[derive(Clone)]
pub struct EmotionStatsAggregator {
    store: Arc<dyn EmotionStatsStore>,
}

impl EmotionStatsAggregator {
    pub fn new(store: Arc<dyn EmotionStatsStore>) -> Self {
        Self { store }
    }

    /// 为 `(title, personality_type)` 下的每个情绪标签计数加一
    ///
    /// 任一参数为空时不做任何事。统计记录不存在时先创建再计数。
    pub async fn add_emotions(
        &self,
        title: &str,
        personality_type: &str,
        emotions: &[String],
    ) -> Result<()> {
        let title = title.trim();
        let personality_type = personality_type.trim();
        if title.is_empty() || personality_type.is_empty() || emotions.is_empty() {
            tracing::debug!(
                title,
                personality_type,
                emotions = emotions.len(),
                "Skipping emotion stats update, missing input"
            );
            return Ok(());
        }

        if self.store.find_or_create(title).await? {
            tracing::info!(title, "Created content emotion stats");
        }

        self.store
            .increment(title, personality_type, emotions)
            .await?;
        tracing::info!(
            title,
            personality_type,
            emotions = ?emotions,
            "Emotion stats updated"
        );
        Ok(())
    }

    /// 读取统计记录
    pub async fn stats_for(&self, title: &str) -> Result<Option<ContentEmotionStats>> {
        self.store.find_by_title(title).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::InMemoryEmotionStatsStore;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_first_call_creates_record() {
        let store = Arc::new(InMemoryEmotionStatsStore::new());
        let aggregator = EmotionStatsAggregator::new(store.clone());

        aggregator
            .add_emotions("Inception", "INTJ", &labels(&["놀람", "설렘"]))
            .await
            .unwrap();

        let stats = aggregator.stats_for("Inception").await.unwrap().unwrap();
        assert_eq!(stats.count("INTJ", "놀람"), 1);
        assert_eq!(stats.count("INTJ", "설렘"), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_counts_accumulate_per_personality_type() {
        let aggregator = EmotionStatsAggregator::new(Arc::new(InMemoryEmotionStatsStore::new()));

        aggregator
            .add_emotions("Inception", "INTJ", &labels(&["기쁨"]))
            .await
            .unwrap();
        aggregator
            .add_emotions("Inception", "INTJ", &labels(&["기쁨", "기쁨"]))
            .await
            .unwrap();
        aggregator
            .add_emotions("Inception", "ENFP", &labels(&["슬픔"]))
            .await
            .unwrap();

        let stats = aggregator.stats_for("Inception").await.unwrap().unwrap();
        assert_eq!(stats.count("INTJ", "기쁨"), 3);
        assert_eq!(stats.count("ENFP", "슬픔"), 1);
        assert_eq!(stats.count("ENFP", "기쁨"), 0);
    }

    #[tokio::test]
    async fn test_missing_inputs_are_noops() {
        let store = Arc::new(InMemoryEmotionStatsStore::new());
        let aggregator = EmotionStatsAggregator::new(store.clone());

        aggregator.add_emotions("Inception", "INTJ", &[]).await.unwrap();
        aggregator
            .add_emotions("", "INTJ", &labels(&["기쁨"]))
            .await
            .unwrap();
        aggregator
            .add_emotions("Inception", "  ", &labels(&["기쁨"]))
            .await
            .unwrap();

        assert!(store.is_empty());
        assert!(aggregator.stats_for("Inception").await.unwrap().is_none());
    }
}
