//! 日记条目更新
//!
//! 把模型回复写回日记条目，并在条件满足时更新内容情绪统计。
//! 条目写入是主要结果；统计更新失败只记录日志，不影响已写入的条目。

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Calendar, DiaryEntry};
use crate::services::emotion_stats::EmotionStatsAggregator;
use crate::services::response_parser::{Recommendation, parse_recommendation};
use crate::storage::repository::CalendarStore;

/// 统计更新结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsOutcome {
    /// 已更新
    Recorded,
    /// 缺少标题、性格类型或情绪标签
    Skipped,
    /// 更新失败（已记录日志）
    Failed,
}

/// 一次模型回复的处理结果
#[derive(Debug, Clone)]
pub struct AppliedResponse {
    /// 更新后的条目
    pub entry: DiaryEntry,
    /// 解析出的推荐（含平台名）
    pub recommendation: Option<Recommendation>,
    /// 统计更新结果
    pub stats: StatsOutcome,
}

/// 条目更新器
#[derive(Clone)]
pub struct EntryUpdater {
    calendars: Arc<dyn CalendarStore>,
    aggregator: EmotionStatsAggregator,
}

impl EntryUpdater {
    pub fn new(calendars: Arc<dyn CalendarStore>, aggregator: EmotionStatsAggregator) -> Self {
        Self {
            calendars,
            aggregator,
        }
    }

    /// 将模型回复写入 `calendar` 中 `date` 对应的条目并保存日历
    ///
    /// 回复原文总是写入 `result_emotion`；解析不到推荐时 `recommend_content` 置空。
    /// 日历保存失败会返回错误，统计更新失败不会。
    pub async fn apply_model_response(
        &self,
        calendar: &mut Calendar,
        date: &str,
        raw_response: &str,
    ) -> Result<AppliedResponse> {
        let recommendation = parse_recommendation(raw_response);
        let title = recommendation.as_ref().map(|r| r.title.clone());

        let mut entry = calendar
            .entry(date)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No entry found for date {}", date)))?;
        entry.result_emotion = Some(raw_response.to_string());
        entry.recommend_content = title.clone();

        calendar.set_entry(date, entry.clone());
        self.calendars.save(calendar).await?;

        let stats = self
            .record_stats(title.as_deref(), calendar.personality_type(), &entry)
            .await;

        Ok(AppliedResponse {
            entry,
            recommendation,
            stats,
        })
    }

    async fn record_stats(
        &self,
        title: Option<&str>,
        personality_type: Option<&str>,
        entry: &DiaryEntry,
    ) -> StatsOutcome {
        let (Some(title), Some(personality_type)) = (title, personality_type) else {
            tracing::debug!(?title, ?personality_type, "Stats preconditions not met");
            return StatsOutcome::Skipped;
        };

        let emotions = entry.emotions();
        if emotions.is_empty() {
            tracing::debug!(title, "Entry has no emotion labels, skipping stats");
            return StatsOutcome::Skipped;
        }

        match self
            .aggregator
            .add_emotions(title, personality_type, &emotions)
            .await
        {
            Ok(()) => StatsOutcome::Recorded,
            Err(e) => {
                tracing::warn!(title, personality_type, "Failed to update emotion stats: {}", e);
                StatsOutcome::Failed
            }
        }
    }
}
