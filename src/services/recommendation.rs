//! 推荐服务
//!
//! 串联完整流程：读取日历与条目 -> 构造提示词 -> 调用模型 -> 写回条目并更新统计。

use std::sync::Arc;

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::llm::LlmClient;
use crate::llm::prompts::{PromptMode, recommendation_prompt};
use crate::models::{Calendar, ContentEmotionStats, ContentRecord};
use crate::services::content_matcher::ContentMatcher;
use crate::services::emotion_stats::EmotionStatsAggregator;
use crate::services::entry_updater::{EntryUpdater, StatsOutcome};
use crate::storage::Stores;
use crate::storage::repository::CalendarStore;

/// 推荐结果
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationOutcome {
    /// 模型回复原文
    pub raw_response: String,
    /// 推荐内容标题
    pub title: Option<String>,
    /// 平台名
    pub platform: Option<String>,
    /// 统计更新结果
    pub stats: StatsOutcome,
}

/// 已保存的分析结果
#[derive(Debug, Clone, Serialize)]
pub struct StoredResult {
    pub result_emotion: Option<String>,
    pub recommend_content: Option<String>,
}

/// 推荐内容及其目录信息
#[derive(Debug, Clone, Serialize)]
pub struct MatchedContent {
    pub recommend_content: String,
    pub content: ContentRecord,
}

/// 推荐服务
#[derive(Clone)]
pub struct RecommendationService {
    calendars: Arc<dyn CalendarStore>,
    llm: Arc<dyn LlmClient>,
    updater: EntryUpdater,
    matcher: ContentMatcher,
    aggregator: EmotionStatsAggregator,
}

impl RecommendationService {
    pub fn new(stores: &Stores, llm: Arc<dyn LlmClient>) -> Self {
        let aggregator = EmotionStatsAggregator::new(stores.stats.clone());
        Self {
            calendars: stores.calendars.clone(),
            llm,
            updater: EntryUpdater::new(stores.calendars.clone(), aggregator.clone()),
            matcher: ContentMatcher::new(stores.catalog.clone()),
            aggregator,
        }
    }

    async fn load_calendar(&self, user_id: &str) -> Result<Calendar> {
        self.calendars
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Calendar not found for user {}", user_id)))
    }

    /// 生成并保存当天的推荐
    pub async fn recommend(
        &self,
        user_id: &str,
        date: &str,
        mode: PromptMode,
    ) -> Result<RecommendationOutcome> {
        let mut calendar = self.load_calendar(user_id).await?;
        if calendar.entries.is_empty() {
            return Err(AppError::NotFound(format!(
                "No entries found for user {}",
                user_id
            )));
        }

        let entry = calendar
            .entry(date)
            .ok_or_else(|| AppError::NotFound(format!("No entry found for date {}", date)))?;
        let emoticons = entry
            .emoticons
            .as_ref()
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                AppError::Validation("No emoticons data available in the entry".to_string())
            })?;

        let prompt = recommendation_prompt(mode, &calendar, entry, emoticons)?;
        let raw_response = self.llm.invoke(&prompt).await?;

        let applied = self
            .updater
            .apply_model_response(&mut calendar, date, &raw_response)
            .await?;

        let (title, platform) = match applied.recommendation {
            Some(r) => (Some(r.title), Some(r.platform).filter(|p| !p.is_empty())),
            None => (None, None),
        };
        tracing::info!(user_id, date, ?mode, ?title, stats = ?applied.stats, "Recommendation applied");

        Ok(RecommendationOutcome {
            raw_response,
            title,
            platform,
            stats: applied.stats,
        })
    }

    /// 读取已保存的分析结果
    pub async fn stored_result(&self, user_id: &str, date: &str) -> Result<StoredResult> {
        let calendar = self.load_calendar(user_id).await?;
        let entry = calendar.entry(date).ok_or_else(|| {
            AppError::NotFound(format!("No entry found for date {}", date))
        })?;

        Ok(StoredResult {
            result_emotion: entry.result_emotion.clone(),
            recommend_content: entry.recommend_content.clone(),
        })
    }

    /// 按已保存的推荐标题在内容目录中查找
    pub async fn recommended_content(&self, user_id: &str, date: &str) -> Result<MatchedContent> {
        let stored = self.stored_result(user_id, date).await?;
        let title = stored
            .recommend_content
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::NotFound("No recommended content".to_string()))?;

        let content = self
            .matcher
            .find_by_title_prefix(&title)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No matching content: {}", title)))?;

        Ok(MatchedContent {
            recommend_content: title,
            content,
        })
    }

    /// 读取内容情绪统计
    pub async fn content_stats(&self, title: &str) -> Result<ContentEmotionStats> {
        self.aggregator
            .stats_for(title)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No emotion stats for {}", title)))
    }
}
