//! 推荐 DTO

use serde::{Deserialize, Serialize};

use crate::models::ContentRecord;
use crate::services::entry_updater::StatsOutcome;
use crate::services::recommendation::{MatchedContent, RecommendationOutcome, StoredResult};

/// 生成推荐响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    /// 模型回复原文
    #[serde(rename = "bedrock_response")]
    pub model_response: String,
    /// 推荐内容标题
    pub recommended_content: Option<String>,
    /// 平台名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// 统计更新结果
    pub stats: StatsOutcome,
}

impl From<RecommendationOutcome> for RecommendResponse {
    fn from(outcome: RecommendationOutcome) -> Self {
        Self {
            model_response: outcome.raw_response,
            recommended_content: outcome.title,
            platform: outcome.platform,
            stats: outcome.stats,
        }
    }
}

/// 已保存分析结果响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResultResponse {
    pub result_emotion: Option<String>,
    pub recommend_content: Option<String>,
}

impl From<StoredResult> for StoredResultResponse {
    fn from(result: StoredResult) -> Self {
        Self {
            result_emotion: result.result_emotion,
            recommend_content: result.recommend_content,
        }
    }
}

/// 内容信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentInfo {
    pub title: String,
    pub poster_url: Option<String>,
}

impl From<ContentRecord> for ContentInfo {
    fn from(record: ContentRecord) -> Self {
        Self {
            title: record.title,
            poster_url: record.poster_url,
        }
    }
}

/// 推荐内容响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendContentResponse {
    pub recommend_content: String,
    pub content_info: ContentInfo,
}

impl From<MatchedContent> for RecommendContentResponse {
    fn from(matched: MatchedContent) -> Self {
        Self {
            recommend_content: matched.recommend_content,
            content_info: matched.content.into(),
        }
    }
}
