//! 日历与日记数据模型
//!
//! 每个用户一个日历，按 `YYYY-MM-DD` 日期字符串索引当天的日记条目。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 当天选择的表情数据
///
/// `emotion` 为有序情绪标签；其余字段原样保留，随提示词一起发送给模型。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Emoticons {
    /// 情绪标签（开放词表）
    #[serde(default)]
    pub emotion: Vec<String>,

    /// 其他辅助字段
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Emoticons {
    /// 根据情绪标签创建
    pub fn with_emotions<I, S>(emotions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            emotion: emotions.into_iter().map(Into::into).collect(),
            extra: serde_json::Map::new(),
        }
    }

    /// 是否没有任何数据
    pub fn is_empty(&self) -> bool {
        self.emotion.is_empty() && self.extra.is_empty()
    }

    /// 情绪标签，按原样返回；只跳过全空白的标签
    pub fn emotion_labels(&self) -> Vec<String> {
        self.emotion
            .iter()
            .filter(|e| !e.trim().is_empty())
            .cloned()
            .collect()
    }
}

/// 某一天的日记条目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// 表情数据
    #[serde(default)]
    pub emoticons: Option<Emoticons>,

    /// 日记正文
    #[serde(default)]
    pub diary: Option<String>,

    /// 最近一次模型回复原文
    #[serde(default)]
    pub result_emotion: Option<String>,

    /// 从回复中提取的推荐内容标题
    #[serde(default)]
    pub recommend_content: Option<String>,
}

impl DiaryEntry {
    pub fn new(emoticons: Emoticons, diary: Option<String>) -> Self {
        Self {
            emoticons: Some(emoticons),
            diary,
            result_emotion: None,
            recommend_content: None,
        }
    }

    /// 条目中的情绪标签序列
    pub fn emotions(&self) -> Vec<String> {
        self.emoticons
            .as_ref()
            .map(Emoticons::emotion_labels)
            .unwrap_or_default()
    }
}

/// 用户日历
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    /// 用户 ID（唯一）
    pub user_id: String,

    /// 日期 -> 日记条目
    #[serde(default)]
    pub entries: HashMap<String, DiaryEntry>,

    /// 性格类型标签（MBTI）
    #[serde(default)]
    pub mbti: Option<String>,

    /// 订阅的平台
    #[serde(default)]
    pub subscribe_platform: Option<String>,
}

impl Calendar {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            ..Default::default()
        }
    }

    pub fn with_mbti(mut self, mbti: &str) -> Self {
        self.mbti = Some(mbti.to_string());
        self
    }

    pub fn with_subscribe_platform(mut self, platform: &str) -> Self {
        self.subscribe_platform = Some(platform.to_string());
        self
    }

    pub fn with_entry(mut self, date: &str, entry: DiaryEntry) -> Self {
        self.entries.insert(date.to_string(), entry);
        self
    }

    /// 获取指定日期的条目
    pub fn entry(&self, date: &str) -> Option<&DiaryEntry> {
        self.entries.get(date)
    }

    /// 写入（覆盖）指定日期的条目
    pub fn set_entry(&mut self, date: &str, entry: DiaryEntry) {
        self.entries.insert(date.to_string(), entry);
    }

    /// 非空白的性格类型标签
    pub fn personality_type(&self) -> Option<&str> {
        self.mbti.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}
