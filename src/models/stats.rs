//! 内容情绪统计模型
//!
//! 每个标题一条记录，按性格类型记录各情绪标签出现的次数。计数只增不减。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 情绪标签 -> 次数
pub type EmotionCounts = HashMap<String, u64>;

/// 某个推荐内容的情绪统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentEmotionStats {
    /// 内容标题（唯一）
    pub title: String,

    /// 性格类型 -> 情绪计数
    #[serde(default)]
    pub personality_emotions: HashMap<String, EmotionCounts>,
}

impl ContentEmotionStats {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            personality_emotions: HashMap::new(),
        }
    }

    /// 将某个性格类型下的情绪计数加一，首次出现的标签从 0 开始
    pub fn increment(&mut self, personality_type: &str, emotion: &str) {
        *self
            .personality_emotions
            .entry(personality_type.to_string())
            .or_default()
            .entry(emotion.to_string())
            .or_insert(0) += 1;
    }

    /// 读取计数，不存在时为 0
    pub fn count(&self, personality_type: &str, emotion: &str) -> u64 {
        self.personality_emotions
            .get(personality_type)
            .and_then(|counts| counts.get(emotion))
            .copied()
            .unwrap_or(0)
    }

    /// 某个性格类型下的总次数
    pub fn total_for(&self, personality_type: &str) -> u64 {
        self.personality_emotions
            .get(personality_type)
            .map(|counts| counts.values().sum())
            .unwrap_or(0)
    }

    /// 所有计数之和
    pub fn total(&self) -> u64 {
        self.personality_emotions
            .values()
            .flat_map(|counts| counts.values())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_creates_open_vocabulary_counters() {
        let mut stats = ContentEmotionStats::new("Inception");
        stats.increment("INTJ", "놀람");
        stats.increment("INTJ", "놀람");
        stats.increment("INTJ", "wistful");
        stats.increment("ENFP", "기쁨");

        assert_eq!(stats.count("INTJ", "놀람"), 2);
        assert_eq!(stats.count("INTJ", "wistful"), 1);
        assert_eq!(stats.count("ENFP", "놀람"), 0);
        assert_eq!(stats.total_for("INTJ"), 3);
        assert_eq!(stats.total(), 4);
    }

    #[test]
    fn test_new_stats_are_empty() {
        let stats = ContentEmotionStats::new("Inception");
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.total_for("INTJ"), 0);
    }
}
