//! 聊天记录模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 一轮问答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    /// 用户消息
    pub message: String,
    /// 机器人回复
    pub response: String,
    /// 记录时间
    pub created_at: DateTime<Utc>,
}

impl ChatRecord {
    pub fn new(message: &str, response: &str) -> Self {
        Self {
            message: message.to_string(),
            response: response.to_string(),
            created_at: Utc::now(),
        }
    }
}
