//! 聊天 DTO

use serde::{Deserialize, Serialize};

use crate::models::ChatRecord;

/// 提问请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub question_text: String,
}

/// 提问响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub response: String,
}

/// 保存聊天请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveChatRequest {
    pub user_id: String,
    pub message: String,
    pub response: String,
}

/// 通用消息响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// 聊天记录响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistoryResponse {
    pub chat_history: Vec<ChatRecord>,
}
