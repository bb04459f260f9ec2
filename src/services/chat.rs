//! 聊天服务
//!
//! 问答直接转发给模型；聊天记录由调用方显式保存。

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::llm::LlmClient;
use crate::llm::prompts::chat_prompt;
use crate::models::ChatRecord;
use crate::storage::repository::ChatStore;

/// 聊天服务
#[derive(Clone)]
pub struct ChatService {
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn ChatStore>,
}

impl ChatService {
    pub fn new(llm: Arc<dyn LlmClient>, store: Arc<dyn ChatStore>) -> Self {
        Self { llm, store }
    }

    /// 向聊天机器人提问
    pub async fn ask(&self, question: &str) -> Result<String> {
        if question.trim().is_empty() {
            return Err(AppError::Validation("question_text is required".to_string()));
        }
        self.llm.invoke(&chat_prompt(question)).await
    }

    /// 保存一轮问答
    pub async fn save(&self, user_id: &str, message: &str, response: &str) -> Result<ChatRecord> {
        if user_id.trim().is_empty() {
            return Err(AppError::Validation("user_id is required".to_string()));
        }
        if message.trim().is_empty() {
            return Err(AppError::Validation("message is required".to_string()));
        }

        let record = ChatRecord::new(message, response);
        self.store.append(user_id, &record).await?;
        tracing::debug!(user_id, "Chat saved");
        Ok(record)
    }

    /// 读取聊天记录（按时间顺序）
    pub async fn history(&self, user_id: &str) -> Result<Vec<ChatRecord>> {
        self.store.history(user_id).await
    }
}
