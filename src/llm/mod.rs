//! 大模型调用模块
//!
//! 对外只约定"输入提示词，返回自由文本"，具体服务由 [`client`] 提供。

pub mod client;
pub mod prompts;

use async_trait::async_trait;

use crate::error::Result;

pub use client::HttpLlmClient;

/// 大模型客户端
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// 发送提示词并返回模型的原始文本回复
    async fn invoke(&self, prompt: &str) -> Result<String>;
}
