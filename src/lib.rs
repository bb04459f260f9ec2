//! Moom - 情绪日记内容推荐服务
//!
//! 根据用户当天的日记和情绪标签调用大语言模型生成推荐，
//! 将结果写回日记条目，并按性格类型累计每部内容的情绪统计。

pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;
