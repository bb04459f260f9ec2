//! 核心数据模型模块
//!
//! 定义日历/日记条目、内容目录、内容情绪统计与聊天记录。

pub mod calendar;
pub mod chat;
pub mod content;
pub mod stats;

pub use calendar::*;
pub use chat::*;
pub use content::*;
pub use stats::*;
