//! 内容目录数据模型

use serde::{Deserialize, Serialize};

/// 内容目录中的一条记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// 标题
    pub title: String,

    /// 海报地址
    #[serde(default)]
    pub poster_url: Option<String>,
}

impl ContentRecord {
    pub fn new(title: &str, poster_url: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            poster_url: poster_url.map(str::to_string),
        }
    }
}
