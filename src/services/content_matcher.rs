//! 内容匹配服务
//!
//! 模型给出的标题常被截断或带有后缀（如 "Inception (2010)"），
//! 因此按前缀匹配目录标题，返回目录遍历顺序中的第一条。
//! 多个标题共享同一前缀时（"Inception" 与 "Inception 2"）结果取决于目录顺序。

use std::sync::Arc;

use crate::error::Result;
use crate::models::ContentRecord;
use crate::storage::repository::ContentCatalog;

/// 内容匹配器
#[derive(Clone)]
pub struct ContentMatcher {
    catalog: Arc<dyn ContentCatalog>,
}

impl ContentMatcher {
    pub fn new(catalog: Arc<dyn ContentCatalog>) -> Self {
        Self { catalog }
    }

    /// 查找标题以 `title` 开头的第一条目录记录（区分大小写）
    pub async fn find_by_title_prefix(&self, title: &str) -> Result<Option<ContentRecord>> {
        // 空前缀会匹配任意记录
        if title.is_empty() {
            return Ok(None);
        }

        let found = self.catalog.find_first_by_title_prefix(title).await?;
        match &found {
            Some(record) => tracing::debug!(title, matched = %record.title, "Catalog prefix match"),
            None => tracing::debug!(title, "No catalog record matches prefix"),
        }
        Ok(found)
    }
}
