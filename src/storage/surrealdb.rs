//! SurrealDB 连接

use crate::config::config::DatabaseConfig;
use crate::error::Result;
use surrealdb::{
    Surreal,
    engine::any::{self, Any},
    opt::auth::Root,
};

/// 建立连接并选择命名空间与数据库
///
/// `username` 为空时跳过登录（嵌入式 `mem://` 库没有 root 用户）。
pub async fn connect(config: &DatabaseConfig) -> Result<Surreal<Any>> {
    let db: Surreal<Any> = any::connect(&config.url).await?;

    if !config.username.is_empty() {
        db.signin(Root {
            username: &config.username,
            password: &config.password,
        })
        .await?;
    }

    db.use_ns(&config.namespace)
        .use_db(&config.database)
        .await?;

    tracing::info!(url = %config.url, namespace = %config.namespace, database = %config.database, "SurrealDB connected");
    Ok(db)
}
