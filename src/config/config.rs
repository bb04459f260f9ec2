use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::models::ContentRecord;

/// 持久化存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SurrealDB 文档数据库
    #[default]
    SurrealDb,
    /// 进程内存储（开发/测试），重启后数据丢失；
    /// 内容目录只包含 `storage.catalog` 中配置的记录
    Memory,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::SurrealDb => write!(f, "surrealdb"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

/// 聊天记录缓存后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Redis,
    Memory,
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheBackend::Redis => write!(f, "redis"),
            CacheBackend::Memory => write!(f, "memory"),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// 后端类型
    pub backend: StorageBackend,
    /// 内存后端的内容目录初始数据
    pub catalog: Vec<ContentRecord>,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SurrealDB 连接地址
    pub url: String,
    /// 命名空间
    pub namespace: String,
    /// 数据库名称
    pub database: String,
    /// 用户名
    pub username: String,
    /// 密码
    pub password: String,
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// 后端类型
    pub backend: CacheBackend,
    /// Redis 地址
    pub redis_url: String,
    /// 聊天记录过期时间（秒），0 表示不过期
    pub chat_ttl_seconds: u64,
    /// 每个用户保留的最大聊天条数，0 表示不限制
    pub max_history: usize,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 请求超时（秒）
    pub request_timeout: u64,
}

/// 大模型服务配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI 兼容接口地址（不含 /chat/completions）
    pub base_url: String,
    /// 模型名称
    pub model: String,
    /// API 密钥
    pub api_key: String,
    /// 请求超时（秒）
    pub timeout_secs: u64,
    /// 最大生成 token 数
    pub max_tokens: u32,
    /// 采样温度
    pub temperature: f32,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 存储配置
    pub storage: StorageConfig,
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 缓存配置
    pub cache: CacheConfig,
    /// 大模型配置
    pub llm: LlmConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8000,
                request_timeout: 60,
            },
            storage: StorageConfig {
                backend: StorageBackend::SurrealDb,
                catalog: Vec::new(),
            },
            database: DatabaseConfig {
                url: "ws://localhost:8001".into(),
                namespace: "moom".into(),
                database: "momo".into(),
                username: "root".into(),
                password: "root".into(),
            },
            cache: CacheConfig {
                backend: CacheBackend::Redis,
                redis_url: "redis://localhost:6379".into(),
                chat_ttl_seconds: 60 * 60 * 24,
                max_history: 100,
            },
            llm: LlmConfig {
                base_url: "http://localhost:11434/v1".into(),
                model: "llama3.1".into(),
                api_key: String::new(),
                timeout_secs: 60,
                max_tokens: 1024,
                temperature: 0.7,
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            app_name: "moom".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config
    }

    /// 创建完全使用进程内存储的配置（本地调试与测试）
    pub fn in_memory() -> Self {
        let mut config = Self::development();
        config.storage.backend = StorageBackend::Memory;
        config.cache.backend = CacheBackend::Memory;
        config
    }
}
