use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ApiConfig,
    pub store: StoreConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub client_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 后端 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64, // 请求超时 (毫秒)，超时按网络错误处理
    pub user_agent: String,
}

/// 本地存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(rename = "type")]
    pub store_type: String,
    pub key_prefix: String, // 令牌与用户信息键的命名空间
    pub file: FileStoreConfig,
    pub redis: RedisStoreConfig,
    pub memory: MemoryStoreConfig,
}

/// 文件存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStoreConfig {
    pub path: String,
}

/// Redis 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisStoreConfig {
    pub url: String,
    pub key_prefix: String,
}

/// 内存存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStoreConfig {
    pub max_capacity: u64,
}
