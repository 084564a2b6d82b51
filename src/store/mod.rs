//! 本地键值存储
//!
//! 对应各端的本地存储原语（浏览器 localStorage、小程序 Storage、移动端 AsyncStorage），
//! 在这里统一为 [`KeyValueStore`] trait，由 [`LocalStore`] 负责键命名空间与 JSON 序列化。
//!
//! 只假设单写者；同一个键上的并发写入以最后一次为准。

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::Result;

pub mod backends;
pub mod register;

pub use backends::file::FileStore;
pub use backends::memory::MemoryStore;
pub use backends::redis::RedisStore;

/// 持久化的键名（不含前缀）
pub mod keys {
    pub const ACCESS_TOKEN: &str = "accessToken";
    pub const REFRESH_TOKEN: &str = "refreshToken";
    pub const USER_INFO: &str = "userInfo";
}

/// 平台存储原语：按键读写字符串
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// 读取原始字符串，键不存在时返回 `Ok(None)`
    async fn get_raw(&self, key: &str) -> Result<Option<String>>;

    async fn set_raw(&self, key: &str, value: String) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;

    /// 删除所有以 `prefix` 开头的键
    async fn clear_prefix(&self, prefix: &str) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

/// 带命名空间的存储门面
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl LocalStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    /// 进程内存储，不跨进程保留
    pub fn in_memory(prefix: impl Into<String>) -> Self {
        Self::new(Arc::new(MemoryStore::with_capacity(1024)), prefix)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// 以 JSON 形式保存任意可序列化的值
    pub async fn set_value<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.backend.set_raw(&self.namespaced(key), json).await
    }

    /// 读取 JSON 值；键不存在、读取失败或反序列化失败均返回 `None`
    pub async fn get_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_string(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Stored value for '{}' is not valid JSON: {}", key, e);
                None
            }
        }
    }

    /// 原样保存字符串，不做 JSON 编码
    pub async fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.backend
            .set_raw(&self.namespaced(key), value.to_string())
            .await
    }

    pub async fn get_string(&self, key: &str) -> Option<String> {
        match self.backend.get_raw(&self.namespaced(key)).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read '{}' from {} store: {}", key, self.backend_name(), e);
                None
            }
        }
    }

    pub async fn remove_value(&self, key: &str) -> Result<()> {
        debug!("Removing '{}' from {} store", key, self.backend_name());
        self.backend.remove(&self.namespaced(key)).await
    }

    /// 只清除本命名空间下的键，同一后端上其他前缀的数据不受影响
    pub async fn clear_all(&self) -> Result<()> {
        self.backend.clear_prefix(&self.prefix).await
    }
}
