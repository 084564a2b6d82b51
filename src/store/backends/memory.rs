use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::declare_store_plugin;
use crate::errors::Result;
use crate::store::KeyValueStore;

declare_store_plugin!("memory", MemoryStore);

/// 容量下限，保证会话相关的键不会被淘汰
pub const MIN_CAPACITY: u64 = 64;

/// 基于 Moka 的进程内存储，进程退出即丢失
///
/// 超出容量时 Moka 会淘汰条目，因此容量不会低于 [`MIN_CAPACITY`]。
pub struct MemoryStore {
    inner: Cache<String, String>,
}

impl MemoryStore {
    pub fn with_capacity(max_capacity: u64) -> Self {
        let max_capacity = if max_capacity < MIN_CAPACITY {
            warn!(
                "Memory store capacity {} is below the minimum, using {}",
                max_capacity, MIN_CAPACITY
            );
            MIN_CAPACITY
        } else {
            max_capacity
        };
        let inner = Cache::builder().max_capacity(max_capacity).build();
        debug!("MemoryStore initialized with max capacity: {}", max_capacity);
        Self { inner }
    }

    pub async fn from_config(config: &StoreConfig) -> Result<Self> {
        Ok(Self::with_capacity(config.memory.max_capacity))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_capacity(1024)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let value = self.inner.get(key).await;
        if value.is_none() {
            debug!("Key not found in memory store: {}", key);
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<()> {
        self.inner.insert(key.to_string(), value).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.invalidate(key).await;
        Ok(())
    }

    async fn clear_prefix(&self, prefix: &str) -> Result<()> {
        let matching: Vec<String> = self
            .inner
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| (*key).clone())
            .collect();
        for key in &matching {
            self.inner.invalidate(key).await;
        }
        debug!("Cleared {} keys with prefix '{}'", matching.len(), prefix);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
