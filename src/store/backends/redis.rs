use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error};

use crate::config::StoreConfig;
use crate::declare_store_plugin;
use crate::errors::{ClientError, Result};
use crate::store::KeyValueStore;

declare_store_plugin!("redis", RedisStore);

/// Redis 存储，多个客户端进程可共享同一会话
///
/// 令牌不设置过期时间，过期由服务端的 401 响应发现。
pub struct RedisStore {
    client: redis::Client,
    key_prefix: String,
}

impl RedisStore {
    pub async fn from_config(config: &StoreConfig) -> Result<Self> {
        let redis_config = &config.redis;

        let client = redis::Client::open(redis_config.url.clone()).map_err(|e| {
            ClientError::configuration(format!("Invalid Redis URL '{}': {e}", redis_config.url))
        })?;

        let store = Self {
            client,
            key_prefix: redis_config.key_prefix.clone(),
        };

        // 测试 Redis 连接
        let mut conn = store.get_connection().await.map_err(|e| {
            error!(
                "Failed to connect to Redis server: {}. Check Redis server status and URL: {}",
                e, redis_config.url
            );
            ClientError::storage(format!("Redis connection failed: {e}"))
        })?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        debug!(
            "RedisStore created with prefix: '{}', ping: {}",
            store.key_prefix, pong
        );

        Ok(store)
    }

    async fn get_connection(&self) -> std::result::Result<MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;
        let value: Option<String> = conn.get(self.make_key(key)).await?;
        if value.is_none() {
            debug!("Key not found in redis store: {}", key);
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: String) -> Result<()> {
        let mut conn = self.get_connection().await?;
        conn.set::<String, String, ()>(self.make_key(key), value)
            .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let deleted: i32 = conn.del(self.make_key(key)).await?;
        if deleted == 0 {
            debug!("Key not found in redis store for removal: {}", key);
        }
        Ok(())
    }

    async fn clear_prefix(&self, prefix: &str) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let pattern = format!("{}*", self.make_key(prefix));
        let keys: Vec<String> = conn.keys(pattern).await?;
        if !keys.is_empty() {
            conn.del::<Vec<String>, i32>(keys).await?;
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
