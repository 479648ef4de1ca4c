// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;

use crate::infrastructure::cache::backend::{CacheBackend, CacheError};

/// Redis客户端
///
/// 提供对Redis数据库的异步操作接口，是关系缓存的默认后端
#[derive(Clone)]
pub struct RedisClient {
    /// 共享的连接管理器，断线后自动重连
    manager: ConnectionManager,
}

impl RedisClient {
    /// 创建新的Redis客户端实例
    ///
    /// 建立一条多路复用连接，之后所有缓存调用共用它
    ///
    /// # 参数
    ///
    /// * `redis_url` - Redis连接URL
    ///
    /// # 返回值
    ///
    /// * `Ok(RedisClient)` - Redis客户端实例
    /// * `Err(CacheError)` - URL 无法解析或连接失败
    pub async fn new(redis_url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;
        Ok(Self { manager })
    }

    fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }
}

// SET EX rejects a zero expiry
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl CacheBackend for RedisClient {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut con = self.connection();
        let value: Option<String> = con.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut con = self.connection();
        con.set_ex::<_, _, ()>(key, value, ttl_seconds(ttl)).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut con = self.connection();
        con.del::<_, ()>(key).await?;
        Ok(())
    }

    async fn multi_get(&self, keys: &[String]) -> Result<Vec<Option<String>>, CacheError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut con = self.connection();
        // Explicit MGET: a single-key mget would otherwise be sent as GET
        let values: Vec<Option<String>> = redis::cmd("MGET").arg(keys).query_async(&mut con).await?;
        Ok(values)
    }

    async fn multi_set(&self, entries: &[(String, String)], ttl: Duration) -> Result<(), CacheError> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut con = self.connection();
        let seconds = ttl_seconds(ttl);
        let mut pipe = redis::pipe();
        for (key, value) in entries {
            pipe.set_ex(key, value, seconds).ignore();
        }
        let _: () = pipe.query_async(&mut con).await?;
        Ok(())
    }
}
