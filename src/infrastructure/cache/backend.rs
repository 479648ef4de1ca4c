// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 缓存层错误类型
#[derive(Error, Debug)]
pub enum CacheError {
    /// Redis 调用失败
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
    /// 缓存值编解码失败
    #[error("Cache codec error: {0}")]
    Codec(#[from] serde_json::Error),
    /// 其它后端错误
    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// 缓存后端接口
///
/// 以字符串为值的键值存储，任何支持过期时间的 KV 都可以作为后端。
/// 所有失败都原样返回，由调用方决定是否降级。
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// 读取单个键，不存在时返回 `None`
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// 写入单个键并设置过期时间
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// 删除单个键，键不存在不是错误
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// 批量读取
    ///
    /// 返回值与 `keys` 按位置一一对应，未命中的位置为 `None`
    async fn multi_get(&self, keys: &[String]) -> Result<Vec<Option<String>>, CacheError>;

    /// 批量写入，所有条目使用同一过期时间
    async fn multi_set(&self, entries: &[(String, String)], ttl: Duration) -> Result<(), CacheError>;
}
