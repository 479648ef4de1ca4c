// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 缓存模块
///
/// 提供关系记录的读穿缓存
/// 包括后端接口、Redis / 内存两种后端、带空值占位的实体缓存以及缓存键格式
pub mod backend;
pub mod entity_cache;
pub mod keys;
pub mod memory_cache;
pub mod redis_client;

use std::sync::Arc;

use crate::config::settings::{CacheBackendKind, Settings};
use backend::{CacheBackend, CacheError};
use memory_cache::MemoryCache;
use redis_client::RedisClient;

/// 根据配置创建缓存后端
pub async fn build_backend(settings: &Settings) -> Result<Arc<dyn CacheBackend>, CacheError> {
    let backend: Arc<dyn CacheBackend> = match settings.cache.backend {
        CacheBackendKind::Redis => Arc::new(RedisClient::new(&settings.redis.url).await?),
        CacheBackendKind::Memory => Arc::new(MemoryCache::new()),
    };
    Ok(backend)
}
