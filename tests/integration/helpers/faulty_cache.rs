// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use relationrs::infrastructure::cache::backend::{CacheBackend, CacheError};
use relationrs::infrastructure::cache::memory_cache::MemoryCache;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// 可以按操作类型注入故障或延迟的缓存后端，其余行为委托给内存缓存
#[derive(Default)]
pub struct FaultyCache {
    inner: MemoryCache,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub fail_deletes: AtomicBool,
    pub read_delay: Option<Duration>,
    pub delete_delay: Option<Duration>,
}

impl FaultyCache {
    pub fn with_read_delay(delay: Duration) -> Self {
        Self {
            read_delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn with_delete_delay(delay: Duration) -> Self {
        Self {
            delete_delay: Some(delay),
            ..Default::default()
        }
    }

    fn check(flag: &AtomicBool, op: &str) -> Result<(), CacheError> {
        if flag.load(Ordering::SeqCst) {
            return Err(CacheError::Backend(format!("injected {} failure", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheBackend for FaultyCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        Self::check(&self.fail_reads, "get")?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        Self::check(&self.fail_writes, "set")?;
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        if let Some(delay) = self.delete_delay {
            tokio::time::sleep(delay).await;
        }
        Self::check(&self.fail_deletes, "delete")?;
        self.inner.delete(key).await
    }

    async fn multi_get(&self, keys: &[String]) -> Result<Vec<Option<String>>, CacheError> {
        Self::check(&self.fail_reads, "multi_get")?;
        self.inner.multi_get(keys).await
    }

    async fn multi_set(&self, entries: &[(String, String)], ttl: Duration) -> Result<(), CacheError> {
        Self::check(&self.fail_writes, "multi_set")?;
        self.inner.multi_set(entries, ttl).await
    }
}
