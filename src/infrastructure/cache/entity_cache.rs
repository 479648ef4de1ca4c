// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::settings::CacheSettings;
use crate::infrastructure::cache::backend::{CacheBackend, CacheError};
use crate::infrastructure::metrics;

/// 空值占位符，表示“已确认不存在”
pub const NOT_FOUND_PLACEHOLDER: &str = "*";

/// 缓存过期策略
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    /// 普通记录的过期时间
    pub ttl: Duration,
    /// 空值占位的过期时间
    pub not_found_ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300), // 5分钟
            not_found_ttl: Duration::from_secs(60),
        }
    }
}

impl From<&CacheSettings> for CachePolicy {
    fn from(settings: &CacheSettings) -> Self {
        Self {
            ttl: Duration::from_secs(settings.ttl_secs),
            not_found_ttl: Duration::from_secs(settings.not_found_ttl_secs),
        }
    }
}

/// 单键读取结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup<T> {
    /// 命中
    Hit(T),
    /// 命中空值占位，记录已确认不存在
    NotFound,
    /// 未命中，需要回源
    Miss,
}

/// 单实体类型的读穿缓存
///
/// 值以 JSON 编码存入后端；`mark_not_found` 写入的占位符与任何合法
/// JSON 对象都不同，因此读取时可以区分“确认不存在”与“尚未查询”。
pub struct EntityCache<T> {
    name: &'static str,
    backend: Arc<dyn CacheBackend>,
    policy: CachePolicy,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for EntityCache<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            backend: self.backend.clone(),
            policy: self.policy,
            _marker: PhantomData,
        }
    }
}

impl<T> EntityCache<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    /// 创建缓存
    ///
    /// # 参数
    ///
    /// * `name` - 缓存名称，用于日志和指标标签
    /// * `backend` - 缓存后端
    /// * `policy` - 过期策略
    pub fn new(name: &'static str, backend: Arc<dyn CacheBackend>, policy: CachePolicy) -> Self {
        Self {
            name,
            backend,
            policy,
            _marker: PhantomData,
        }
    }

    pub async fn get(&self, key: &str) -> Result<CacheLookup<T>, CacheError> {
        let lookup = match self.backend.get(key).await? {
            None => CacheLookup::Miss,
            Some(raw) if raw == NOT_FOUND_PLACEHOLDER => CacheLookup::NotFound,
            Some(raw) => CacheLookup::Hit(serde_json::from_str(&raw)?),
        };

        match &lookup {
            CacheLookup::Hit(_) => metrics::record_cache_hit(self.name),
            CacheLookup::NotFound => metrics::record_cache_negative_hit(self.name),
            CacheLookup::Miss => metrics::record_cache_miss(self.name),
        }
        debug!(cache = self.name, key, hit = !matches!(lookup, CacheLookup::Miss), "cache lookup");

        Ok(lookup)
    }

    /// 使用默认过期时间写入
    pub async fn set(&self, key: &str, value: &T) -> Result<(), CacheError> {
        self.set_with_ttl(key, value, self.policy.ttl).await
    }

    pub async fn set_with_ttl(&self, key: &str, value: &T, ttl: Duration) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw, ttl).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key).await
    }

    /// 批量读取
    ///
    /// 只返回真正命中的键；未命中和空值占位都不出现在结果中
    pub async fn multi_get(&self, keys: &[String]) -> Result<HashMap<String, T>, CacheError> {
        let values = self.backend.multi_get(keys).await?;

        let mut found = HashMap::with_capacity(keys.len());
        for (key, raw) in keys.iter().zip(values) {
            match raw {
                Some(raw) if raw != NOT_FOUND_PLACEHOLDER => {
                    found.insert(key.clone(), serde_json::from_str(&raw)?);
                }
                _ => {}
            }
        }

        let misses = keys.len() - found.len();
        metrics::record_cache_hits(self.name, found.len() as u64);
        metrics::record_cache_misses(self.name, misses as u64);
        debug!(cache = self.name, hits = found.len(), misses, "cache multi lookup");

        Ok(found)
    }

    /// 批量写入，使用默认过期时间
    pub async fn multi_set(&self, entries: &[(String, T)]) -> Result<(), CacheError> {
        if entries.is_empty() {
            return Ok(());
        }

        let encoded = entries
            .iter()
            .map(|(key, value)| Ok((key.clone(), serde_json::to_string(value)?)))
            .collect::<Result<Vec<_>, CacheError>>()?;
        self.backend.multi_set(&encoded, self.policy.ttl).await
    }

    /// 写入空值占位，吸收对不存在记录的重复回源
    pub async fn mark_not_found(&self, key: &str) -> Result<(), CacheError> {
        self.backend
            .set(key, NOT_FOUND_PLACEHOLDER, self.policy.not_found_ttl)
            .await
    }
}
