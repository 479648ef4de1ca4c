// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use sea_orm::DatabaseTransaction;

use super::error::RepositoryError;
use crate::domain::models::relation::{FollowStatus, FollowerRecord};

/// 粉丝表仓库特质
///
/// 与关注表仓库对称；另外支持按主键读取和批量读取。
#[async_trait]
pub trait FollowerRepository: Send + Sync {
    /// 插入或复活一条粉丝记录，返回该行的主键
    async fn create(
        &self,
        txn: &DatabaseTransaction,
        record: &FollowerRecord,
    ) -> Result<i64, RepositoryError>;

    /// 切换状态并刷新更新时间，返回被更新行的主键
    ///
    /// 返回前无条件删除关系键；找到行时同时删除主键缓存。
    async fn update_status(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        follower_uid: i64,
        status: FollowStatus,
    ) -> Result<Option<i64>, RepositoryError>;

    /// 读取一条粉丝记录（缓存旁路）
    async fn get(
        &self,
        user_id: i64,
        follower_uid: i64,
    ) -> Result<Option<FollowerRecord>, RepositoryError>;

    async fn get_uncached(
        &self,
        user_id: i64,
        follower_uid: i64,
    ) -> Result<Option<FollowerRecord>, RepositoryError>;

    /// 按主键读取（缓存旁路）
    async fn get_by_id(&self, id: i64) -> Result<Option<FollowerRecord>, RepositoryError>;

    /// 按主键批量读取
    ///
    /// 先查缓存，只有未命中的主键才回源，回源结果批量写回缓存。
    /// 输出顺序不保证与输入一致。
    async fn batch_get(&self, ids: &[i64]) -> Result<Vec<FollowerRecord>, RepositoryError>;

    /// 游标分页列出 `user_id` 的粉丝
    async fn list_by_user(
        &self,
        user_id: i64,
        cursor_id: i64,
        limit: u64,
    ) -> Result<Vec<FollowerRecord>, RepositoryError>;

    /// 删除关系键；给出 `id` 时同时删除主键缓存
    async fn evict(&self, user_id: i64, follower_uid: i64, id: Option<i64>);
}
