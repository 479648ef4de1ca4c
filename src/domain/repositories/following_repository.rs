// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use sea_orm::DatabaseTransaction;

use super::error::RepositoryError;
use crate::domain::models::relation::{FollowStatus, FollowingRecord};

/// 关注表仓库特质
///
/// 独占关注表的写入。写操作在调用方提供的事务中执行，
/// 读操作走缓存旁路，列表查询始终直接读库。
#[async_trait]
pub trait FollowingRepository: Send + Sync {
    /// 插入或复活一条关注记录，返回该行的主键
    ///
    /// 同一 (user_id, followed_uid) 已存在时只更新状态和更新时间。
    /// 事务尚未提交，因此不触碰缓存。
    async fn create(
        &self,
        txn: &DatabaseTransaction,
        record: &FollowingRecord,
    ) -> Result<i64, RepositoryError>;

    /// 切换关注状态并刷新更新时间，返回被更新行的主键（没有对应行时为 `None`）
    ///
    /// 返回前无条件删除该关系的缓存键。
    async fn update_status(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        followed_uid: i64,
        status: FollowStatus,
    ) -> Result<Option<i64>, RepositoryError>;

    /// 读取一条关注记录（缓存旁路）
    ///
    /// 记录不存在时返回 `Ok(None)` 并写入空值占位
    async fn get(
        &self,
        user_id: i64,
        followed_uid: i64,
    ) -> Result<Option<FollowingRecord>, RepositoryError>;

    /// 直接读库，不读也不写缓存
    async fn get_uncached(
        &self,
        user_id: i64,
        followed_uid: i64,
    ) -> Result<Option<FollowingRecord>, RepositoryError>;

    /// 游标分页列出 `user_id` 正在关注的记录，按 id 降序，只含 `id <= cursor_id` 的正常记录
    async fn list_by_user(
        &self,
        user_id: i64,
        cursor_id: i64,
        limit: u64,
    ) -> Result<Vec<FollowingRecord>, RepositoryError>;

    /// 在候选用户中找出 `user_id` 正在关注的记录
    async fn batch_check_membership(
        &self,
        user_id: i64,
        candidate_uids: &[i64],
    ) -> Result<Vec<FollowingRecord>, RepositoryError>;

    /// 删除该关系的缓存键，失败只记录日志
    async fn evict(&self, user_id: i64, followed_uid: i64);
}
