// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::models::relation::{
    now, FollowStatus, FollowerRecord, FollowingRecord, MAX_CURSOR_ID,
};
use crate::domain::repositories::follower_repository::FollowerRepository;
use crate::domain::repositories::following_repository::FollowingRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::metrics;
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn};

/// 关系服务错误类型
#[derive(Error, Debug)]
pub enum RelationError {
    /// 参数非法，例如关注自己或候选列表为空
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// 预留，目前没有操作会返回
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    /// 操作超过截止时间
    #[error("Deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),
    /// 数据库、缓存或事务失败
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for RelationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => RelationError::NotFound(err.to_string()),
            other => RelationError::Internal(other.to_string()),
        }
    }
}

impl From<DbErr> for RelationError {
    fn from(err: DbErr) -> Self {
        RelationError::Internal(err.to_string())
    }
}

/// 关系服务运行参数
#[derive(Debug, Clone, Copy)]
pub struct ServiceOptions {
    /// 单次操作的截止时间
    pub deadline: Duration,
    /// 列表请求未给出 limit 时的页大小
    pub default_page_size: u64,
    /// 列表页大小上限
    pub max_page_size: u64,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(3),
            default_page_size: 20,
            max_page_size: 1000,
        }
    }
}

impl From<&Settings> for ServiceOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            deadline: settings.server.request_timeout(),
            default_page_size: settings.relation.default_page_size,
            max_page_size: settings.relation.max_page_size,
        }
    }
}

impl ServiceOptions {
    /// 0 表示使用默认页大小，其余值截断到上限
    pub fn page_size(&self, limit: u64) -> u64 {
        if limit == 0 {
            self.default_page_size
        } else {
            limit.min(self.max_page_size)
        }
    }
}

/// `last_id == 0` 表示从最新的一条开始
pub fn resolve_cursor(last_id: i64) -> i64 {
    if last_id == 0 {
        MAX_CURSOR_ID
    } else {
        last_id
    }
}

fn validate_pair(user_id: i64, other_uid: i64) -> Result<(), RelationError> {
    if user_id == other_uid {
        return Err(RelationError::InvalidArgument(
            "cannot follow or unfollow yourself".to_string(),
        ));
    }
    if user_id <= 0 || other_uid <= 0 {
        return Err(RelationError::InvalidArgument(
            "user ids must be positive".to_string(),
        ));
    }
    Ok(())
}

/// 写操作在截止时间内的结果
enum WriteOutcome {
    /// 关系已经是目标状态，没有写入
    Unchanged,
    /// 事务已提交，`follower_id` 为粉丝表中受影响的行
    Committed { follower_id: Option<i64> },
}

/// 关系服务
///
/// 在一个数据库事务中同时写关注表和粉丝表，提交后失效两边的缓存；
/// 列表和批量关系查询委托给对应的仓库。
pub struct RelationService {
    db: Arc<DatabaseConnection>,
    following: Arc<dyn FollowingRepository>,
    follower: Arc<dyn FollowerRepository>,
    options: ServiceOptions,
}

impl RelationService {
    /// 创建新的关系服务实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接，用于开启跨表事务
    /// * `following` - 关注表仓库
    /// * `follower` - 粉丝表仓库
    /// * `options` - 截止时间与分页参数
    pub fn new(
        db: Arc<DatabaseConnection>,
        following: Arc<dyn FollowingRepository>,
        follower: Arc<dyn FollowerRepository>,
        options: ServiceOptions,
    ) -> Self {
        Self {
            db,
            following,
            follower,
            options,
        }
    }

    pub fn options(&self) -> ServiceOptions {
        self.options
    }

    /// 关注
    ///
    /// 已处于关注状态时直接返回成功；否则在同一事务中写入（或复活）
    /// 关注记录和镜像粉丝记录，提交后失效两边的缓存。
    #[instrument(skip(self))]
    pub async fn follow(&self, user_id: i64, followed_uid: i64) -> Result<(), RelationError> {
        let outcome = self.with_deadline(self.follow_inner(user_id, followed_uid)).await?;

        if let WriteOutcome::Committed { follower_id } = outcome {
            // A revived pair may still be cached as deleted, and the pre-check may
            // have left a not-found marker.
            self.evict_pair(user_id, followed_uid, follower_id).await;
            metrics::record_relation_write("follow");
            info!(user_id, followed_uid, "Follow committed");
        }

        Ok(())
    }

    /// 取关
    ///
    /// 未关注或已取关时直接返回成功；否则在同一事务中把两边记录置为删除状态。
    #[instrument(skip(self))]
    pub async fn unfollow(&self, user_id: i64, followed_uid: i64) -> Result<(), RelationError> {
        let outcome = self.with_deadline(self.unfollow_inner(user_id, followed_uid)).await?;

        if let WriteOutcome::Committed { follower_id } = outcome {
            // update_status already evicted before commit; a concurrent reader may
            // have repopulated from the uncommitted view since.
            self.evict_pair(user_id, followed_uid, follower_id).await;
            metrics::record_relation_write("unfollow");
            info!(user_id, followed_uid, "Unfollow committed");
        }

        Ok(())
    }

    /// 批量查询 `user_id` 与候选用户的关系
    ///
    /// 返回候选用户到状态码的映射，只包含正在关注的用户
    #[instrument(skip(self, candidate_uids), fields(candidates = candidate_uids.len()))]
    pub async fn batch_get_relation(
        &self,
        user_id: i64,
        candidate_uids: &[i64],
    ) -> Result<HashMap<i64, i64>, RelationError> {
        if user_id == 0 || candidate_uids.is_empty() {
            return Err(RelationError::InvalidArgument(
                "user_id and ids are required".to_string(),
            ));
        }

        let mut candidates = candidate_uids.to_vec();
        candidates.sort_unstable();
        candidates.dedup();

        self.with_deadline(async {
            let records = self
                .following
                .batch_check_membership(user_id, &candidates)
                .await?;

            Ok::<_, RelationError>(
                records
                    .into_iter()
                    .map(|r| (r.followed_uid, i64::from(r.status.code())))
                    .collect(),
            )
        })
        .await
    }

    /// 游标分页查询关注列表
    #[instrument(skip(self))]
    pub async fn get_following_list(
        &self,
        user_id: i64,
        last_id: i64,
        limit: u64,
    ) -> Result<Vec<FollowingRecord>, RelationError> {
        let cursor = resolve_cursor(last_id);
        let limit = self.options.page_size(limit);

        self.with_deadline(async {
            Ok::<_, RelationError>(self.following.list_by_user(user_id, cursor, limit).await?)
        })
        .await
    }

    /// 游标分页查询粉丝列表
    #[instrument(skip(self))]
    pub async fn get_follower_list(
        &self,
        user_id: i64,
        last_id: i64,
        limit: u64,
    ) -> Result<Vec<FollowerRecord>, RelationError> {
        let cursor = resolve_cursor(last_id);
        let limit = self.options.page_size(limit);

        self.with_deadline(async {
            Ok::<_, RelationError>(self.follower.list_by_user(user_id, cursor, limit).await?)
        })
        .await
    }

    async fn follow_inner(
        &self,
        user_id: i64,
        followed_uid: i64,
    ) -> Result<WriteOutcome, RelationError> {
        validate_pair(user_id, followed_uid)?;

        if let Some(existing) = self.following.get(user_id, followed_uid).await? {
            if existing.status.is_active() {
                debug!("Already following, nothing to do");
                return Ok(WriteOutcome::Unchanged);
            }
        }

        let txn = self.db.begin().await?;

        let record = FollowingRecord::new(user_id, followed_uid, FollowStatus::Normal, now());
        if let Err(e) = self.following.create(&txn, &record).await {
            return Err(Self::rollback(txn, e).await);
        }
        let follower_id = match self.follower.create(&txn, &record.mirror()).await {
            Ok(id) => id,
            Err(e) => return Err(Self::rollback(txn, e).await),
        };

        Self::commit(txn).await?;

        Ok(WriteOutcome::Committed {
            follower_id: Some(follower_id),
        })
    }

    async fn unfollow_inner(
        &self,
        user_id: i64,
        followed_uid: i64,
    ) -> Result<WriteOutcome, RelationError> {
        validate_pair(user_id, followed_uid)?;

        match self.following.get_uncached(user_id, followed_uid).await? {
            Some(existing) if existing.status.is_active() => {}
            _ => {
                debug!("Not following, nothing to do");
                return Ok(WriteOutcome::Unchanged);
            }
        }

        let txn = self.db.begin().await?;

        if let Err(e) = self
            .following
            .update_status(&txn, user_id, followed_uid, FollowStatus::Deleted)
            .await
        {
            return Err(Self::rollback(txn, e).await);
        }
        let follower_id = match self
            .follower
            .update_status(&txn, followed_uid, user_id, FollowStatus::Deleted)
            .await
        {
            Ok(id) => id,
            Err(e) => return Err(Self::rollback(txn, e).await),
        };

        Self::commit(txn).await?;

        Ok(WriteOutcome::Committed { follower_id })
    }

    /// 提交后的缓存失效，不受操作截止时间约束，超时只记录日志
    async fn evict_pair(&self, user_id: i64, followed_uid: i64, follower_id: Option<i64>) {
        let evictions = async {
            futures::join!(
                self.following.evict(user_id, followed_uid),
                self.follower.evict(followed_uid, user_id, follower_id),
            )
        };

        if timeout(self.options.deadline, evictions).await.is_err() {
            metrics::record_eviction_failure("relation_pair");
            warn!(
                user_id,
                followed_uid,
                deadline = ?self.options.deadline,
                "Cache eviction timed out after commit"
            );
        }
    }

    async fn commit(txn: DatabaseTransaction) -> Result<(), RelationError> {
        txn.commit().await.map_err(|e| {
            error!(error = %e, "Failed to commit relation transaction");
            RelationError::Internal(e.to_string())
        })
    }

    async fn rollback(txn: DatabaseTransaction, err: RepositoryError) -> RelationError {
        error!(error = %err, "Relation write failed, rolling back");
        if let Err(e) = txn.rollback().await {
            error!(error = %e, "Failed to roll back relation transaction");
        }
        RelationError::Internal(err.to_string())
    }

    async fn with_deadline<T, F>(&self, fut: F) -> Result<T, RelationError>
    where
        F: Future<Output = Result<T, RelationError>>,
    {
        match timeout(self.options.deadline, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(deadline = ?self.options.deadline, "Relation operation timed out");
                Err(RelationError::DeadlineExceeded(self.options.deadline))
            }
        }
    }
}
