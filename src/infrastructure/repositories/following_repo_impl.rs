// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::relation::{now, FollowStatus, FollowingRecord};
use crate::domain::repositories::following_repository::FollowingRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::cache::backend::CacheBackend;
use crate::infrastructure::cache::entity_cache::{CacheLookup, CachePolicy, EntityCache};
use crate::infrastructure::cache::keys::following_key;
use crate::infrastructure::database::entities::user_following;
use crate::infrastructure::metrics;
use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use tracing::warn;

const CACHE_NAME: &str = "following";

/// 关注表仓库实现
///
/// 基于SeaORM读写 `user_following` 表，单条记录通过 [`EntityCache`] 缓存
#[derive(Clone)]
pub struct FollowingRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
    cache: EntityCache<FollowingRecord>,
}

impl FollowingRepositoryImpl {
    /// 创建新的关注表仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    /// * `backend` - 缓存后端
    /// * `policy` - 缓存过期策略
    pub fn new(
        db: Arc<DatabaseConnection>,
        backend: Arc<dyn CacheBackend>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            db,
            cache: EntityCache::new(CACHE_NAME, backend, policy),
        }
    }

    async fn find_pair<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        followed_uid: i64,
    ) -> Result<Option<user_following::Model>, RepositoryError> {
        let model = user_following::Entity::find()
            .filter(user_following::Column::UserId.eq(user_id))
            .filter(user_following::Column::FollowedUid.eq(followed_uid))
            .one(conn)
            .await?;

        Ok(model)
    }

    async fn apply_status(
        txn: &DatabaseTransaction,
        user_id: i64,
        followed_uid: i64,
        status: FollowStatus,
    ) -> Result<Option<i64>, RepositoryError> {
        let Some(row) = Self::find_pair(txn, user_id, followed_uid).await? else {
            return Ok(None);
        };

        let mut active: user_following::ActiveModel = row.into();
        active.status = Set(status.code());
        active.updated_at = Set(now());
        let updated = active.update(txn).await?;

        Ok(Some(updated.id))
    }
}

impl From<user_following::Model> for FollowingRecord {
    fn from(model: user_following::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            followed_uid: model.followed_uid,
            status: FollowStatus::from(model.status),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl FollowingRepository for FollowingRepositoryImpl {
    async fn create(
        &self,
        txn: &DatabaseTransaction,
        record: &FollowingRecord,
    ) -> Result<i64, RepositoryError> {
        let model = user_following::ActiveModel {
            user_id: Set(record.user_id),
            followed_uid: Set(record.followed_uid),
            status: Set(record.status.code()),
            created_at: Set(record.created_at),
            updated_at: Set(record.updated_at),
            ..Default::default()
        };

        user_following::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    user_following::Column::UserId,
                    user_following::Column::FollowedUid,
                ])
                .update_columns([
                    user_following::Column::Status,
                    user_following::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(txn)
            .await?;

        // The conflict branch reports no insert id, so read it back.
        let row = Self::find_pair(txn, record.user_id, record.followed_uid)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(row.id)
    }

    async fn update_status(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        followed_uid: i64,
        status: FollowStatus,
    ) -> Result<Option<i64>, RepositoryError> {
        let result = Self::apply_status(txn, user_id, followed_uid, status).await;

        self.evict(user_id, followed_uid).await;
        result
    }

    async fn get(
        &self,
        user_id: i64,
        followed_uid: i64,
    ) -> Result<Option<FollowingRecord>, RepositoryError> {
        let key = following_key(user_id, followed_uid);

        match self.cache.get(&key).await? {
            CacheLookup::Hit(record) => return Ok(Some(record)),
            CacheLookup::NotFound => return Ok(None),
            CacheLookup::Miss => {}
        }

        let record = self.get_uncached(user_id, followed_uid).await?;
        let populated = match &record {
            Some(record) => self.cache.set(&key, record).await,
            None => self.cache.mark_not_found(&key).await,
        };
        if let Err(e) = populated {
            warn!(key = %key, error = %e, "Failed to populate cache");
        }

        Ok(record)
    }

    async fn get_uncached(
        &self,
        user_id: i64,
        followed_uid: i64,
    ) -> Result<Option<FollowingRecord>, RepositoryError> {
        let model = Self::find_pair(self.db.as_ref(), user_id, followed_uid).await?;
        Ok(model.map(Into::into))
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        cursor_id: i64,
        limit: u64,
    ) -> Result<Vec<FollowingRecord>, RepositoryError> {
        let models = user_following::Entity::find()
            .filter(user_following::Column::UserId.eq(user_id))
            .filter(user_following::Column::Status.eq(FollowStatus::Normal.code()))
            .filter(user_following::Column::Id.lte(cursor_id))
            .order_by_desc(user_following::Column::Id)
            .limit(limit.max(1))
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn batch_check_membership(
        &self,
        user_id: i64,
        candidate_uids: &[i64],
    ) -> Result<Vec<FollowingRecord>, RepositoryError> {
        if candidate_uids.is_empty() {
            return Ok(Vec::new());
        }

        let models = user_following::Entity::find()
            .filter(user_following::Column::UserId.eq(user_id))
            .filter(user_following::Column::Status.eq(FollowStatus::Normal.code()))
            .filter(user_following::Column::FollowedUid.is_in(candidate_uids.iter().copied()))
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn evict(&self, user_id: i64, followed_uid: i64) {
        let key = following_key(user_id, followed_uid);
        if let Err(e) = self.cache.delete(&key).await {
            metrics::record_eviction_failure(CACHE_NAME);
            warn!(key = %key, error = %e, "Failed to evict cache entry");
        }
    }
}
