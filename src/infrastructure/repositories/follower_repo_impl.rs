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

use crate::domain::models::relation::{now, FollowStatus, FollowerRecord};
use crate::domain::repositories::follower_repository::FollowerRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::cache::backend::CacheBackend;
use crate::infrastructure::cache::entity_cache::{CacheLookup, CachePolicy, EntityCache};
use crate::infrastructure::cache::keys::{follower_id_key, follower_key};
use crate::infrastructure::database::entities::user_follower;
use crate::infrastructure::metrics;
use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use tracing::{debug, warn};

const CACHE_NAME: &str = "follower";
const ID_CACHE_NAME: &str = "follower_by_id";

/// 粉丝表仓库实现
///
/// 关系键 `user:follower:<user_id>_<follower_uid>` 和主键
/// `user:follower:id:<id>` 各自维护一份缓存
#[derive(Clone)]
pub struct FollowerRepositoryImpl {
    db: Arc<DatabaseConnection>,
    cache: EntityCache<FollowerRecord>,
    id_cache: EntityCache<FollowerRecord>,
}

impl FollowerRepositoryImpl {
    pub fn new(
        db: Arc<DatabaseConnection>,
        backend: Arc<dyn CacheBackend>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            db,
            cache: EntityCache::new(CACHE_NAME, backend.clone(), policy),
            id_cache: EntityCache::new(ID_CACHE_NAME, backend, policy),
        }
    }

    async fn find_pair<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        follower_uid: i64,
    ) -> Result<Option<user_follower::Model>, RepositoryError> {
        let model = user_follower::Entity::find()
            .filter(user_follower::Column::UserId.eq(user_id))
            .filter(user_follower::Column::FollowerUid.eq(follower_uid))
            .one(conn)
            .await?;

        Ok(model)
    }

    async fn apply_status(
        txn: &DatabaseTransaction,
        user_id: i64,
        follower_uid: i64,
        status: FollowStatus,
    ) -> Result<Option<i64>, RepositoryError> {
        let Some(row) = Self::find_pair(txn, user_id, follower_uid).await? else {
            return Ok(None);
        };

        let mut active: user_follower::ActiveModel = row.into();
        active.status = Set(status.code());
        active.updated_at = Set(now());
        let updated = active.update(txn).await?;

        Ok(Some(updated.id))
    }

    async fn delete_key(&self, cache: &EntityCache<FollowerRecord>, name: &'static str, key: &str) {
        if let Err(e) = cache.delete(key).await {
            metrics::record_eviction_failure(name);
            warn!(key = %key, error = %e, "Failed to evict cache entry");
        }
    }
}

impl From<user_follower::Model> for FollowerRecord {
    fn from(model: user_follower::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            follower_uid: model.follower_uid,
            status: FollowStatus::from(model.status),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl FollowerRepository for FollowerRepositoryImpl {
    async fn create(
        &self,
        txn: &DatabaseTransaction,
        record: &FollowerRecord,
    ) -> Result<i64, RepositoryError> {
        let model = user_follower::ActiveModel {
            user_id: Set(record.user_id),
            follower_uid: Set(record.follower_uid),
            status: Set(record.status.code()),
            created_at: Set(record.created_at),
            updated_at: Set(record.updated_at),
            ..Default::default()
        };

        user_follower::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    user_follower::Column::UserId,
                    user_follower::Column::FollowerUid,
                ])
                .update_columns([user_follower::Column::Status, user_follower::Column::UpdatedAt])
                .to_owned(),
            )
            .exec_without_returning(txn)
            .await?;

        let row = Self::find_pair(txn, record.user_id, record.follower_uid)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(row.id)
    }

    async fn update_status(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        follower_uid: i64,
        status: FollowStatus,
    ) -> Result<Option<i64>, RepositoryError> {
        let result = Self::apply_status(txn, user_id, follower_uid, status).await;

        let id = result.as_ref().ok().copied().flatten();
        self.evict(user_id, follower_uid, id).await;
        result
    }

    async fn get(
        &self,
        user_id: i64,
        follower_uid: i64,
    ) -> Result<Option<FollowerRecord>, RepositoryError> {
        let key = follower_key(user_id, follower_uid);

        match self.cache.get(&key).await? {
            CacheLookup::Hit(record) => return Ok(Some(record)),
            CacheLookup::NotFound => return Ok(None),
            CacheLookup::Miss => {}
        }

        let record = self.get_uncached(user_id, follower_uid).await?;
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
        follower_uid: i64,
    ) -> Result<Option<FollowerRecord>, RepositoryError> {
        let model = Self::find_pair(self.db.as_ref(), user_id, follower_uid).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<FollowerRecord>, RepositoryError> {
        let key = follower_id_key(id);

        match self.id_cache.get(&key).await? {
            CacheLookup::Hit(record) => return Ok(Some(record)),
            CacheLookup::NotFound => return Ok(None),
            CacheLookup::Miss => {}
        }

        let record: Option<FollowerRecord> = user_follower::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .map(Into::into);
        let populated = match &record {
            Some(record) => self.id_cache.set(&key, record).await,
            None => self.id_cache.mark_not_found(&key).await,
        };
        if let Err(e) = populated {
            warn!(key = %key, error = %e, "Failed to populate cache");
        }

        Ok(record)
    }

    async fn batch_get(&self, ids: &[i64]) -> Result<Vec<FollowerRecord>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| follower_id_key(*id)).collect();
        let cached = self.id_cache.multi_get(&keys).await?;

        let missed: Vec<i64> = ids
            .iter()
            .zip(&keys)
            .filter(|(_, key)| !cached.contains_key(*key))
            .map(|(id, _)| *id)
            .collect();

        let mut records: Vec<FollowerRecord> = cached.into_values().collect();
        if missed.is_empty() {
            return Ok(records);
        }

        let fetched: Vec<FollowerRecord> = user_follower::Entity::find()
            .filter(user_follower::Column::Id.is_in(missed.iter().copied()))
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        debug!(
            requested = ids.len(),
            missed = missed.len(),
            fetched = fetched.len(),
            "follower batch get"
        );

        let entries: Vec<(String, FollowerRecord)> = fetched
            .iter()
            .map(|record| (follower_id_key(record.id), record.clone()))
            .collect();
        if let Err(e) = self.id_cache.multi_set(&entries).await {
            warn!(error = %e, count = entries.len(), "Failed to write back fetched followers");
        }

        records.extend(fetched);
        Ok(records)
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        cursor_id: i64,
        limit: u64,
    ) -> Result<Vec<FollowerRecord>, RepositoryError> {
        let models = user_follower::Entity::find()
            .filter(user_follower::Column::UserId.eq(user_id))
            .filter(user_follower::Column::Status.eq(FollowStatus::Normal.code()))
            .filter(user_follower::Column::Id.lte(cursor_id))
            .order_by_desc(user_follower::Column::Id)
            .limit(limit.max(1))
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn evict(&self, user_id: i64, follower_uid: i64, id: Option<i64>) {
        self.delete_key(&self.cache, CACHE_NAME, &follower_key(user_id, follower_uid))
            .await;
        if let Some(id) = id {
            self.delete_key(&self.id_cache, ID_CACHE_NAME, &follower_id_key(id))
                .await;
        }
    }
}
