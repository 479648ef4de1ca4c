// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::{create_test_context, TestContext};
use relationrs::domain::models::relation::{now, FollowStatus, FollowingRecord, MAX_CURSOR_ID};
use relationrs::domain::repositories::follower_repository::FollowerRepository;
use relationrs::infrastructure::cache::keys::{follower_id_key, follower_key};
use relationrs::infrastructure::cache::backend::CacheBackend;
use sea_orm::TransactionTrait;

async fn insert(ctx: &TestContext, user_id: i64, follower_uid: i64) -> i64 {
    let record = FollowingRecord::new(follower_uid, user_id, FollowStatus::Normal, now()).mirror();
    let txn = ctx.db.begin().await.unwrap();
    let id = ctx.follower.create(&txn, &record).await.unwrap();
    txn.commit().await.unwrap();
    id
}

#[tokio::test]
async fn test_get_by_id_is_cached() {
    let ctx = create_test_context().await;
    let id = insert(&ctx, 2, 1).await;

    let record = ctx.follower.get_by_id(id).await.unwrap().unwrap();
    assert_eq!((record.user_id, record.follower_uid), (2, 1));
    assert!(ctx.backend.get(&follower_id_key(id)).await.unwrap().is_some());

    assert!(ctx.follower.get_by_id(id + 100).await.unwrap().is_none());
}

/// 批量读取只对未命中的主键回源，并把结果写回缓存
#[tokio::test]
async fn test_batch_get_merges_hits_and_misses() {
    let ctx = create_test_context().await;
    let a = insert(&ctx, 2, 1).await;
    let b = insert(&ctx, 2, 3).await;
    let c = insert(&ctx, 2, 4).await;

    // Warm one id.
    ctx.follower.get_by_id(a).await.unwrap();
    assert!(ctx.backend.get(&follower_id_key(b)).await.unwrap().is_none());

    let mut records = ctx.follower.batch_get(&[a, b, c, 999]).await.unwrap();
    records.sort_by_key(|r| r.id);

    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![a, b, c]);
    assert!(ctx.backend.get(&follower_id_key(b)).await.unwrap().is_some());
    assert!(ctx.backend.get(&follower_id_key(c)).await.unwrap().is_some());
}

#[tokio::test]
async fn test_batch_get_empty_input() {
    let ctx = create_test_context().await;
    assert!(ctx.follower.batch_get(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_status_evicts_pair_and_id_keys() {
    let ctx = create_test_context().await;
    let id = insert(&ctx, 2, 1).await;
    ctx.follower.get(2, 1).await.unwrap();
    ctx.follower.get_by_id(id).await.unwrap();

    let txn = ctx.db.begin().await.unwrap();
    let updated = ctx
        .follower
        .update_status(&txn, 2, 1, FollowStatus::Deleted)
        .await
        .unwrap();
    txn.commit().await.unwrap();

    assert_eq!(updated, Some(id));
    assert!(ctx.backend.get(&follower_key(2, 1)).await.unwrap().is_none());
    assert!(ctx.backend.get(&follower_id_key(id)).await.unwrap().is_none());

    let record = ctx.follower.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(record.status, FollowStatus::Deleted);
}

#[tokio::test]
async fn test_list_by_user_filters_deleted() {
    let ctx = create_test_context().await;
    insert(&ctx, 2, 1).await;
    insert(&ctx, 2, 3).await;
    insert(&ctx, 5, 1).await;

    let txn = ctx.db.begin().await.unwrap();
    ctx.follower
        .update_status(&txn, 2, 1, FollowStatus::Deleted)
        .await
        .unwrap();
    txn.commit().await.unwrap();

    let page = ctx.follower.list_by_user(2, MAX_CURSOR_ID, 10).await.unwrap();
    let uids: Vec<i64> = page.iter().map(|r| r.follower_uid).collect();
    assert_eq!(uids, vec![3]);
}
