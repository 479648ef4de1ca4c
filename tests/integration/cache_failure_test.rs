// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_context_with;
use super::helpers::faulty_cache::FaultyCache;
use relationrs::domain::models::relation::FollowStatus;
use relationrs::domain::repositories::following_repository::FollowingRepository;
use relationrs::domain::services::relation_service::{RelationError, ServiceOptions};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

/// 读路径上的缓存故障不降级，作为内部错误返回
#[tokio::test]
async fn test_read_failure_surfaces_as_internal() {
    let cache = Arc::new(FaultyCache::default());
    let ctx = create_test_context_with(cache.clone(), ServiceOptions::default()).await;

    cache.fail_reads.store(true, Ordering::SeqCst);

    assert!(matches!(
        ctx.service.follow(1, 2).await,
        Err(RelationError::Internal(_))
    ));
    assert!(ctx.following.get_uncached(1, 2).await.unwrap().is_none());
}

/// 写入后的缓存失效失败只记录日志，不影响操作结果
#[tokio::test]
async fn test_eviction_failure_is_swallowed() {
    let cache = Arc::new(FaultyCache::default());
    let ctx = create_test_context_with(cache.clone(), ServiceOptions::default()).await;

    cache.fail_deletes.store(true, Ordering::SeqCst);

    ctx.service.follow(1, 2).await.unwrap();
    ctx.service.unfollow(1, 2).await.unwrap();

    let record = ctx.following.get_uncached(1, 2).await.unwrap().unwrap();
    assert_eq!(record.status, FollowStatus::Deleted);
}

/// 回填失败时仍返回数据库中的真实结果
#[tokio::test]
async fn test_populate_failure_does_not_mask_store_result() {
    let cache = Arc::new(FaultyCache::default());
    let ctx = create_test_context_with(cache.clone(), ServiceOptions::default()).await;

    ctx.service.follow(1, 2).await.unwrap();
    cache.fail_writes.store(true, Ordering::SeqCst);

    let record = ctx.following.get(1, 2).await.unwrap().unwrap();
    assert_eq!(record.status, FollowStatus::Normal);
}

#[tokio::test]
async fn test_slow_cache_hits_deadline() {
    let cache = Arc::new(FaultyCache::with_read_delay(Duration::from_millis(500)));
    let options = ServiceOptions {
        deadline: Duration::from_millis(50),
        ..ServiceOptions::default()
    };
    let ctx = create_test_context_with(cache, options).await;

    assert!(matches!(
        ctx.service.follow(1, 2).await,
        Err(RelationError::DeadlineExceeded(_))
    ));
    assert!(ctx.following.get_uncached(1, 2).await.unwrap().is_none());
}

/// 提交之后缓存失效变慢，不会把已提交的写入报告为超时
#[tokio::test]
async fn test_slow_eviction_after_commit_still_succeeds() {
    let cache = Arc::new(FaultyCache::with_delete_delay(Duration::from_millis(300)));
    let options = ServiceOptions {
        deadline: Duration::from_millis(150),
        ..ServiceOptions::default()
    };
    let ctx = create_test_context_with(cache, options).await;

    ctx.service.follow(1, 2).await.unwrap();

    let record = ctx.following.get_uncached(1, 2).await.unwrap().unwrap();
    assert_eq!(record.status, FollowStatus::Normal);
}
