// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_context;
use relationrs::domain::models::relation::{FollowStatus, MAX_CURSOR_ID};
use relationrs::domain::repositories::follower_repository::FollowerRepository;
use relationrs::domain::repositories::following_repository::FollowingRepository;
use relationrs::domain::services::relation_service::RelationError;
use sea_orm::ConnectionTrait;

/// 关注、重复关注、取关、再次关注的完整流程
///
/// 再次关注复用同一行，更新时间刷新
#[tokio::test]
async fn test_follow_unfollow_refollow_scenario() {
    let ctx = create_test_context().await;

    ctx.service.follow(1, 2).await.unwrap();
    ctx.service.follow(1, 2).await.unwrap();

    let following = ctx.following.get(1, 2).await.unwrap().unwrap();
    let follower = ctx.follower.get(2, 1).await.unwrap().unwrap();
    assert_eq!(following.status, FollowStatus::Normal);
    assert_eq!(follower.status, FollowStatus::Normal);

    ctx.service.unfollow(1, 2).await.unwrap();
    assert_eq!(
        ctx.following.get(1, 2).await.unwrap().unwrap().status,
        FollowStatus::Deleted
    );
    assert_eq!(
        ctx.follower.get(2, 1).await.unwrap().unwrap().status,
        FollowStatus::Deleted
    );

    ctx.service.follow(1, 2).await.unwrap();
    let revived = ctx.following.get(1, 2).await.unwrap().unwrap();
    let revived_mirror = ctx.follower.get(2, 1).await.unwrap().unwrap();

    assert_eq!(revived.status, FollowStatus::Normal);
    assert_eq!(revived_mirror.status, FollowStatus::Normal);
    assert_eq!(revived.id, following.id);
    assert_eq!(revived_mirror.id, follower.id);
    assert!(revived.updated_at >= following.updated_at);
    assert_eq!(revived.created_at, following.created_at);
}

#[tokio::test]
async fn test_follow_is_idempotent() {
    let ctx = create_test_context().await;

    ctx.service.follow(1, 2).await.unwrap();
    let once = ctx.following.get_uncached(1, 2).await.unwrap().unwrap();
    ctx.service.follow(1, 2).await.unwrap();
    let twice = ctx.following.get_uncached(1, 2).await.unwrap().unwrap();

    assert_eq!(once, twice);
    let page = ctx.service.get_following_list(1, 0, 10).await.unwrap();
    assert_eq!(page.len(), 1);
}

#[tokio::test]
async fn test_unfollow_is_idempotent() {
    let ctx = create_test_context().await;

    // Never followed.
    ctx.service.unfollow(1, 2).await.unwrap();
    assert!(ctx.following.get_uncached(1, 2).await.unwrap().is_none());

    ctx.service.follow(1, 2).await.unwrap();
    ctx.service.unfollow(1, 2).await.unwrap();
    let once = ctx.following.get_uncached(1, 2).await.unwrap().unwrap();
    ctx.service.unfollow(1, 2).await.unwrap();
    let twice = ctx.following.get_uncached(1, 2).await.unwrap().unwrap();

    assert_eq!(once, twice);
    assert_eq!(twice.status, FollowStatus::Deleted);
}

#[tokio::test]
async fn test_self_relation_is_rejected() {
    let ctx = create_test_context().await;

    for id in [0, 1, 42] {
        assert!(matches!(
            ctx.service.follow(id, id).await,
            Err(RelationError::InvalidArgument(_))
        ));
        assert!(matches!(
            ctx.service.unfollow(id, id).await,
            Err(RelationError::InvalidArgument(_))
        ));
    }

    // Rejected even when a row somehow exists.
    ctx.service.follow(1, 2).await.unwrap();
    assert!(matches!(
        ctx.service.unfollow(1, 1).await,
        Err(RelationError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_mirror_invariant() {
    let ctx = create_test_context().await;
    let pairs = [(1, 2), (1, 3), (2, 1), (3, 4)];

    for (a, b) in pairs {
        ctx.service.follow(a, b).await.unwrap();
    }
    ctx.service.unfollow(1, 3).await.unwrap();

    for (a, b) in pairs.into_iter().chain([(4, 3), (1, 4)]) {
        let following = ctx.following.get_uncached(a, b).await.unwrap();
        let follower = ctx.follower.get_uncached(b, a).await.unwrap();

        let following_active = following.is_some_and(|r| r.status.is_active());
        let follower_active = follower.is_some_and(|r| r.status.is_active());
        assert_eq!(following_active, follower_active, "pair {}->{}", a, b);
    }
}

/// 取关后即使之前缓存了正常状态，也不会读到旧值
#[tokio::test]
async fn test_cache_is_coherent_after_unfollow() {
    let ctx = create_test_context().await;

    ctx.service.follow(1, 2).await.unwrap();
    // Warm both caches with the Normal rows.
    assert!(ctx.following.get(1, 2).await.unwrap().unwrap().status.is_active());
    assert!(ctx.follower.get(2, 1).await.unwrap().unwrap().status.is_active());

    ctx.service.unfollow(1, 2).await.unwrap();

    let following = ctx.following.get(1, 2).await.unwrap();
    let follower = ctx.follower.get(2, 1).await.unwrap();
    assert!(!following.is_some_and(|r| r.status.is_active()));
    assert!(!follower.is_some_and(|r| r.status.is_active()));
}

/// 关注前的读取写入了空值占位，关注提交后必须被清除
#[tokio::test]
async fn test_follow_clears_negative_cache() {
    let ctx = create_test_context().await;

    assert!(ctx.following.get(1, 2).await.unwrap().is_none());
    assert!(ctx.follower.get(2, 1).await.unwrap().is_none());

    ctx.service.follow(1, 2).await.unwrap();

    assert!(ctx.following.get(1, 2).await.unwrap().is_some());
    assert!(ctx.follower.get(2, 1).await.unwrap().is_some());
}

#[tokio::test]
async fn test_batch_get_relation() {
    let ctx = create_test_context().await;

    ctx.service.follow(1, 2).await.unwrap();
    ctx.service.follow(1, 3).await.unwrap();
    ctx.service.unfollow(1, 3).await.unwrap();

    let result = ctx
        .service
        .batch_get_relation(1, &[2, 3, 4, 2])
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result.get(&2), Some(&i64::from(FollowStatus::Normal.code())));
    assert!(!result.contains_key(&3));
    assert!(!result.contains_key(&4));
}

#[tokio::test]
async fn test_batch_get_relation_rejects_empty_input() {
    let ctx = create_test_context().await;

    assert!(matches!(
        ctx.service.batch_get_relation(0, &[1]).await,
        Err(RelationError::InvalidArgument(_))
    ));
    assert!(matches!(
        ctx.service.batch_get_relation(1, &[]).await,
        Err(RelationError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_following_list_pagination() {
    let ctx = create_test_context().await;
    for followed in 2..=8 {
        ctx.service.follow(1, followed).await.unwrap();
    }
    ctx.service.unfollow(1, 4).await.unwrap();

    let first = ctx.service.get_following_list(1, 0, 3).await.unwrap();
    assert_eq!(first.len(), 3);
    assert!(first.iter().all(|r| r.id <= MAX_CURSOR_ID));
    assert!(first.windows(2).all(|w| w[0].id > w[1].id));

    let cursor = first.last().unwrap().id;
    let second = ctx.service.get_following_list(1, cursor, 3).await.unwrap();
    assert!(second.iter().all(|r| r.id <= cursor && r.status.is_active()));
    assert!(second.windows(2).all(|w| w[0].id > w[1].id));

    // The cursor is inclusive; everything after it is new.
    assert_eq!(second[0].id, cursor);
    for record in &second[1..] {
        assert!(first.iter().all(|seen| seen.id != record.id));
    }

    let uids: Vec<i64> = first
        .iter()
        .chain(second[1..].iter())
        .map(|r| r.followed_uid)
        .collect();
    assert_eq!(uids, vec![8, 7, 6, 5, 3]);
}

#[tokio::test]
async fn test_follower_list_uses_default_page_size() {
    let ctx = create_test_context().await;
    for follower in 2..=25 {
        ctx.service.follow(follower, 1).await.unwrap();
    }

    let page = ctx.service.get_follower_list(1, 0, 0).await.unwrap();
    assert_eq!(page.len(), ctx.service.options().default_page_size as usize);
    assert_eq!(page[0].follower_uid, 25);
    assert!(page.iter().all(|r| r.user_id == 1));
}

/// 粉丝表写入失败时，关注表的写入一起回滚
#[tokio::test]
async fn test_follow_rolls_back_when_mirror_insert_fails() {
    let ctx = create_test_context().await;
    ctx.db
        .execute_unprepared(
            "CREATE TRIGGER reject_follower_insert BEFORE INSERT ON user_follower \
             BEGIN SELECT RAISE(ABORT, 'mirror insert rejected'); END;",
        )
        .await
        .unwrap();

    assert!(matches!(
        ctx.service.follow(1, 2).await,
        Err(RelationError::Internal(_))
    ));
    assert!(ctx.following.get_uncached(1, 2).await.unwrap().is_none());
    assert!(ctx.follower.get_uncached(2, 1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unfollow_rolls_back_when_mirror_update_fails() {
    let ctx = create_test_context().await;
    ctx.service.follow(1, 2).await.unwrap();
    ctx.db
        .execute_unprepared(
            "CREATE TRIGGER reject_follower_update BEFORE UPDATE ON user_follower \
             BEGIN SELECT RAISE(ABORT, 'mirror update rejected'); END;",
        )
        .await
        .unwrap();

    assert!(matches!(
        ctx.service.unfollow(1, 2).await,
        Err(RelationError::Internal(_))
    ));
    assert_eq!(
        ctx.following.get_uncached(1, 2).await.unwrap().unwrap().status,
        FollowStatus::Normal
    );
    assert_eq!(
        ctx.following.get(1, 2).await.unwrap().unwrap().status,
        FollowStatus::Normal
    );
}
