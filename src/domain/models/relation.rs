// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 游标分页的起始哨兵值（48 位最大 ID），表示“从最新的一条开始”
pub const MAX_CURSOR_ID: i64 = 0xFFFF_FFFF_FFFF;

/// 关注状态
///
/// 关系行永远不会被物理删除，取关只是把状态切换为 `Deleted`，
/// 再次关注时切换回 `Normal`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FollowStatus {
    /// 已取关（软删除）
    #[default]
    Deleted,
    /// 正常关注中
    Normal,
}

impl FollowStatus {
    /// 持久化与对外返回使用的状态码
    pub const fn code(self) -> i16 {
        match self {
            FollowStatus::Deleted => 0,
            FollowStatus::Normal => 1,
        }
    }

    pub fn is_active(self) -> bool {
        self == FollowStatus::Normal
    }
}

// Only `1` is a live edge; anything else reads as soft-deleted.
impl From<i16> for FollowStatus {
    fn from(code: i16) -> Self {
        if code == FollowStatus::Normal.code() {
            FollowStatus::Normal
        } else {
            FollowStatus::Deleted
        }
    }
}

impl fmt::Display for FollowStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FollowStatus::Deleted => write!(f, "deleted"),
            FollowStatus::Normal => write!(f, "normal"),
        }
    }
}

/// 关注记录：`user_id` 关注了 `followed_uid`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowingRecord {
    /// 自增主键，新建记录写入前为 0
    pub id: i64,
    /// 发起关注的用户
    pub user_id: i64,
    /// 被关注的用户
    pub followed_uid: i64,
    pub status: FollowStatus,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl FollowingRecord {
    /// 构造一条待写入的关注记录
    pub fn new(
        user_id: i64,
        followed_uid: i64,
        status: FollowStatus,
        now: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id: 0,
            user_id,
            followed_uid,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// 生成粉丝表中的镜像记录
    pub fn mirror(&self) -> FollowerRecord {
        FollowerRecord {
            id: 0,
            user_id: self.followed_uid,
            follower_uid: self.user_id,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// 粉丝记录：`user_id` 被 `follower_uid` 关注
///
/// `FollowerRecord{user_id: A, follower_uid: B}` 是
/// `FollowingRecord{user_id: B, followed_uid: A}` 的镜像。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowerRecord {
    pub id: i64,
    /// 被关注的用户
    pub user_id: i64,
    /// 粉丝
    pub follower_uid: i64,
    pub status: FollowStatus,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// 当前时间（带时区偏移），与数据库的 timestamptz 列对应
pub fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}
