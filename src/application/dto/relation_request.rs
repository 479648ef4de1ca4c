// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 关注 / 取关请求
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct FollowRequestDto {
    /// 发起操作的用户
    #[validate(range(min = 1, message = "user_id is required"))]
    pub user_id: i64,
    /// 被关注的用户
    #[validate(range(min = 1, message = "followed_uid is required"))]
    pub followed_uid: i64,
}

pub type UnfollowRequestDto = FollowRequestDto;

/// 批量关系查询请求
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct BatchGetRelationRequestDto {
    #[validate(range(min = 1, message = "user_id is required"))]
    pub user_id: i64,
    /// 候选用户
    #[validate(length(min = 1, message = "ids cannot be empty"))]
    pub ids: Vec<i64>,
}

/// 关注 / 粉丝列表请求
///
/// `last_id` 为 0 时从最新的一条开始；`limit` 为 0 时使用默认页大小
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RelationListRequestDto {
    #[validate(range(min = 1, message = "user_id is required"))]
    pub user_id: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub last_id: i64,
    #[serde(default)]
    #[validate(range(max = 1000))]
    pub limit: u32,
}
