// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::relation::{FollowerRecord, FollowingRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 关注 / 取关成功时的空响应
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EmptyResponseDto {}

/// 批量关系查询响应，键为候选用户，值为状态码
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchGetRelationResponseDto {
    pub result: HashMap<i64, i64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FollowingItemDto {
    pub id: i64,
    pub followed_uid: i64,
}

impl From<FollowingRecord> for FollowingItemDto {
    fn from(record: FollowingRecord) -> Self {
        Self {
            id: record.id,
            followed_uid: record.followed_uid,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FollowingListResponseDto {
    pub result: Vec<FollowingItemDto>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FollowerItemDto {
    pub id: i64,
    pub follower_uid: i64,
}

impl From<FollowerRecord> for FollowerItemDto {
    fn from(record: FollowerRecord) -> Self {
        Self {
            id: record.id,
            follower_uid: record.follower_uid,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FollowerListResponseDto {
    pub result: Vec<FollowerItemDto>,
}
