// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 缓存键格式
//!
//! 前两种格式与其它共享同一 Redis 的服务互通，不能修改。

/// `user:following:<user_id>_<followed_uid>`
pub fn following_key(user_id: i64, followed_uid: i64) -> String {
    format!("user:following:{}_{}", user_id, followed_uid)
}

/// `user:follower:<user_id>_<follower_uid>`
pub fn follower_key(user_id: i64, follower_uid: i64) -> String {
    format!("user:follower:{}_{}", user_id, follower_uid)
}

/// `user:follower:id:<id>`，粉丝表按主键的批量读取使用
pub fn follower_id_key(id: i64) -> String {
    format!("user:follower:id:{}", id)
}
