// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 定义关注关系的核心实体：
/// - 关注状态（FollowStatus）：正常 / 已取关
/// - 关注记录（FollowingRecord）：关注表中的一行
/// - 粉丝记录（FollowerRecord）：粉丝表中的一行，是关注记录的镜像
pub mod relation;
