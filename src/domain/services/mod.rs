// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 关系服务（relation_service）：协调关注表与粉丝表的跨表事务，
///   提供关注、取关、批量关系查询和分页列表
pub mod relation_service;
