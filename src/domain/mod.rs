// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：关注记录、粉丝记录和关注状态
/// - 仓库接口（repositories）：两张关系表的持久化抽象接口
/// - 服务（services）：跨表一致性与缓存失效的协调逻辑
pub mod models;
pub mod repositories;
pub mod services;
