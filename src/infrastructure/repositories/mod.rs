// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供领域仓库接口的具体实现
/// 两张关系表各自一个实现，数据库读写基于SeaORM，单条记录带缓存
pub mod follower_repo_impl;
pub mod following_repo_impl;
