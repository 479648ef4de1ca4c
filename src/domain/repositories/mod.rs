// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 关注仓库（following_repository）：关注表的读写与成员检查
/// - 粉丝仓库（follower_repository）：粉丝表的读写与批量读取
pub mod error;
pub mod follower_repository;
pub mod following_repository;

pub use error::RepositoryError;
