// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::DbErr;
use thiserror::Error;

use crate::infrastructure::cache::backend::CacheError;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 缓存错误
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}
