// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::services::relation_service::RelationError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口。
/// 响应体为 `{"code": <状态码>, "error": <错误信息>}`，`code` 沿用 gRPC 状态码编号。
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> (StatusCode, u32) {
        match self.0.downcast_ref::<RelationError>() {
            Some(RelationError::InvalidArgument(_)) => (StatusCode::BAD_REQUEST, 3),
            Some(RelationError::DeadlineExceeded(_)) => (StatusCode::GATEWAY_TIMEOUT, 4),
            Some(RelationError::NotFound(_)) => (StatusCode::NOT_FOUND, 5),
            Some(RelationError::PermissionDenied(_)) => (StatusCode::FORBIDDEN, 7),
            Some(RelationError::Internal(_)) | None => (StatusCode::INTERNAL_SERVER_ERROR, 13),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let body = Json(json!({ "code": code, "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
