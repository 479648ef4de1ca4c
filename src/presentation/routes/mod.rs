// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::relation_service::RelationService;
use crate::presentation::handlers::relation_handler;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 参数
///
/// * `service` - 关系服务
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(service: Arc<RelationService>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let relation_routes = Router::new()
        .route("/v1/relation/follow", post(relation_handler::follow))
        .route("/v1/relation/unfollow", post(relation_handler::unfollow))
        .route(
            "/v1/relation/batch_get",
            post(relation_handler::batch_get_relation),
        )
        .route(
            "/v1/relation/following",
            post(relation_handler::get_following_list),
        )
        .route(
            "/v1/relation/followers",
            post(relation_handler::get_follower_list),
        )
        .layer(Extension(service));

    Router::new()
        .merge(public_routes)
        .merge(relation_routes)
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
