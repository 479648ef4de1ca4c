// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::relation_request::{
    BatchGetRelationRequestDto, FollowRequestDto, RelationListRequestDto, UnfollowRequestDto,
};
use crate::application::dto::relation_response::{
    BatchGetRelationResponseDto, EmptyResponseDto, FollowerListResponseDto,
    FollowingListResponseDto,
};
use crate::domain::services::relation_service::{RelationError, RelationService};
use crate::presentation::errors::AppError;
use axum::{extract::Extension, Json};
use std::sync::Arc;
use validator::Validate;

fn validate(request: &impl Validate) -> Result<(), RelationError> {
    request
        .validate()
        .map_err(|errors| RelationError::InvalidArgument(format!("Validation error: {}", errors)))
}

/// 关注
pub async fn follow(
    Extension(service): Extension<Arc<RelationService>>,
    Json(request): Json<FollowRequestDto>,
) -> Result<Json<EmptyResponseDto>, AppError> {
    validate(&request)?;

    service.follow(request.user_id, request.followed_uid).await?;
    Ok(Json(EmptyResponseDto::default()))
}

/// 取关
pub async fn unfollow(
    Extension(service): Extension<Arc<RelationService>>,
    Json(request): Json<UnfollowRequestDto>,
) -> Result<Json<EmptyResponseDto>, AppError> {
    validate(&request)?;

    service
        .unfollow(request.user_id, request.followed_uid)
        .await?;
    Ok(Json(EmptyResponseDto::default()))
}

/// 批量查询关系
pub async fn batch_get_relation(
    Extension(service): Extension<Arc<RelationService>>,
    Json(request): Json<BatchGetRelationRequestDto>,
) -> Result<Json<BatchGetRelationResponseDto>, AppError> {
    validate(&request)?;

    let result = service
        .batch_get_relation(request.user_id, &request.ids)
        .await?;
    Ok(Json(BatchGetRelationResponseDto { result }))
}

/// 关注列表
pub async fn get_following_list(
    Extension(service): Extension<Arc<RelationService>>,
    Json(request): Json<RelationListRequestDto>,
) -> Result<Json<FollowingListResponseDto>, AppError> {
    validate(&request)?;

    let records = service
        .get_following_list(request.user_id, request.last_id, u64::from(request.limit))
        .await?;
    Ok(Json(FollowingListResponseDto {
        result: records.into_iter().map(Into::into).collect(),
    }))
}

/// 粉丝列表
pub async fn get_follower_list(
    Extension(service): Extension<Arc<RelationService>>,
    Json(request): Json<RelationListRequestDto>,
) -> Result<Json<FollowerListResponseDto>, AppError> {
    validate(&request)?;

    let records = service
        .get_follower_list(request.user_id, request.last_id, u64::from(request.limit))
        .await?;
    Ok(Json(FollowerListResponseDto {
        result: records.into_iter().map(Into::into).collect(),
    }))
}
