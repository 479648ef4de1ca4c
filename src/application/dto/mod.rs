// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义五个关系接口的请求与响应结构
/// 用于在API请求和领域模型之间传输数据
pub mod relation_request;
pub mod relation_response;
