// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// - 领域模型（models）：文档和来源描述
/// - 服务（services）：采集、补全、去重与上限控制、编排
///
/// 领域层只通过 `PageFetcher` 特质访问页面，不依赖具体的浏览器或HTTP实现。
pub mod models;
pub mod services;
