// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 文档（document）：爬取的基本单元和输出
/// - 来源描述（source_profile）：站点的列表页和选择器
pub mod document;
pub mod source_profile;
