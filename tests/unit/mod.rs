// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 单元测试
///
/// 通过公共接口测试各模块
pub mod domain;
