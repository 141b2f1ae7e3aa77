// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
/// 包括日志初始化、错误类型、链接解析和日期解析
pub mod date_parse;
pub mod errors;
pub mod telemetry;
pub mod url_utils;
