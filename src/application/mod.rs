// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 平台入口：把来源配置、页面抓取器和领域服务组装成一次爬取
pub mod use_cases;
