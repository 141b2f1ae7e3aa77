// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 平台调用的采集入口
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 文档模型以及采集、补全、去重和上限控制
pub mod domain;

/// 引擎模块
///
/// 页面抓取器：无头浏览器和纯HTTP实现
pub mod engines;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
