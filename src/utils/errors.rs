// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::EngineError;
use thiserror::Error;

/// 抽取错误类型
///
/// 单个条目或单个页面上的字段缺失、无法解析等问题。
/// 这类错误只会导致跳过受影响的条目，不会中断爬取。
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("无效选择器 `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("未找到元素: {0}")]
    MissingElement(String),

    #[error("元素缺少属性: {0}")]
    MissingAttribute(String),

    #[error("无法解析日期: {0}")]
    InvalidDate(String),

    #[error("无效链接: {0}")]
    InvalidLink(String),
}

/// 爬取错误类型
///
/// 配置层面的致命错误（包括抓取器不可用），立即暴露，不做任何恢复。
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("未配置任何列表页")]
    NoListingUrls,

    #[error("无效列表页地址 `{url}`: {reason}")]
    InvalidListingUrl { url: String, reason: String },

    #[error("来源配置错误: {0}")]
    Profile(#[from] ExtractionError),

    #[error("读取上次文档失败: {0}")]
    LastDocument(String),

    #[error("页面抓取器未初始化: {0}")]
    FetcherUnavailable(String),

    #[error("配置加载失败: {0}")]
    Config(#[from] ::config::ConfigError),
}

/// 文档补全错误类型
///
/// 补全失败从不致命：文档以部分状态继续交给采集闸门。
#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("抓取失败: {0}")]
    Fetch(#[from] EngineError),

    #[error("抽取失败: {0}")]
    Extraction(#[from] ExtractionError),
}
